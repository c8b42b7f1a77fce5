use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::db::mixins::DeletableByValue;

pub mod manager;

/// Trait for managing account recovery addresses.
#[async_trait]
pub trait Manager {
    /// Find the recovery record registered for a secondary email.
    async fn find_by_secondary_email(&self, email: &str)
        -> anyhow::Result<Option<AccountRecovery>>;
}

/// Trait for managing transactions on account recovery addresses.
#[async_trait]
pub trait TxManager {
    /// Insert a bulk of recovery records.
    async fn insert_bulk(&mut self, records: Vec<AccountRecovery>) -> anyhow::Result<()>;
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for a secondary address used to recover an account.
pub struct AccountRecovery {
    /// Id of the account owner.
    pub user_id: i64,
    /// Secondary email address.
    pub secondary_email: String,
    /// Whether the address was confirmed. Stored as an integer flag.
    pub is_active: i64,
}

impl DeletableByValue for AccountRecovery {
    const TABLE: &'static str = "account_recovery";
    const COLUMNS: &'static [&'static str] = &["id", "user_id", "secondary_email", "is_active"];
}
