use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::db::mixins::DeletableByValue;

pub mod manager;

/// Trait for managing pending email changes.
#[async_trait]
pub trait Manager {
    /// Find the email change a user has not confirmed yet, if any.
    async fn find_by_user_id(&self, user_id: i64) -> anyhow::Result<Option<PendingEmailChange>>;
}

/// Trait for managing transactions on pending email changes.
#[async_trait]
pub trait TxManager {
    /// Insert a bulk of pending email changes.
    async fn insert_bulk(&mut self, changes: Vec<PendingEmailChange>) -> anyhow::Result<()>;
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for an email change awaiting confirmation.
pub struct PendingEmailChange {
    /// Id of the user changing their email.
    pub user_id: i64,
    /// Address the user asked to switch to.
    pub new_email: String,
    /// Key sent in the confirmation link.
    pub activation_key: String,
}

impl DeletableByValue for PendingEmailChange {
    const TABLE: &'static str = "pending_email_change";
    const COLUMNS: &'static [&'static str] = &["id", "user_id", "new_email", "activation_key"];
}
