use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::db::mixins::DeletableByValue;

pub mod manager;

/// Trait for managing third-party auth links.
#[async_trait]
pub trait Manager {
    /// Find all third-party auth links of a user.
    async fn find_all_by_user_id(&self, user_id: i64) -> anyhow::Result<Vec<UserSocialAuth>>;
}

/// Trait for managing transactions on third-party auth links.
#[async_trait]
pub trait TxManager {
    /// Insert a bulk of links, ignoring ones already recorded.
    async fn insert_bulk(&mut self, links: Vec<UserSocialAuth>) -> anyhow::Result<()>;
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for a user's link to a third-party identity provider.
pub struct UserSocialAuth {
    /// Id of the linked user.
    pub user_id: i64,
    /// Backend name of the provider, e.g. `google-oauth2`.
    pub provider: String,
    /// The user's identifier at the provider.
    pub uid: String,
}

impl UserSocialAuth {
    /// Create a new link.
    #[must_use]
    pub const fn new(user_id: i64, provider: String, uid: String) -> Self {
        Self {
            user_id,
            provider,
            uid,
        }
    }
}

impl DeletableByValue for UserSocialAuth {
    const TABLE: &'static str = "user_social_auth";
    const COLUMNS: &'static [&'static str] = &["id", "user_id", "provider", "uid"];
}
