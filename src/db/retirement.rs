//! Removing a retiring user's data from every model that can be deleted by value.
use serde::Serialize;

use crate::db::mixins::TxDeleteByValue;
use crate::db::models::account_recovery::AccountRecovery;
use crate::db::models::pending_email_change::PendingEmailChange;
use crate::db::models::user_social_auth::UserSocialAuth;
use crate::db::{DatabaseConnection, DatabaseTransaction, Tx};

/// Which tables had rows removed for the retiring user.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RetirementReport {
    /// Third-party auth links.
    pub user_social_auth: bool,
    /// Unconfirmed email changes.
    pub pending_email_change: bool,
    /// Account recovery addresses.
    pub account_recovery: bool,
}

impl RetirementReport {
    /// Whether anything at all was deleted.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.user_social_auth || self.pending_email_change || self.account_recovery
    }
}

/// Delete everything stored for `user_id` and `email` in one transaction.
///
/// # Errors
/// Errors if any delete fails; the transaction is then rolled back and nothing is removed.
#[tracing::instrument(skip(db, email))]
pub async fn retire_account(
    db: &DatabaseConnection,
    user_id: i64,
    email: &str,
) -> anyhow::Result<RetirementReport> {
    let mut tx = DatabaseTransaction::begin(db.pool.clone()).await?;
    match delete_user_rows(&mut tx, user_id, email).await {
        Ok(report) => {
            tx.commit().await?;
            tracing::info!(?report, "Retired account data");
            Ok(report)
        }
        Err(err) => {
            tx.rollback().await?;
            Err(err)
        }
    }
}

/// Run every retirement delete inside `tx`.
async fn delete_user_rows(
    tx: &mut DatabaseTransaction,
    user_id: i64,
    email: &str,
) -> anyhow::Result<RetirementReport> {
    Ok(RetirementReport {
        user_social_auth: tx
            .delete_by_value::<UserSocialAuth, _>(user_id, "user_id")
            .await?,
        pending_email_change: tx
            .delete_by_value::<PendingEmailChange, _>(user_id, "user_id")
            .await?,
        account_recovery: tx
            .delete_by_value::<AccountRecovery, _>(email, "secondary_email")
            .await?,
    })
}
