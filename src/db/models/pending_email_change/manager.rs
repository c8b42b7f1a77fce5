//! Manager for the pending_email_change model.
use super::PendingEmailChange;
use crate::db::{models::BATCH_SIZE, DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use sqlx::QueryBuilder;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find the email change a user has not confirmed yet.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_by_user_id(&self, user_id: i64) -> anyhow::Result<Option<PendingEmailChange>> {
        let statement = "
            SELECT pec.user_id, pec.new_email, pec.activation_key
            FROM pending_email_change pec
            WHERE pec.user_id = $1
            LIMIT 1
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, PendingEmailChange>(statement)
                    .bind(user_id)
                    .fetch_optional(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a bulk of pending email changes into the database.
    ///
    /// # Errors
    /// Errors if the changes cannot be inserted into the database.
    async fn insert_bulk(&mut self, changes: Vec<PendingEmailChange>) -> anyhow::Result<()> {
        for chunk in changes.chunks(BATCH_SIZE) {
            let mut query_builder = QueryBuilder::<sqlx::Any>::new(
                "INSERT INTO pending_email_change ( user_id, new_email, activation_key ) ",
            );
            query_builder.push_values(chunk, |mut bindings, change| {
                bindings
                    .push_bind(change.user_id)
                    .push_bind(&change.new_email)
                    .push_bind(&change.activation_key);
            });
            query_builder.build().execute(&mut *self.tx).await?;
        }
        Ok(())
    }
}
