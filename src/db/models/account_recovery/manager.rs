//! Manager for the account_recovery model.
use super::AccountRecovery;
use crate::db::{models::BATCH_SIZE, DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use sqlx::QueryBuilder;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find the recovery record registered for a secondary email.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_by_secondary_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<AccountRecovery>> {
        let statement = "
            SELECT ar.user_id, ar.secondary_email, ar.is_active
            FROM account_recovery ar
            WHERE ar.secondary_email = $1
            LIMIT 1
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, AccountRecovery>(statement)
                    .bind(email)
                    .fetch_optional(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a bulk of recovery records into the database.
    ///
    /// # Errors
    /// Errors if the records cannot be inserted into the database.
    async fn insert_bulk(&mut self, records: Vec<AccountRecovery>) -> anyhow::Result<()> {
        for chunk in records.chunks(BATCH_SIZE) {
            let mut query_builder = QueryBuilder::<sqlx::Any>::new(
                "INSERT INTO account_recovery ( user_id, secondary_email, is_active ) ",
            );
            query_builder.push_values(chunk, |mut bindings, record| {
                bindings
                    .push_bind(record.user_id)
                    .push_bind(&record.secondary_email)
                    .push_bind(record.is_active);
            });
            query_builder.build().execute(&mut *self.tx).await?;
        }
        Ok(())
    }
}
