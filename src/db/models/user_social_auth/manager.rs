//! Manager for the user_social_auth model.
use super::UserSocialAuth;
use crate::db::{models::BATCH_SIZE, DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use sqlx::QueryBuilder;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all third-party auth links of a user.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all_by_user_id(&self, user_id: i64) -> anyhow::Result<Vec<UserSocialAuth>> {
        let statement = "
            SELECT usa.user_id, usa.provider, usa.uid
            FROM user_social_auth usa
            WHERE usa.user_id = $1
            ORDER BY usa.id
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, UserSocialAuth>(statement)
                    .bind(user_id)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a bulk of links into the database.
    ///
    /// # Errors
    /// Errors if the links cannot be inserted into the database.
    async fn insert_bulk(&mut self, links: Vec<UserSocialAuth>) -> anyhow::Result<()> {
        for chunk in links.chunks(BATCH_SIZE) {
            let mut query_builder = QueryBuilder::<sqlx::Any>::new(
                "INSERT OR IGNORE INTO user_social_auth ( user_id, provider, uid ) ",
            );
            query_builder.push_values(chunk, |mut bindings, link| {
                bindings
                    .push_bind(link.user_id)
                    .push_bind(&link.provider)
                    .push_bind(&link.uid);
            });
            query_builder.build().execute(&mut *self.tx).await?;
        }
        Ok(())
    }
}
