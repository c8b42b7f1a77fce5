use actix_http::body::MessageBody;
use actix_http::Request;
use actix_service::Service;
use actix_web::{dev::ServiceResponse, test, Error};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

use gatehouse::db::models::account_recovery::{self, AccountRecovery};
use gatehouse::db::models::pending_email_change::{self, PendingEmailChange};
use gatehouse::db::models::user_social_auth::{self, UserSocialAuth};
use gatehouse::db::{init, DatabaseConnection, DatabaseTransaction, Db, Tx};
use gatehouse::server::api::state::App as AppState;
use gatehouse::server::app::init_app;
use gatehouse::server::errors::PipelineError;
use gatehouse::server::pipeline::{AuthPipeline, Identity};
use gatehouse::utils::config::Settings;

pub const FAILURE_MESSAGE: &str = "Unable to connect with the external provider, please try again";

/// Pipeline answering every login with a fixed outcome.
pub struct StubPipeline(pub Result<Identity, PipelineError>);

#[async_trait]
impl AuthPipeline for StubPipeline {
    async fn complete(
        &self,
        _backend: &str,
        _params: &HashMap<String, String>,
    ) -> Result<Identity, PipelineError> {
        self.0.clone()
    }
}

pub fn identity(user_id: i64) -> Identity {
    Identity {
        user_id,
        provider: String::from("google-oauth2"),
        uid: format!("learner{user_id}@example.com"),
    }
}

/// A migrated `SQLite` database in a fresh temporary directory.
/// Keep the `TempDir` alive for as long as the connection is used.
pub async fn initialize_db() -> (TempDir, DatabaseConnection) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join(init::SQLITE_FILE_NAME).to_string_lossy()
    );
    let db = DatabaseConnection::connect(&url).await.unwrap();
    init::migrate(&db).await.unwrap();
    (dir, db)
}

pub async fn initialize_app(
    db: DatabaseConnection,
    pipeline: Arc<dyn AuthPipeline>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let state = AppState {
        db,
        pipeline,
        settings: Settings::default(),
    };
    test::init_service(init_app(&state)).await
}

pub async fn seed_links(db: &DatabaseConnection, links: Vec<UserSocialAuth>) {
    use user_social_auth::TxManager;
    let mut tx = DatabaseTransaction::begin(db.pool.clone()).await.unwrap();
    tx.insert_bulk(links).await.unwrap();
    tx.commit().await.unwrap();
}

pub async fn seed_email_changes(db: &DatabaseConnection, changes: Vec<PendingEmailChange>) {
    use pending_email_change::TxManager;
    let mut tx = DatabaseTransaction::begin(db.pool.clone()).await.unwrap();
    tx.insert_bulk(changes).await.unwrap();
    tx.commit().await.unwrap();
}

pub async fn seed_recoveries(db: &DatabaseConnection, records: Vec<AccountRecovery>) {
    use account_recovery::TxManager;
    let mut tx = DatabaseTransaction::begin(db.pool.clone()).await.unwrap();
    tx.insert_bulk(records).await.unwrap();
    tx.commit().await.unwrap();
}

pub fn link(user_id: i64, provider: &str) -> UserSocialAuth {
    UserSocialAuth::new(
        user_id,
        provider.to_owned(),
        format!("{provider}-uid-{user_id}"),
    )
}

pub fn email_change(user_id: i64) -> PendingEmailChange {
    PendingEmailChange {
        user_id,
        new_email: format!("new{user_id}@example.com"),
        activation_key: format!("key{user_id}"),
    }
}

pub fn recovery(user_id: i64, secondary_email: &str) -> AccountRecovery {
    AccountRecovery {
        user_id,
        secondary_email: secondary_email.to_owned(),
        is_active: 1,
    }
}
