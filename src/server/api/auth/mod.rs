//! Login landing page and the third-party login callback.
use std::collections::HashMap;
use std::sync::Arc;

use actix_web::http::header;
use actix_web::{error, web, HttpRequest, HttpResponse};
use request::LoginQueryData;
use serde::Serialize;

use super::state::Global;
use crate::db::models::user_social_auth::{TxManager as _, UserSocialAuth};
use crate::db::{DatabaseTransaction, Tx};
use crate::server::errors::HTTPError;
use crate::server::messages::{self, Message};

/// Module that maps the HTTP web request body to structs.
pub mod request;

/// Body of the login page.
#[derive(Serialize, Debug)]
pub struct LoginPage {
    /// Where to continue once logged in.
    pub next: Option<String>,
    /// Notices queued for this page, e.g. a failed third-party login.
    pub messages: Vec<Message>,
}

/// Render the login page. Pending flash messages are shown here, and only here.
#[tracing::instrument(name = "Rendering login page", skip(req, query))]
pub async fn login(req: HttpRequest, query: web::Query<LoginQueryData>) -> HttpResponse {
    let next = query.into_inner().next.filter(|next| is_local_path(next));
    let page = LoginPage {
        next,
        messages: messages::take_messages(&req),
    };
    HttpResponse::Ok().json(page)
}

/// Finish a third-party login for `backend` and record the provider link.
///
/// Pipeline failures are returned as errors so that
/// [`crate::server::middleware::ExceptionRedirect`] can recover the upstream ones.
#[tracing::instrument(name = "Completing third-party login", skip(query, data))]
pub async fn complete(
    backend: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    data: web::Data<Arc<dyn Global>>,
) -> Result<HttpResponse, error::Error> {
    let backend = backend.into_inner();
    let params = query.into_inner();
    let identity = data.pipeline().complete(&backend, &params).await?;

    let link = UserSocialAuth::new(identity.user_id, identity.provider, identity.uid);
    record_link(&data, link).await.map_err(|err| {
        tracing::error!("Unable to record provider link: {err:?}");
        error::Error::from(HTTPError::InternalServerError)
    })?;

    let next = params
        .get("next")
        .filter(|next| is_local_path(next))
        .map_or_else(|| data.settings().default_redirect.clone(), Clone::clone);
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, next))
        .finish())
}

/// Store the provider link, keeping an existing identical one.
async fn record_link(data: &web::Data<Arc<dyn Global>>, link: UserSocialAuth) -> anyhow::Result<()> {
    let mut tx = DatabaseTransaction::begin(data.db().pool.clone()).await?;
    match tx.insert_bulk(vec![link]).await {
        Ok(()) => tx.commit().await,
        Err(err) => {
            tx.rollback().await?;
            Err(err)
        }
    }
}

/// Only same-site paths are followed after login.
pub(crate) fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//")
}
