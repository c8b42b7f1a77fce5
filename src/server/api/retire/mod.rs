//! API endpoint for retiring an account's data.
use std::sync::Arc;

use actix_web::{web, HttpResponse};
use request::RetireRequestData;

use super::state::Global;
use crate::db::retirement::retire_account;
use crate::server::errors::HTTPError;

/// Module that maps the HTTP web request body to structs.
pub mod request;

/// Delete the user's rows from every retirable table.
/// Responds with which tables had rows removed.
#[tracing::instrument(name = "Retiring account", skip(body, data), fields(user_id = body.user_id))]
pub async fn retire(
    body: web::Json<RetireRequestData>,
    data: web::Data<Arc<dyn Global>>,
) -> HttpResponse {
    let RetireRequestData { user_id, email } = body.into_inner();
    if email.trim().is_empty() {
        return HttpResponse::BadRequest().body(HTTPError::BadRequest.to_string());
    }
    match retire_account(data.db(), user_id, &email).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(err) => {
            tracing::error!("Unable to retire account: {err:?}");
            HttpResponse::InternalServerError().body(HTTPError::InternalServerError.to_string())
        }
    }
}
