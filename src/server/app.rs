//! Serve the account service.
#![allow(clippy::exit, clippy::module_name_repetitions)]
use crate::db;
use crate::server::api::state::App as AppState;
use crate::server::messages::FlashMessages;
use crate::server::middleware::ExceptionRedirect;
use crate::server::pipeline::UnconfiguredPipeline;
use crate::server::tracing::GatehouseRootSpanBuilder;
use crate::utils::config::Settings;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{App, Error, HttpServer};
use tracing_actix_web::TracingLogger;

use std::sync::Arc;
use std::{io, path::Path, process};

use actix_http::body::MessageBody;
use actix_service::ServiceFactory;

use super::api::state::Global;
use crate::server::api::routes;

/// Serve the account service on `port`, keeping data in `data_dir`.
#[actix_web::main]
pub async fn serve(data_dir: &Path, settings: Settings, port: u16) -> io::Result<()> {
    let bind = settings.bind.clone();
    tracing::info!(
        "Running account service with data in '{}' on http://{bind}:{port}.",
        data_dir.display()
    );

    let db = match db::init::connect(data_dir).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(
                "error: could not connect to database. Confirm that DATABASE_URL env var is set correctly."
            );
            tracing::error!("Error: {:?}", err);
            process::exit(1);
        }
    };

    let state = AppState {
        db,
        pipeline: Arc::new(UnconfiguredPipeline),
        settings,
    };

    HttpServer::new(move || init_app(&state))
        .bind((bind, port))?
        .run()
        .await
}

/// Initialize the application with all routes and middleware.
///
/// Middleware order, outermost first: request tracing, flash messages, exception
/// redirect. The redirect has to sit inside the message middleware so that its
/// failure notice reaches the message cookie.
///
/// # Arguments
/// * `state` - The application state
pub fn init_app<T: Global + Clone + 'static>(
    state: &T,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    let settings = state.settings();
    routes::register_app(App::new(), state)
        .wrap(ExceptionRedirect::from_settings(settings))
        .wrap(FlashMessages::new(&settings.message_cookie))
        .wrap(TracingLogger::<GatehouseRootSpanBuilder>::new())
}
