//! A central place to register App routes.
use std::sync::Arc;

use actix_service::ServiceFactory;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    web, App, Error,
};

use super::auth::{complete, login};
use super::retire::retire;
use super::state::Global;

#[expect(
    clippy::literal_string_with_formatting_args,
    reason = "Actix Web resource path uses `{param}` syntax which is not formatting but route pattern matching"
)]
/// Central place to register all the App routing.
///
/// - `GET /login`: landing page for (re)starting a login, showing pending messages
/// - `GET /auth/complete/{backend}`: provider callback finishing a third-party login
/// - `POST /_api/accounts/retire`: remove a retiring user's account data
#[tracing::instrument(skip(app, state))]
pub fn register_app<
    T: Global + Clone + 'static,
    U: MessageBody,
    V: ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<U>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
>(
    app: App<V>,
    state: &T,
) -> App<V> {
    let data_state: Arc<dyn Global> = Arc::new(state.clone());
    let login_url = state.settings().login_url.clone();
    app.app_data(web::Data::new(data_state))
        .service(web::resource(login_url.as_str()).route(web::get().to(login)))
        .service(
            web::scope("/auth")
                .service(web::resource("/complete/{backend}").route(web::get().to(complete))),
        )
        .service(
            web::scope("/_api")
                .service(web::resource("/accounts/retire").route(web::post().to(retire))),
        )
}
