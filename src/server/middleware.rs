//! Redirect users back to the login page when a third-party provider fails upstream.
//!
//! Only [`PipelineError::Http`] is recovered. Every other error, and every successful
//! response, passes through untouched.
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use std::future::{ready, Ready};
use url::form_urlencoded;

use super::api::auth::{is_local_path, request::LoginQueryData};
use super::errors::PipelineError;
use super::messages::{self, Level, Message};
use super::LocalBoxFuture;
use crate::utils::config::Settings;

/// Tag attached to messages about third-party login failures.
pub const SOCIAL_AUTH_TAG: &str = "social-auth";

/// Provider callbacks live under this prefix. They can't be replayed after logging in.
const CALLBACK_PREFIX: &str = "/auth/complete/";

/// Middleware mapping upstream auth pipeline failures to a login redirect.
///
/// Register it inside [`messages::FlashMessages`] so the failure notice has a store to
/// land in.
#[derive(Debug, Clone)]
pub struct ExceptionRedirect {
    /// Login page users are sent back to.
    login_url: Rc<str>,
    /// Where a failed provider callback continues after logging in.
    default_redirect: Rc<str>,
    /// Notice shown on the login page.
    failure_message: Rc<str>,
}

impl ExceptionRedirect {
    /// Redirect to `login_url` and show `failure_message` there.
    ///
    /// Failed provider callbacks continue to their own `next` or to `default_redirect`.
    #[must_use]
    pub fn new(login_url: &str, default_redirect: &str, failure_message: &str) -> Self {
        Self {
            login_url: Rc::from(login_url),
            default_redirect: Rc::from(default_redirect),
            failure_message: Rc::from(failure_message),
        }
    }

    /// Build from the service settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.login_url,
            &settings.default_redirect,
            &settings.failure_message,
        )
    }

    /// Turn a recognized error into a redirect to the login page.
    ///
    /// Queues the failure notice on the request's message store, then returns a `302`
    /// to `<login_url>?next=<request path>`. A failed provider callback continues to its
    /// own `next` instead. Returns `None` for any error that isn't an upstream HTTP failure
    /// of the auth pipeline, leaving it to propagate.
    #[must_use]
    pub fn process_exception(&self, req: &HttpRequest, error: &Error) -> Option<HttpResponse> {
        let pipeline_error = error.as_error::<PipelineError>()?;
        if !pipeline_error.is_upstream_http() {
            return None;
        }
        tracing::warn!(path = req.path(), "Auth pipeline failed upstream: {pipeline_error}");

        let notice = Message::new(Level::Error, &self.failure_message).with_tags(SOCIAL_AUTH_TAG);
        if let Err(err) = messages::add_message(req, notice) {
            tracing::warn!("Redirecting without a failure notice: {err}");
        }

        Some(
            HttpResponse::Found()
                .insert_header((header::LOCATION, self.redirect_target(&self.next_path(req))))
                .finish(),
        )
    }

    /// Path to continue to once logged in.
    fn next_path(&self, req: &HttpRequest) -> String {
        if !req.path().starts_with(CALLBACK_PREFIX) {
            return req.path().to_owned();
        }
        web::Query::<LoginQueryData>::from_query(req.query_string())
            .ok()
            .and_then(|query| query.into_inner().next)
            .filter(|next| is_local_path(next))
            .unwrap_or_else(|| self.default_redirect.to_string())
    }

    /// Login URL carrying the path to come back to.
    fn redirect_target(&self, path: &str) -> String {
        let next: String = form_urlencoded::byte_serialize(path.as_bytes()).collect();
        // Slashes are safe inside a query value and keep the target readable.
        format!("{}?next={}", self.login_url, next.replace("%2F", "/"))
    }
}

impl Default for ExceptionRedirect {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl<S, B> Transform<S, ServiceRequest> for ExceptionRedirect
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ExceptionRedirectMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ExceptionRedirectMiddleware {
            service: Rc::new(service),
            redirect: Rc::new(self.clone()),
        }))
    }
}

/// Service produced by [`ExceptionRedirect`].
pub struct ExceptionRedirectMiddleware<S> {
    /// Wrapped service.
    service: Rc<S>,
    /// Redirect configuration.
    redirect: Rc<ExceptionRedirect>,
}

impl<S, B> Service<ServiceRequest> for ExceptionRedirectMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let redirect = Rc::clone(&self.redirect);
        Box::pin(async move {
            // Handler errors arrive already rendered, with the error kept on the response.
            // Errors raised by services themselves propagate.
            let res = service.call(req).await?;
            let recovered = res
                .response()
                .error()
                .and_then(|error| redirect.process_exception(res.request(), error));
            match recovered {
                Some(response) => Ok(res.into_response(response).map_into_right_body()),
                None => Ok(res.map_into_left_body()),
            }
        })
    }
}
