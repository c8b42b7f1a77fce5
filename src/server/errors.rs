//! Errors surfaced by the HTTP server.
use actix_web::{http::StatusCode, ResponseError};
use derive_more::Display;

/// Collection of possible HTTP errors returned to clients.
///
/// The messages are safe to show to users; the underlying cause is only logged.
#[derive(Debug, Display)]
pub enum HTTPError {
    /// 400
    #[display(fmt = "Bad request")]
    BadRequest,
    /// 500
    #[display(fmt = "Unexpected server error")]
    InternalServerError,
}

impl ResponseError for HTTPError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failures raised while completing a third-party login.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The identity provider answered a request with an HTTP error, or could not be reached.
    #[display(fmt = "Upstream provider request failed: {}", reason)]
    Http {
        /// HTTP status returned by the provider, if a response was received at all.
        status: Option<u16>,
        /// Short description of what went wrong.
        reason: String,
    },
    /// No backend is configured under this name.
    #[display(fmt = "Unknown authentication backend: {}", _0)]
    UnknownBackend(String),
    /// The user backed out at the provider.
    #[display(fmt = "Authentication was canceled")]
    Canceled,
}

impl PipelineError {
    /// Build an upstream HTTP failure.
    #[must_use]
    pub fn http(status: Option<u16>, reason: &str) -> Self {
        Self::Http {
            status,
            reason: reason.to_owned(),
        }
    }

    /// Whether this is the upstream HTTP failure that sends users back to the login page.
    #[must_use]
    pub const fn is_upstream_http(&self) -> bool {
        matches!(*self, Self::Http { .. })
    }
}

impl ResponseError for PipelineError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::Http { .. } => StatusCode::BAD_GATEWAY,
            Self::UnknownBackend(_) => StatusCode::NOT_FOUND,
            Self::Canceled => StatusCode::UNAUTHORIZED,
        }
    }
}
