//! The account service's HTTP surface.
//!
//! Routes for completing third-party logins, the login landing page and account
//! retirement, plus the middleware that carries flash messages and turns upstream
//! auth failures into login redirects.

use std::future::Future;
use std::pin::Pin;

pub mod api;
pub mod app;
pub mod errors;
pub mod messages;
pub mod middleware;
pub mod pipeline;
pub mod tracing;

/// Boxed future returned by our middleware services. Actix runs them on a single thread.
pub(crate) type LocalBoxFuture<T> = Pin<Box<dyn Future<Output = T>>>;
