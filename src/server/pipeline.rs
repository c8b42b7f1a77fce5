//! The seam to the third-party authentication pipeline.
//!
//! Talking to identity providers happens outside this crate. The server only needs the
//! outcome: either the identity the provider vouched for, or a [`PipelineError`].
use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use super::errors::PipelineError;

/// An identity confirmed by a provider.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Local user the identity belongs to.
    pub user_id: i64,
    /// Backend name of the provider.
    pub provider: String,
    /// The user's identifier at the provider.
    pub uid: String,
}

/// Completes a third-party login once the provider redirects back to us.
#[async_trait]
pub trait AuthPipeline: Send + Sync {
    /// Finish the login for `backend` using the callback's query parameters.
    ///
    /// # Errors
    /// [`PipelineError::Http`] when the provider can't be reached or answers with an
    /// HTTP error; other variants for failures on our side or the user's.
    async fn complete(
        &self,
        backend: &str,
        params: &HashMap<String, String>,
    ) -> Result<Identity, PipelineError>;
}

/// Pipeline used when no provider is configured: every backend is unknown.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredPipeline;

#[async_trait]
impl AuthPipeline for UnconfiguredPipeline {
    async fn complete(
        &self,
        backend: &str,
        _params: &HashMap<String, String>,
    ) -> Result<Identity, PipelineError> {
        Err(PipelineError::UnknownBackend(backend.to_owned()))
    }
}
