use std::time::Duration;

use thiserror::Error;

/// Errors raised by the remote scorer and its chat backends.
///
/// Only construction errors reach callers; per-request errors are retried and then
/// degrade to "no score".
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote scoring requires an API key ({var} is not set)")]
    MissingCredential { var: &'static str },

    #[error("chat completion request could not be built: {reason}")]
    InvalidRequest { reason: String },

    #[error("chat completion failed: {reason}")]
    Transport { reason: String },

    #[error("chat completion timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("chat completion returned no content")]
    EmptyResponse,
}
