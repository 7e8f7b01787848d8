//! Error types for Logpush job lifecycle management

use crate::lifecycle::Operation;
use thiserror::Error;

/// Errors reported by a remote API client
///
/// `NotFound` is kept distinct so that callers can branch on the kind of
/// failure instead of inspecting message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Lifecycle errors surfaced to the orchestrator
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("error finding zone {zone:?}: {source}")]
    ScopeResolution {
        zone: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to {operation} logpush job {target}: {source}")]
    RemoteCall {
        operation: Operation,
        target: String,
        #[source]
        source: ApiError,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid resource handle: {0}")]
    InvalidHandle(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("state file error: {0}")]
    State(String),

    #[error("lock acquisition failed: {0}")]
    Lock(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResourceError {
    pub(crate) fn remote(operation: Operation, target: impl ToString, source: ApiError) -> Self {
        ResourceError::RemoteCall {
            operation,
            target: target.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResourceError>;
