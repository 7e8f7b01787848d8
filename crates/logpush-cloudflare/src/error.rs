//! Cloudflare client error types

use logpush_resource::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudflareError {
    #[error("Environment variable not set: {0}")]
    MissingEnvVar(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Cloudflare API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<CloudflareError> for ApiError {
    fn from(err: CloudflareError) -> Self {
        match err {
            CloudflareError::NotFound(what) => ApiError::NotFound(what),
            CloudflareError::ApiError { status, message } => ApiError::Api { status, message },
            other => ApiError::Transport(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudflareError>;
