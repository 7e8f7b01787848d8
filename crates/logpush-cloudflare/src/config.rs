//! API client configuration

use crate::error::{CloudflareError, Result};

pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Configuration for the Cloudflare API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_token: String,
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: CLOUDFLARE_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create ApiConfig from environment variables
    ///
    /// `CLOUDFLARE_API_TOKEN` is required, `CLOUDFLARE_API_BASE` overrides the endpoint.
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var("CLOUDFLARE_API_TOKEN")
            .map_err(|_| CloudflareError::MissingEnvVar("CLOUDFLARE_API_TOKEN".to_string()))?;

        let config = Self::new(api_token);
        Ok(match std::env::var("CLOUDFLARE_API_BASE") {
            Ok(base_url) if !base_url.is_empty() => config.with_base_url(base_url),
            _ => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("CLOUDFLARE_API_TOKEN", Some("token-123")),
                ("CLOUDFLARE_API_BASE", None),
            ],
            || {
                let config = ApiConfig::from_env().unwrap();
                assert_eq!(config.api_token, "token-123");
                assert_eq!(config.base_url, CLOUDFLARE_API_BASE);
            },
        );
    }

    #[test]
    fn test_from_env_base_override() {
        temp_env::with_vars(
            [
                ("CLOUDFLARE_API_TOKEN", Some("token-123")),
                ("CLOUDFLARE_API_BASE", Some("http://localhost:8787/client/v4/")),
            ],
            || {
                let config = ApiConfig::from_env().unwrap();
                assert_eq!(config.base_url, "http://localhost:8787/client/v4");
            },
        );
    }

    #[test]
    fn test_from_env_missing_token() {
        temp_env::with_var_unset("CLOUDFLARE_API_TOKEN", || {
            match ApiConfig::from_env() {
                Err(CloudflareError::MissingEnvVar(name)) => {
                    assert_eq!(name, "CLOUDFLARE_API_TOKEN")
                }
                other => panic!("Expected MissingEnvVar, got {:?}", other),
            }
        });
    }
}
