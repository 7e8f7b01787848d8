//! Cloudflare API client for Logpush jobs
//!
//! This crate implements the `LogpushApi` trait against the Cloudflare v4
//! REST API, so that `JobResourceAdapter` can manage real Logpush jobs.
//!
//! # Requirements
//!
//! - `CLOUDFLARE_API_TOKEN` env var with Logs:Edit permission on the zone
//! - Optionally `CLOUDFLARE_API_BASE` to point at another endpoint
//!
//! # Example
//!
//! ```ignore
//! use logpush_cloudflare::{ApiConfig, CloudflareClient};
//! use logpush_resource::{JobResourceAdapter, JobState};
//!
//! let client = CloudflareClient::new(ApiConfig::from_env()?);
//! let adapter = JobResourceAdapter::new(client);
//!
//! let mut state = JobState::new(config);
//! adapter.create(&mut state).await?;
//! println!("created job {}", state.handle.id());
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::CloudflareClient;
pub use config::{ApiConfig, CLOUDFLARE_API_BASE};
pub use error::{CloudflareError, Result};
