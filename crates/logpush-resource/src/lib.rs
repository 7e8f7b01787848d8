//! Logpush job resource lifecycle
//!
//! This crate maps a declarative Logpush job configuration onto a remote
//! management API and reconciles remote state back into local state.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 logpush CLI                      │
//! │        (create / read / update / delete)         │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               logpush-resource                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          JobResourceAdapter<C>            │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │   JobState   │  │  State Mgmt  │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │ trait LogpushApi
//! ┌───────▼───────┐
//! │  cloudflare   │
//! │  API client   │
//! └───────────────┘
//! ```
//!
//! # Lifecycle
//!
//! `Absent -(create)-> Present -(update)*-> Present -(delete)-> Absent`.
//! A read that finds the job gone moves it back to `Absent`.

pub mod adapter;
pub mod api;
pub mod error;
pub mod job;
pub mod lifecycle;
pub mod state;

#[cfg(test)]
mod testing;

// Re-exports
pub use adapter::JobResourceAdapter;
pub use api::LogpushApi;
pub use error::{ApiError, ApiResult, ResourceError, Result};
pub use job::{JobConfig, JobState, LogpushJob, ResourceHandle, ZoneId};
pub use lifecycle::{Operation, ReadOutcome};
pub use state::{StateFile, StateLock, StateManager};
