//! Remote API client trait definition

use crate::error::ApiResult;
use crate::job::{LogpushJob, ZoneId};
use async_trait::async_trait;

/// Remote API client abstraction
///
/// Implemented by the Cloudflare HTTP client and by in-memory stubs in tests.
/// Implementations report a missing zone or job as [`ApiError::NotFound`].
///
/// [`ApiError::NotFound`]: crate::error::ApiError::NotFound
#[async_trait]
pub trait LogpushApi: Send + Sync {
    /// Resolve a zone name to its identifier
    async fn zone_id_by_name(&self, name: &str) -> ApiResult<ZoneId>;

    /// Fetch a single job
    async fn logpush_job(&self, zone_id: &ZoneId, job_id: u64) -> ApiResult<LogpushJob>;

    /// Create a job and return it with its assigned ID
    async fn create_logpush_job(&self, zone_id: &ZoneId, job: &LogpushJob)
    -> ApiResult<LogpushJob>;

    /// Replace the configuration of an existing job
    async fn update_logpush_job(
        &self,
        zone_id: &ZoneId,
        job_id: u64,
        job: &LogpushJob,
    ) -> ApiResult<()>;

    /// Delete a job
    async fn delete_logpush_job(&self, zone_id: &ZoneId, job_id: u64) -> ApiResult<()>;
}
