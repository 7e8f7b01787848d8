//! Cloudflare Logpush API client
//!
//! Direct Cloudflare v4 API implementation of [`LogpushApi`] using Bearer
//! token authentication.

use crate::config::ApiConfig;
use crate::error::{CloudflareError, Result};
use async_trait::async_trait;
use logpush_resource::{ApiResult, LogpushApi, LogpushJob, ZoneId};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Cloudflare API client
pub struct CloudflareClient {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl CloudflareClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_token: config.api_token,
            base_url: config.base_url,
        }
    }

    fn jobs_url(&self, zone_id: &ZoneId) -> String {
        format!("{}/zones/{}/logpush/jobs", self.base_url, zone_id)
    }

    fn job_url(&self, zone_id: &ZoneId, job_id: u64) -> String {
        format!("{}/{}", self.jobs_url(zone_id), job_id)
    }

    /// Send a request and unwrap the `{ success, errors, result }` envelope
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<Option<T>> {
        let response = request.bearer_auth(&self.api_token).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CloudflareError::NotFound(what.to_string()));
        }

        let body = response.text().await?;
        let api_response: ApiResponse<T> = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                CloudflareError::JsonError(e)
            } else {
                CloudflareError::ApiError {
                    status: status.as_u16(),
                    message: body.clone(),
                }
            }
        })?;

        if !api_response.success || !status.is_success() {
            let message = api_response
                .errors
                .first()
                .map(|e| format!("{} (code {})", e.message, e.code))
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(CloudflareError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(api_response.result)
    }

    /// Find the ID of a zone by its name
    pub async fn zone_id(&self, name: &str) -> Result<ZoneId> {
        let url = format!("{}/zones", self.base_url);
        let request = self.client.get(&url).query(&[("name", name)]);

        let zones: Vec<ApiZone> = self
            .send(request, &format!("zone {}", name))
            .await?
            .unwrap_or_default();

        zones
            .into_iter()
            .find(|z| z.name == name)
            .map(|z| ZoneId::new(z.id))
            .ok_or_else(|| CloudflareError::NotFound(format!("zone {}", name)))
    }

    /// Get a Logpush job
    pub async fn get_job(&self, zone_id: &ZoneId, job_id: u64) -> Result<LogpushJob> {
        let what = format!("logpush job {}", job_id);
        let request = self.client.get(self.job_url(zone_id, job_id));

        // A null result decodes to an unassigned job (ID 0)
        let job = self.send(request, &what).await?;
        Ok(job.unwrap_or_default())
    }

    /// Create a Logpush job
    pub async fn create_job(&self, zone_id: &ZoneId, job: &LogpushJob) -> Result<LogpushJob> {
        let what = format!("create logpush job in zone {}", zone_id);
        let request = self.client.post(self.jobs_url(zone_id)).json(job);

        let job = self.send(request, &what).await?;
        Ok(job.unwrap_or_default())
    }

    /// Replace an existing Logpush job
    pub async fn update_job(
        &self,
        zone_id: &ZoneId,
        job_id: u64,
        job: &LogpushJob,
    ) -> Result<()> {
        let request = self.client.put(self.job_url(zone_id, job_id)).json(job);

        self.send::<serde_json::Value>(request, &format!("logpush job {}", job_id))
            .await?;
        Ok(())
    }

    /// Delete a Logpush job
    pub async fn delete_job(&self, zone_id: &ZoneId, job_id: u64) -> Result<()> {
        let request = self.client.delete(self.job_url(zone_id, job_id));

        self.send::<serde_json::Value>(request, &format!("logpush job {}", job_id))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl LogpushApi for CloudflareClient {
    async fn zone_id_by_name(&self, name: &str) -> ApiResult<ZoneId> {
        Ok(self.zone_id(name).await?)
    }

    async fn logpush_job(&self, zone_id: &ZoneId, job_id: u64) -> ApiResult<LogpushJob> {
        Ok(self.get_job(zone_id, job_id).await?)
    }

    async fn create_logpush_job(
        &self,
        zone_id: &ZoneId,
        job: &LogpushJob,
    ) -> ApiResult<LogpushJob> {
        Ok(self.create_job(zone_id, job).await?)
    }

    async fn update_logpush_job(
        &self,
        zone_id: &ZoneId,
        job_id: u64,
        job: &LogpushJob,
    ) -> ApiResult<()> {
        Ok(self.update_job(zone_id, job_id, job).await?)
    }

    async fn delete_logpush_job(&self, zone_id: &ZoneId, job_id: u64) -> ApiResult<()> {
        Ok(self.delete_job(zone_id, job_id).await?)
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    result: Option<T>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: i32,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiZone {
    id: String,
    name: String,
}
