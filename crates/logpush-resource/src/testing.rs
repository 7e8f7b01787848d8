//! In-memory `LogpushApi` used by unit tests

use crate::api::LogpushApi;
use crate::error::{ApiError, ApiResult};
use crate::job::{LogpushJob, ZoneId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) struct StubApi {
    zones: HashMap<String, ZoneId>,
    jobs: Mutex<HashMap<(String, u64), LogpushJob>>,
    next_id: Mutex<u64>,
    failure: Option<ApiError>,
}

impl StubApi {
    pub(crate) fn new() -> Self {
        Self {
            zones: HashMap::new(),
            jobs: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1000),
            failure: None,
        }
    }

    pub(crate) fn with_zone(mut self, name: &str, id: &str) -> Self {
        self.zones.insert(name.to_string(), ZoneId::new(id));
        self
    }

    /// ID handed out by the next create; 0 simulates an empty response
    pub(crate) fn with_next_id(self, id: u64) -> Self {
        *self.next_id.lock().unwrap() = id;
        self
    }

    /// Make every job call fail with `error`
    pub(crate) fn failing_with(mut self, error: ApiError) -> Self {
        self.failure = Some(error);
        self
    }

    pub(crate) fn insert_job(&self, zone_id: &str, job_id: u64, job: LogpushJob) {
        self.jobs
            .lock()
            .unwrap()
            .insert((zone_id.to_string(), job_id), job);
    }

    pub(crate) fn job(&self, zone_id: &str, job_id: u64) -> Option<LogpushJob> {
        self.jobs
            .lock()
            .unwrap()
            .get(&(zone_id.to_string(), job_id))
            .cloned()
    }

    pub(crate) fn job_count(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    fn check_failure(&self) -> ApiResult<()> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn key(zone_id: &ZoneId, job_id: u64) -> (String, u64) {
        (zone_id.as_str().to_string(), job_id)
    }
}

#[async_trait]
impl LogpushApi for StubApi {
    async fn zone_id_by_name(&self, name: &str) -> ApiResult<ZoneId> {
        self.zones
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("zone {}", name)))
    }

    async fn logpush_job(&self, zone_id: &ZoneId, job_id: u64) -> ApiResult<LogpushJob> {
        self.check_failure()?;
        self.jobs
            .lock()
            .unwrap()
            .get(&Self::key(zone_id, job_id))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("logpush job {}", job_id)))
    }

    async fn create_logpush_job(
        &self,
        zone_id: &ZoneId,
        job: &LogpushJob,
    ) -> ApiResult<LogpushJob> {
        self.check_failure()?;
        let mut next_id = self.next_id.lock().unwrap();
        let created = LogpushJob {
            id: *next_id,
            ..job.clone()
        };
        if created.has_id() {
            *next_id += 1;
            self.jobs
                .lock()
                .unwrap()
                .insert(Self::key(zone_id, created.id), created.clone());
        }
        Ok(created)
    }

    async fn update_logpush_job(
        &self,
        zone_id: &ZoneId,
        job_id: u64,
        job: &LogpushJob,
    ) -> ApiResult<()> {
        self.check_failure()?;
        let mut jobs = self.jobs.lock().unwrap();
        match jobs.get_mut(&Self::key(zone_id, job_id)) {
            Some(existing) => {
                *existing = LogpushJob {
                    id: job_id,
                    ..job.clone()
                };
                Ok(())
            }
            None => Err(ApiError::NotFound(format!("logpush job {}", job_id))),
        }
    }

    async fn delete_logpush_job(&self, zone_id: &ZoneId, job_id: u64) -> ApiResult<()> {
        self.check_failure()?;
        self.jobs
            .lock()
            .unwrap()
            .remove(&Self::key(zone_id, job_id))
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(format!("logpush job {}", job_id)))
    }
}
