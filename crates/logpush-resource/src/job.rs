//! Logpush job data model
//!
//! `JobConfig` is the operator-authored record, `LogpushJob` is the remote
//! entity as the API sees it, and `ResourceHandle` is the persisted identity
//! that links the two.

use crate::error::{ResourceError, Result};
use serde::{Deserialize, Serialize};

/// Declared configuration of a Logpush job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    /// Name of the zone that owns the job (e.g. "example.com")
    pub zone: String,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Query string selecting fields and formats (e.g. "fields=RayID&timestamps=rfc3339")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logpull_options: Option<String>,

    /// Destination URI the logs are pushed to
    pub destination_conf: String,

    /// Token proving ownership of the destination
    pub ownership_challenge: String,
}

impl JobConfig {
    /// Check that every required field is set
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("zone", &self.zone),
            ("destination_conf", &self.destination_conf),
            ("ownership_challenge", &self.ownership_challenge),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ResourceError::InvalidConfig(format!(
                    "{} is required",
                    field
                )));
            }
        }
        Ok(())
    }

    /// Build the remote representation of this configuration
    ///
    /// `id` is 0 when the job has not been created yet.
    pub fn to_remote(&self, id: u64) -> LogpushJob {
        LogpushJob {
            id,
            enabled: self.enabled,
            name: self.name.clone().unwrap_or_default(),
            logpull_options: self.logpull_options.clone().unwrap_or_default(),
            destination_conf: self.destination_conf.clone(),
            ownership_challenge: self.ownership_challenge.clone(),
        }
    }

    /// Overwrite every remotely-held field from `job`
    ///
    /// The zone is not part of the remote record and is left as is.
    pub fn apply_remote(&mut self, job: &LogpushJob) {
        self.name = non_empty(&job.name);
        self.enabled = job.enabled;
        self.logpull_options = non_empty(&job.logpull_options);
        self.destination_conf = job.destination_conf.clone();
        self.ownership_challenge = job.ownership_challenge.clone();
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn is_unassigned(id: &u64) -> bool {
    *id == 0
}

/// Logpush job as exchanged with the remote API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogpushJob {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: u64,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub logpull_options: String,

    #[serde(default)]
    pub destination_conf: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ownership_challenge: String,
}

impl LogpushJob {
    pub fn has_id(&self) -> bool {
        self.id != 0
    }
}

/// Zone identifier as returned by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Persisted identity of a managed job
///
/// The ID is string-encoded. An empty ID means the job has not been created
/// yet, or was found missing on the remote side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHandle {
    #[serde(default)]
    id: String,

    /// Zone ID resolved during the most recent lifecycle call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    zone_id: Option<ZoneId>,
}

impl ResourceHandle {
    /// Handle for a job that already exists remotely
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            zone_id: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn zone_id(&self) -> Option<&ZoneId> {
        self.zone_id.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// Parse the numeric job ID
    pub fn job_id(&self) -> Result<u64> {
        if self.id.is_empty() {
            return Err(ResourceError::InvalidHandle(
                "resource has no ID".to_string(),
            ));
        }
        match self.id.parse::<u64>() {
            Ok(0) | Err(_) => Err(ResourceError::InvalidHandle(format!(
                "{:?} is not a valid logpush job ID",
                self.id
            ))),
            Ok(id) => Ok(id),
        }
    }

    pub(crate) fn assign(&mut self, id: u64) {
        self.id = id.to_string();
    }

    pub(crate) fn cache_zone(&mut self, zone_id: ZoneId) {
        self.zone_id = Some(zone_id);
    }

    /// Mark the job as gone
    pub(crate) fn clear(&mut self) {
        self.id.clear();
    }
}

/// Local state of one Logpush job resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobState {
    pub config: JobConfig,

    #[serde(default)]
    pub handle: ResourceHandle,
}

impl JobState {
    pub fn new(config: JobConfig) -> Self {
        Self {
            config,
            handle: ResourceHandle::default(),
        }
    }

    pub fn with_handle(mut self, handle: ResourceHandle) -> Self {
        self.handle = handle;
        self
    }
}
