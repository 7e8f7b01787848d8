//! Lifecycle adapter for Logpush job resources
//!
//! Each operation resolves the zone by name, builds the remote record from
//! local configuration, performs one remote call and writes the result back
//! into [`JobState`]. Nothing is cached across calls and nothing is retried.

use crate::api::LogpushApi;
use crate::error::{ResourceError, Result};
use crate::job::{JobState, ZoneId};
use crate::lifecycle::{Operation, ReadOutcome};

/// Maps a local [`JobState`] to and from a remotely managed Logpush job
pub struct JobResourceAdapter<C> {
    client: C,
}

impl<C: LogpushApi> JobResourceAdapter<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Resolve the zone named in the configuration and cache its ID in the handle
    pub async fn resolve_zone(&self, state: &mut JobState) -> Result<ZoneId> {
        let zone = &state.config.zone;
        let zone_id = self
            .client
            .zone_id_by_name(zone)
            .await
            .map_err(|source| ResourceError::ScopeResolution {
                zone: zone.clone(),
                source,
            })?;

        tracing::debug!("Resolved zone {} to {}", zone, zone_id);
        state.handle.cache_zone(zone_id.clone());
        Ok(zone_id)
    }

    /// Create the job and record its assigned ID
    pub async fn create(&self, state: &mut JobState) -> Result<()> {
        if !state.handle.is_empty() {
            return Err(ResourceError::InvalidHandle(format!(
                "resource already has ID {}",
                state.handle.id()
            )));
        }
        state.config.validate()?;

        let zone_id = self.resolve_zone(state).await?;
        let job = state.config.to_remote(0);

        tracing::debug!("Creating logpush job in zone {}: {:?}", zone_id, job);

        let created = self
            .client
            .create_logpush_job(&zone_id, &job)
            .await
            .map_err(|e| {
                ResourceError::remote(Operation::Create, format!("in zone {}", zone_id), e)
            })?;

        if !created.has_id() {
            return Err(ResourceError::MalformedResponse(
                "failed to find ID in create response; resource was empty".to_string(),
            ));
        }

        state.handle.assign(created.id);
        tracing::info!("Created logpush job {} in zone {}", created.id, zone_id);
        Ok(())
    }

    /// Refresh local configuration from the remote job
    ///
    /// A job that no longer exists is reported as [`ReadOutcome::Absent`]
    /// and the handle is cleared.
    pub async fn read(&self, state: &mut JobState) -> Result<ReadOutcome> {
        let zone_id = self.resolve_zone(state).await?;
        let job_id = state.handle.job_id()?;

        let job = match self.client.logpush_job(&zone_id, job_id).await {
            Ok(job) => job,
            Err(e) if e.is_not_found() => {
                tracing::warn!("Could not find logpush job {}, removing from state", job_id);
                state.handle.clear();
                return Ok(ReadOutcome::Absent);
            }
            Err(e) => return Err(ResourceError::remote(Operation::Read, job_id, e)),
        };

        if !job.has_id() {
            tracing::warn!(
                "Logpush job {} came back without an ID, removing from state",
                job_id
            );
            state.handle.clear();
            return Ok(ReadOutcome::Absent);
        }

        state.config.apply_remote(&job);
        tracing::debug!("Refreshed logpush job {}", job_id);
        Ok(ReadOutcome::Present)
    }

    /// Push local configuration to the existing job
    pub async fn update(&self, state: &mut JobState) -> Result<()> {
        state.config.validate()?;

        let zone_id = self.resolve_zone(state).await?;
        let job_id = state.handle.job_id()?;
        let job = state.config.to_remote(job_id);

        tracing::info!("Updating logpush job {} in zone {}", job_id, zone_id);

        self.client
            .update_logpush_job(&zone_id, job_id, &job)
            .await
            .map_err(|e| ResourceError::remote(Operation::Update, job_id, e))?;

        Ok(())
    }

    /// Delete the remote job and clear the handle
    pub async fn delete(&self, state: &mut JobState) -> Result<()> {
        let zone_id = self.resolve_zone(state).await?;
        let job_id = state.handle.job_id()?;

        tracing::debug!("Deleting logpush job {} from zone {}", job_id, zone_id);

        self.client
            .delete_logpush_job(&zone_id, job_id)
            .await
            .map_err(|e| ResourceError::remote(Operation::Delete, job_id, e))?;

        state.handle.clear();
        tracing::info!("Deleted logpush job {}", job_id);
        Ok(())
    }
}
