//! State management for Logpush job resources
//!
//! Persists the local [`JobState`] to `<state_dir>/state.json` and guards it
//! with a lock file so that only one lifecycle operation runs at a time.

use crate::error::{ResourceError, Result};
use crate::job::JobState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const STATE_VERSION: u32 = 1;
const STATE_FILE: &str = "state.json";
const STATE_BACKUP: &str = "state.json.backup";
const LOCK_FILE: &str = "lock.json";
const STALE_LOCK_HOURS: i64 = 1;

/// On-disk state file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    /// State file version
    pub version: u32,

    /// Last modified timestamp
    pub updated_at: DateTime<Utc>,

    pub job: JobState,
}

impl StateFile {
    pub fn new(job: JobState) -> Self {
        Self {
            version: STATE_VERSION,
            updated_at: Utc::now(),
            job,
        }
    }
}

/// State manager for reading/writing the state file
pub struct StateManager {
    state_dir: PathBuf,
}

impl StateManager {
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            state_dir: state_dir.as_ref().to_path_buf(),
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    fn state_path(&self) -> PathBuf {
        self.state_dir.join(STATE_FILE)
    }

    fn backup_path(&self) -> PathBuf {
        self.state_dir.join(STATE_BACKUP)
    }

    fn lock_path(&self) -> PathBuf {
        self.state_dir.join(LOCK_FILE)
    }

    async fn ensure_state_dir(&self) -> Result<()> {
        if !self.state_dir.exists() {
            fs::create_dir_all(&self.state_dir).await?;
            tracing::debug!("Created state directory: {}", self.state_dir.display());
        }
        Ok(())
    }

    /// Load the current state, `None` if nothing has been saved yet
    pub async fn load(&self) -> Result<Option<JobState>> {
        let path = self.state_path();
        if !path.exists() {
            tracing::debug!("State file not found");
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        let state: StateFile = serde_json::from_str(&content)?;

        if state.version > STATE_VERSION {
            return Err(ResourceError::State(format!(
                "State file version {} is newer than supported version {}",
                state.version, STATE_VERSION
            )));
        }

        tracing::debug!("Loaded state for job {:?}", state.job.handle.id());
        Ok(Some(state.job))
    }

    /// Save the state, keeping the previous file as a backup
    pub async fn save(&self, job: &JobState) -> Result<()> {
        self.ensure_state_dir().await?;

        let path = self.state_path();
        let backup = self.backup_path();

        if path.exists() {
            if backup.exists() {
                fs::remove_file(&backup).await?;
            }
            fs::rename(&path, &backup).await?;
            tracing::debug!("Created state backup");
        }

        let content = serde_json::to_string_pretty(&StateFile::new(job.clone()))?;
        fs::write(&path, content).await?;

        tracing::debug!("Saved state for job {:?}", job.handle.id());
        Ok(())
    }

    /// Take the exclusive state lock
    ///
    /// The lock file is created with `create_new`, so two processes can never
    /// both hold it. A lock older than an hour is treated as abandoned and broken once.
    pub async fn acquire_lock(&self) -> Result<StateLock> {
        self.ensure_state_dir().await?;

        let path = self.lock_path();
        let owner = LockOwner::current();
        let record = serde_json::to_vec_pretty(&owner)?;

        if !create_lock_file(&path, &record).await? {
            match LockOwner::read(&path).await {
                Some(held) if held.is_stale() => {
                    tracing::warn!("Breaking stale lock held by {} since {}", held, held.since);
                    remove_if_exists(&path).await?;
                    if !create_lock_file(&path, &record).await? {
                        return Err(ResourceError::Lock(
                            "lock was taken by another process while breaking a stale lock"
                                .to_string(),
                        ));
                    }
                }
                Some(held) => {
                    return Err(ResourceError::Lock(format!(
                        "state is locked by {} since {}",
                        held, held.since
                    )));
                }
                None => {
                    return Err(ResourceError::Lock(format!(
                        "state is locked and {} is unreadable; remove it if nothing is running",
                        path.display()
                    )));
                }
            }
        }

        tracing::debug!(pid = owner.pid, "Acquired state lock");
        Ok(StateLock { path: Some(path) })
    }
}

/// Who holds the lock, as recorded in `lock.json`
#[derive(Debug, Serialize, Deserialize)]
struct LockOwner {
    pid: u32,
    host: String,
    since: DateTime<Utc>,
}

impl LockOwner {
    fn current() -> Self {
        Self {
            pid: std::process::id(),
            host: std::env::var("HOSTNAME")
                .or_else(|_| std::env::var("HOST"))
                .unwrap_or_else(|_| "localhost".to_string()),
            since: Utc::now(),
        }
    }

    async fn read(path: &Path) -> Option<Self> {
        let content = fs::read(path).await.ok()?;
        serde_json::from_slice(&content).ok()
    }

    fn is_stale(&self) -> bool {
        Utc::now().signed_duration_since(self.since) >= chrono::Duration::hours(STALE_LOCK_HOURS)
    }
}

impl std::fmt::Display for LockOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (pid {})", self.host, self.pid)
    }
}

/// Create the lock file atomically; `false` if it already exists
async fn create_lock_file(path: &Path, record: &[u8]) -> Result<bool> {
    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    if let Err(e) = file.write_all(record).await {
        drop(file);
        remove_if_exists(path).await?;
        return Err(e.into());
    }
    file.flush().await?;
    Ok(true)
}

async fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Held state lock; the lock file is removed on release or drop
pub struct StateLock {
    path: Option<PathBuf>,
}

impl StateLock {
    pub async fn release(mut self) -> Result<()> {
        if let Some(path) = self.path.take() {
            remove_if_exists(&path).await?;
            tracing::debug!("Released state lock");
        }
        Ok(())
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}
