//! Lifecycle operation types

use serde::{Deserialize, Serialize};

/// A lifecycle operation invoked against a single resource instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Create a new job on the remote side
    Create,
    /// Refresh local state from the remote job
    Read,
    /// Push local configuration to an existing job
    Update,
    /// Remove the remote job
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "read"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// Result of a read against the remote side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The job exists and local configuration was refreshed from it
    Present,
    /// The job no longer exists; the local handle has been cleared
    Absent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "create");
        assert_eq!(Operation::Delete.to_string(), "delete");
    }

    #[test]
    fn test_operation_serde() {
        let json = serde_json::to_string(&Operation::Update).unwrap();
        assert_eq!(json, "\"update\"");
    }
}
