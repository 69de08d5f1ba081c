//! World lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status reported by the caller for a world.
///
/// The registrar never derives the status itself; it records what the
/// provisioning side reports. The well-known values are normalized to
/// lowercase, anything else is kept verbatim as [`EnvironmentStatus::Other`]
/// so statuses used by other tooling (such as `completed`) round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnvironmentStatus {
    /// The container is up and the device is reachable.
    #[default]
    Running,
    /// The container has been requested but is not ready yet.
    Pending,
    /// The container has been stopped.
    Stopped,
    /// Provisioning or the device itself failed.
    Failed,
    /// Any other caller-reported status, stored as given.
    Other(String),
}

impl EnvironmentStatus {
    /// Returns the storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "running",
            Self::Pending => "pending",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for EnvironmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EnvironmentStatus {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "running" => Self::Running,
            "pending" => Self::Pending,
            "stopped" => Self::Stopped,
            "failed" => Self::Failed,
            _ => Self::Other(trimmed.to_owned()),
        }
    }
}

impl From<String> for EnvironmentStatus {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<EnvironmentStatus> for String {
    fn from(status: EnvironmentStatus) -> Self {
        match status {
            EnvironmentStatus::Other(value) => value,
            known => known.as_str().to_owned(),
        }
    }
}
