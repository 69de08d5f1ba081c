//! World record aggregate root.

use super::{
    EnvironmentId, EnvironmentKind, EnvironmentStatus, Port, PortAssignment, ProvisioningConfig,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Persisted description of one sandboxed device environment.
///
/// Serialized field names match the documents already stored in the world
/// collection, which out-of-band tooling reads directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    #[serde(rename = "uuid")]
    id: EnvironmentId,
    #[serde(rename = "name")]
    display_name: String,
    #[serde(rename = "env_type")]
    kind: EnvironmentKind,
    description: String,
    host: String,
    control_port: Port,
    #[serde(rename = "all_ports")]
    ports: PortAssignment,
    status: EnvironmentStatus,
    #[serde(rename = "is_free")]
    is_available: bool,
    #[serde(rename = "for_annotation")]
    reserved_for_annotation: bool,
    #[serde(rename = "config")]
    provisioning: ProvisioningConfig,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object holding the resolved fields of a world record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRecordParts {
    /// Reconciliation key.
    pub id: EnvironmentId,
    /// Human-readable name.
    pub display_name: String,
    /// Device kind.
    pub kind: EnvironmentKind,
    /// Free-form description.
    pub description: String,
    /// Host the published ports live on.
    pub host: String,
    /// Published host ports.
    pub ports: PortAssignment,
    /// Reported lifecycle status.
    pub status: EnvironmentStatus,
    /// Whether the world is reserved for annotation work.
    pub reserved_for_annotation: bool,
    /// Data for the container runtime.
    pub provisioning: ProvisioningConfig,
}

impl EnvironmentRecord {
    /// Assembles a record that is available for use, stamped with the
    /// current clock time as both creation and update time.
    #[must_use]
    pub fn new(parts: EnvironmentRecordParts, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: parts.id,
            display_name: parts.display_name,
            kind: parts.kind,
            description: parts.description,
            host: parts.host,
            control_port: parts.ports.control(),
            ports: parts.ports,
            status: parts.status,
            is_available: true,
            reserved_for_annotation: parts.reserved_for_annotation,
            provisioning: parts.provisioning,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the world identifier.
    #[must_use]
    pub const fn id(&self) -> &EnvironmentId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the device kind.
    #[must_use]
    pub const fn kind(&self) -> EnvironmentKind {
        self.kind
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the primary externally reachable port.
    #[must_use]
    pub const fn control_port(&self) -> Port {
        self.control_port
    }

    /// Returns all published host ports by role.
    #[must_use]
    pub const fn ports(&self) -> PortAssignment {
        self.ports
    }

    /// Returns the reported lifecycle status.
    #[must_use]
    pub const fn status(&self) -> &EnvironmentStatus {
        &self.status
    }

    /// Returns whether the world is free for allocation.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.is_available
    }

    /// Returns whether the world is reserved for annotation work.
    #[must_use]
    pub const fn reserved_for_annotation(&self) -> bool {
        self.reserved_for_annotation
    }

    /// Returns the provisioning config.
    #[must_use]
    pub const fn provisioning(&self) -> &ProvisioningConfig {
        &self.provisioning
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest reconciliation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
