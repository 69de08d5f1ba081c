//! Domain model for world registration.
//!
//! The world domain models identity, port derivation, lifecycle status and
//! the provisioning data handed to the external container runtime. All
//! infrastructure concerns are kept outside the domain boundary.

mod error;
mod ids;
mod kind;
mod ports;
mod provisioning;
mod record;
mod status;

pub use error::EnvironmentDomainError;
pub use ids::{EnvironmentId, IdLength};
pub use kind::EnvironmentKind;
pub use ports::{ADB_PORT_OFFSET, Port, PortAssignment};
pub use provisioning::{
    ContainerPorts, ContainerRuntimeConfig, ProvisioningConfig, ProvisioningTemplate,
};
pub use record::{EnvironmentRecord, EnvironmentRecordParts};
pub use status::EnvironmentStatus;
