//! Android world registration and reconciliation.
//!
//! This module keeps persisted world records consistent with environments
//! that an external container runtime provisions out-of-band. It derives
//! identity, port assignments and provisioning data for a world, then
//! upserts the record by id. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
