//! World registrar: reconciles records of sandboxed Android devices.
//!
//! Android worlds are emulated devices that an external container runtime
//! starts out-of-band. This crate computes their identity, published ports
//! and provisioning data, and keeps one persisted record per world in step
//! with that runtime through an idempotent upsert keyed by the world id.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//! - **Services**: Orchestration of domain logic through ports
//!
//! # Modules
//!
//! - [`environment`]: World records, the store port and the registrar
//! - [`config`]: Explicit registrar configuration
//! - [`cli`]: Argument handling for the `create-android-world` binary
//! - [`shell`]: POSIX quoting for rendered container commands
//! - [`telemetry`]: Tracing subscriber setup for binaries

pub mod cli;
pub mod config;
pub mod environment;
pub mod shell;
pub mod telemetry;
