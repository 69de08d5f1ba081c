//! Port contracts for world registration.
//!
//! Ports define infrastructure-agnostic interfaces used by the registrar.

pub mod store;

#[cfg(test)]
pub use store::MockDocumentStore;
pub use store::{CollectionName, DocumentStore, StoreError, StoreResult, UpsertAck};
