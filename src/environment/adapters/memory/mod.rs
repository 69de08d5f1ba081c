//! In-memory adapters for world registration.

mod document_store;

pub use document_store::InMemoryDocumentStore;
