//! Document store port used to persist world records.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Name of a document collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionName(String);

impl CollectionName {
    /// Collection holding android world records.
    pub const ANDROID_WORLDS: &'static str = "worlds_android";

    /// Creates a collection name.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the collection name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CollectionName {
    fn default() -> Self {
        Self::new(Self::ANDROID_WORLDS)
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Acknowledgement of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpsertAck {
    /// No document existed under the key and one was inserted.
    pub inserted: bool,
    /// A document existed under the key and differed from the replacement.
    pub modified: bool,
}

impl UpsertAck {
    /// Acknowledges an insert.
    #[must_use]
    pub const fn inserted() -> Self {
        Self {
            inserted: true,
            modified: false,
        }
    }

    /// Acknowledges a replace that changed the stored document.
    #[must_use]
    pub const fn replaced() -> Self {
        Self {
            inserted: false,
            modified: true,
        }
    }

    /// Acknowledges a replace with an identical document.
    #[must_use]
    pub const fn unchanged() -> Self {
        Self {
            inserted: false,
            modified: false,
        }
    }
}

/// Keyed document persistence contract.
///
/// Implementations acquire whatever connection or session they need per call
/// and release it before returning, on success and failure alike.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Atomically inserts `document` under `key`, or fully replaces the
    /// document already stored there.
    ///
    /// Concurrent upserts on the same key are serialized; upserts on
    /// different keys do not interact.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when no connection could be
    /// established and [`StoreError::Write`] when the write itself failed. In
    /// both cases nothing was committed.
    async fn upsert_by_key(
        &self,
        collection: &CollectionName,
        key: &str,
        document: &Value,
    ) -> StoreResult<UpsertAck>;

    /// Finds the document stored under `key`.
    ///
    /// Returns `None` when no document exists.
    async fn find_by_key(&self, collection: &CollectionName, key: &str)
    -> StoreResult<Option<Value>>;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A connection or session to the store could not be established.
    #[error("document store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The store rejected or failed the operation.
    #[error("document store write failed: {0}")]
    Write(Arc<dyn std::error::Error + Send + Sync>),

    /// A document could not be encoded for the store.
    #[error("document serialization failed: {0}")]
    Serialization(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a connection failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a failed store operation.
    pub fn write(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Write(Arc::new(err))
    }

    /// Wraps a document encoding failure.
    pub fn serialization(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Serialization(Arc::new(err))
    }
}
