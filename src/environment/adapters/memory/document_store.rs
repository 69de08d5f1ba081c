//! In-memory document store for registrar tests and embedding.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::environment::ports::{
    CollectionName, DocumentStore, StoreError, StoreResult, UpsertAck,
};

/// Thread-safe in-memory document store.
///
/// The store can be switched offline to simulate an unreachable backend;
/// every call then fails with [`StoreError::Unavailable`] without touching
/// stored documents.
#[derive(Debug, Clone)]
pub struct InMemoryDocumentStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug)]
struct InMemoryStoreState {
    collections: HashMap<CollectionName, HashMap<String, Value>>,
    online: bool,
}

impl Default for InMemoryStoreState {
    fn default() -> Self {
        Self {
            collections: HashMap::new(),
            online: true,
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Creates an empty, reachable store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState::default())),
        }
    }

    /// Marks the store reachable or unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] when the state lock is poisoned.
    pub fn set_online(&self, online: bool) -> StoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.online = online;
        Ok(())
    }

    /// Returns the number of documents in `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] when the state lock is poisoned.
    pub fn len(&self, collection: &CollectionName) -> StoreResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.collections.get(collection).map_or(0, HashMap::len))
    }

    /// Returns whether `collection` holds no documents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] when the state lock is poisoned.
    pub fn is_empty(&self, collection: &CollectionName) -> StoreResult<bool> {
        Ok(self.len(collection)? == 0)
    }
}

fn lock_error<T>(err: std::sync::PoisonError<T>) -> StoreError {
    StoreError::write(std::io::Error::other(err.to_string()))
}

fn offline_error() -> StoreError {
    StoreError::unavailable(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "in-memory document store is offline",
    ))
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn upsert_by_key(
        &self,
        collection: &CollectionName,
        key: &str,
        document: &Value,
    ) -> StoreResult<UpsertAck> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.online {
            return Err(offline_error());
        }

        let documents = state.collections.entry(collection.clone()).or_default();
        let ack = match documents.get(key) {
            None => UpsertAck::inserted(),
            Some(existing) if existing == document => UpsertAck::unchanged(),
            Some(_) => UpsertAck::replaced(),
        };
        documents.insert(key.to_owned(), document.clone());
        Ok(ack)
    }

    async fn find_by_key(
        &self,
        collection: &CollectionName,
        key: &str,
    ) -> StoreResult<Option<Value>> {
        let state = self.state.read().map_err(lock_error)?;
        if !state.online {
            return Err(offline_error());
        }
        Ok(state
            .collections
            .get(collection)
            .and_then(|documents| documents.get(key))
            .cloned())
    }
}
