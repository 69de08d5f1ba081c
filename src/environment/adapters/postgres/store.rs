//! `PostgreSQL` document store backed by a JSONB table.

use super::{models::NewDocumentRow, schema::registry_documents};
use crate::environment::ports::{
    CollectionName, DocumentStore, StoreError, StoreResult, UpsertAck,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use serde_json::Value;
use std::time::Duration;

/// r2d2 rejects a zero checkout timeout.
const MIN_CONNECT_TIMEOUT: Duration = Duration::from_millis(1);

/// `PostgreSQL` connection pool type used by the document store.
pub type DocumentPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed document store.
///
/// Each call checks a connection out of the pool and returns it when the
/// pooled guard drops, whichever way the call exits.
#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: DocumentPgPool,
}

impl PostgresDocumentStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DocumentPgPool) -> Self {
        Self { pool }
    }

    /// Builds a single-connection pool for `database_url`.
    ///
    /// Connections are established lazily, so an unreachable database
    /// surfaces as [`StoreError::Unavailable`] on the first store call, once
    /// `connect_timeout` has passed, rather than here.
    #[must_use]
    pub fn connect_lazy(database_url: &str, connect_timeout: Duration) -> Self {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(1)
            .min_idle(Some(0))
            .connection_timeout(connect_timeout.max(MIN_CONNECT_TIMEOUT))
            .build_unchecked(manager);
        Self::new(pool)
    }

    async fn run_blocking<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreError::write)?
    }
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        Self::write(err)
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn upsert_by_key(
        &self,
        collection: &CollectionName,
        key: &str,
        document: &Value,
    ) -> StoreResult<UpsertAck> {
        let row = NewDocumentRow {
            collection: collection.as_str().to_owned(),
            document_key: key.to_owned(),
            document: document.clone(),
        };

        self.run_blocking(move |connection| {
            connection.transaction::<_, StoreError, _>(|conn| upsert_row(conn, &row))
        })
        .await
    }

    async fn find_by_key(
        &self,
        collection: &CollectionName,
        key: &str,
    ) -> StoreResult<Option<Value>> {
        let collection_name = collection.as_str().to_owned();
        let document_key = key.to_owned();

        self.run_blocking(move |connection| {
            let document = registry_documents::table
                .filter(registry_documents::collection.eq(&collection_name))
                .filter(registry_documents::document_key.eq(&document_key))
                .select(registry_documents::document)
                .first::<Value>(connection)
                .optional()?;
            Ok(document)
        })
        .await
    }
}

/// Inserts the row or replaces the stored document, inside the caller's
/// transaction.
///
/// `ON CONFLICT DO NOTHING` waits for any concurrent insert of the same key
/// to settle; the subsequent `FOR UPDATE` read holds the row lock until the
/// transaction ends, so same-key writers are serialized.
fn upsert_row(conn: &mut PgConnection, row: &NewDocumentRow) -> StoreResult<UpsertAck> {
    let inserted = diesel::insert_into(registry_documents::table)
        .values(row)
        .on_conflict((
            registry_documents::collection,
            registry_documents::document_key,
        ))
        .do_nothing()
        .execute(conn)?;
    if inserted > 0 {
        return Ok(UpsertAck::inserted());
    }

    let existing = registry_documents::table
        .filter(registry_documents::collection.eq(&row.collection))
        .filter(registry_documents::document_key.eq(&row.document_key))
        .select(registry_documents::document)
        .for_update()
        .first::<Value>(conn)?;
    if existing == row.document {
        return Ok(UpsertAck::unchanged());
    }

    diesel::update(
        registry_documents::table
            .filter(registry_documents::collection.eq(&row.collection))
            .filter(registry_documents::document_key.eq(&row.document_key)),
    )
    .set(registry_documents::document.eq(&row.document))
    .execute(conn)?;
    Ok(UpsertAck::replaced())
}
