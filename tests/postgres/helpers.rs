//! Shared test helpers for `PostgreSQL` integration tests.

use chrono::{DateTime, Local, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::Clock;
use rstest::fixture;
use std::sync::OnceLock;
use std::time::Duration;
use uuid::Uuid;
use world_registrar::environment::{
    adapters::postgres::PostgresDocumentStore, ports::CollectionName,
};

/// Boxed error type for helper results.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SQL to create the document table.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_registry_documents/up.sql");

/// Variable naming the database live tests run against.
pub const DATABASE_URL_VAR: &str = "REGISTRAR_TEST_DATABASE_URL";

/// Checkout timeout for test pools.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

static MIGRATED: OnceLock<Result<(), String>> = OnceLock::new();

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Provides a clock frozen at the Unix epoch.
#[fixture]
pub fn clock() -> FixedClock {
    FixedClock(DateTime::UNIX_EPOCH)
}

/// Migrated database that live tests share.
#[derive(Debug, Clone)]
pub struct LiveDatabase {
    url: String,
}

impl LiveDatabase {
    /// Opens a store with its own single-connection pool.
    #[must_use]
    pub fn store(&self) -> PostgresDocumentStore {
        PostgresDocumentStore::connect_lazy(&self.url, CONNECT_TIMEOUT)
    }
}

/// Provides the live database, or `None` when none is configured.
///
/// The schema is applied once per test process.
#[fixture]
pub fn live_database() -> Option<LiveDatabase> {
    let url = std::env::var(DATABASE_URL_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())?;
    let migrated = MIGRATED.get_or_init(|| apply_migrations(&url).map_err(|err| err.to_string()));
    if let Err(err) = migrated {
        panic!("schema migration failed for {DATABASE_URL_VAR}: {err}");
    }
    Some(LiveDatabase { url })
}

/// Returns a collection name no other test uses.
#[must_use]
pub fn unique_collection() -> CollectionName {
    CollectionName::new(format!("test_{}", Uuid::new_v4().simple()))
}

fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::establish(url).map_err(|err| Box::new(err) as BoxError)?;
    conn.batch_execute(CREATE_SCHEMA_SQL)
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok(())
}
