//! Registers or refreshes one android world record.
//!
//! Usage:
//!
//! ```text
//! create-android-world [--host <host>] [--port <port>] [--adb-port <port>]
//!     [--container-name <name>] [--name <name>] [--description <text>]
//!     [--uuid <id>] [--for-annotation true|false] [--status <status>]
//!     [--image <ref>]
//! ```
//!
//! The container itself is started by external tooling; this binary only
//! records what that tooling needs. On success the world id is printed on
//! the first line of stdout, followed by a summary, and the process exits
//! with status 0. Any failure is logged to stderr and exits with status 1.
//! The document store is selected with `REGISTRAR_DATABASE_URL`; see
//! [`RegistrarConfig::from_env`] for the remaining variables.

use mockable::DefaultClock;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::runtime::Builder;
use tracing::{error, info};
use world_registrar::{
    cli::{self, CliArgs},
    config::RegistrarConfig,
    environment::{adapters::postgres::PostgresDocumentStore, services::EnvironmentRegistrar},
    telemetry,
};

/// Boxed error type for the run result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> ExitCode {
    telemetry::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "android world registration failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), BoxError> {
    let CliArgs { request, image } = cli::parse_args(
        std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned()),
    )?;
    let config = RegistrarConfig::from_env()?;
    let timeout = config.store_timeout;
    let store = PostgresDocumentStore::connect_lazy(config.require_database_url()?, timeout);
    info!(?request, collection = %config.collection, "registering android world");

    let runtime = Builder::new_current_thread().enable_all().build()?;
    let registrar = EnvironmentRegistrar::new(Arc::new(store), Arc::new(DefaultClock), config);
    let result = runtime.block_on(registrar.reconcile_within(request, timeout))?;

    let summary = cli::render_summary(&result, image.as_deref());
    writeln!(std::io::stdout().lock(), "{summary}")?;
    Ok(())
}
