//! Tracing subscriber setup for registrar binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Directive applied when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVE: &str = "world_registrar=info";

/// Installs a formatting subscriber that writes to stderr.
///
/// Stdout is left for the resolved world id. Filtering follows `RUST_LOG`,
/// falling back to `world_registrar=info`. Calling this more than once is
/// harmless; later calls leave the first subscriber in place.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if let Err(err) = installed {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}
