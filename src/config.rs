//! Registrar configuration.
//!
//! Configuration is an explicit value handed to the registrar at
//! construction. It can be loaded from environment variables with defaults
//! matching the existing deployment.

use crate::environment::domain::{EnvironmentDomainError, IdLength, Port, ProvisioningTemplate};
use crate::environment::ports::CollectionName;
use std::time::Duration;
use thiserror::Error;

/// Description recorded when the caller does not supply one.
pub const DEFAULT_DESCRIPTION: &str = "Android environment registered by script";

/// Deadline applied to the store round-trip by the binary.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an [`EnvironmentRegistrar`](crate::environment::services::EnvironmentRegistrar).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrarConfig {
    /// Host recorded when the caller does not supply one.
    pub default_host: String,
    /// Control port used when the caller does not supply one.
    pub base_port: Port,
    /// Collection world records are stored in.
    pub collection: CollectionName,
    /// Length of generated world identifiers.
    pub id_length: IdLength,
    /// Description recorded when the caller does not supply one.
    pub default_description: String,
    /// Container runtime template shared by every world.
    pub provisioning: ProvisioningTemplate,
    /// Connection string of the document store, if configured.
    pub database_url: Option<String>,
    /// Deadline for one store round-trip.
    pub store_timeout: Duration,
}

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be used.
    #[error("invalid value for {key}: {source}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Validation failure.
        #[source]
        source: EnvironmentDomainError,
    },

    /// An environment variable holds a value that is not a number.
    #[error("{key} must be an integer, got '{value}'")]
    NotANumber {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },

    /// No document store connection string is configured.
    #[error("no database URL configured (set REGISTRAR_DATABASE_URL or DATABASE_URL)")]
    MissingDatabaseUrl,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            default_host: "localhost".to_owned(),
            base_port: Port::DEFAULT_BASE,
            collection: CollectionName::default(),
            id_length: IdLength::default(),
            default_description: DEFAULT_DESCRIPTION.to_owned(),
            provisioning: ProvisioningTemplate::default(),
            database_url: None,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

impl RegistrarConfig {
    /// Loads configuration from process environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `REGISTRAR_DATABASE_URL` (or `DATABASE_URL`) | unset |
    /// | `REGISTRAR_HOST` | `localhost` |
    /// | `REGISTRAR_BASE_PORT` | `5000` |
    /// | `REGISTRAR_COLLECTION` | `worlds_android` |
    /// | `REGISTRAR_ID_LENGTH` | `8` |
    /// | `REGISTRAR_VOLUMES` | `/var/lib/android_world:/aw` |
    /// | `REGISTRAR_PROXY` | `http://host.docker.internal:7897` |
    /// | `REGISTRAR_TIMEOUT_SECS` | `30` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        config.database_url = get("REGISTRAR_DATABASE_URL").or_else(|| get("DATABASE_URL"));

        if let Some(host) = get("REGISTRAR_HOST") {
            config.default_host = host.trim().to_owned();
        }

        if let Some(raw) = get("REGISTRAR_BASE_PORT") {
            config.base_port = Port::parse(&raw).map_err(|source| ConfigError::InvalidValue {
                key: "REGISTRAR_BASE_PORT",
                source,
            })?;
        }

        if let Some(collection) = get("REGISTRAR_COLLECTION") {
            config.collection = CollectionName::new(collection.trim());
        }

        if let Some(raw) = get("REGISTRAR_ID_LENGTH") {
            let length = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::NotANumber {
                    key: "REGISTRAR_ID_LENGTH",
                    value: raw.clone(),
                })?;
            config.id_length = IdLength::new(length).map_err(|source| {
                ConfigError::InvalidValue {
                    key: "REGISTRAR_ID_LENGTH",
                    source,
                }
            })?;
        }

        if let Some(raw) = get("REGISTRAR_TIMEOUT_SECS") {
            let seconds = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::NotANumber {
                    key: "REGISTRAR_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
            config.store_timeout = Duration::from_secs(seconds);
        }

        if let Some(raw) = get("REGISTRAR_VOLUMES") {
            config.provisioning.volumes = raw
                .split(',')
                .map(str::trim)
                .filter(|volume| !volume.is_empty())
                .map(str::to_owned)
                .collect();
        }

        if let Some(proxy) = get("REGISTRAR_PROXY") {
            config.provisioning.environment = ProvisioningTemplate::proxy_environment(proxy.trim());
        }

        Ok(config)
    }

    /// Returns the configured database URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when none is configured.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)
    }
}
