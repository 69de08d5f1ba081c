//! Service layer for world reconciliation.
//!
//! Provides [`EnvironmentRegistrar`], which resolves a partial request into a
//! complete world record and upserts it by id.

use crate::config::RegistrarConfig;
use crate::environment::{
    domain::{
        EnvironmentDomainError, EnvironmentId, EnvironmentKind, EnvironmentRecord,
        EnvironmentRecordParts, EnvironmentStatus, Port, PortAssignment,
    },
    ports::{DocumentStore, StoreError, UpsertAck},
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for reconciling a world record.
///
/// Every field is optional; unset fields take their defaults from the
/// registrar configuration or are derived from other fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileRequest {
    host: Option<String>,
    control_port: Option<u16>,
    adb_port: Option<u16>,
    container_name: Option<String>,
    display_name: Option<String>,
    description: Option<String>,
    id: Option<String>,
    for_annotation: bool,
    status: Option<String>,
}

impl ReconcileRequest {
    /// Creates a request with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host the published ports live on.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the host control port.
    #[must_use]
    pub const fn with_control_port(mut self, port: u16) -> Self {
        self.control_port = Some(port);
        self
    }

    /// Sets the host adb port, overriding the derived default.
    ///
    /// Port `0` counts as unset, so the adb port is still derived.
    #[must_use]
    pub const fn with_adb_port(mut self, port: u16) -> Self {
        self.adb_port = Some(port);
        self
    }

    /// Sets the container name.
    #[must_use]
    pub fn with_container_name(mut self, name: impl Into<String>) -> Self {
        self.container_name = Some(name.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the world identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Marks the world as reserved for annotation work.
    #[must_use]
    pub const fn with_for_annotation(mut self, for_annotation: bool) -> Self {
        self.for_annotation = for_annotation;
        self
    }

    /// Sets the reported lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// How an upsert changed the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReconcileOutcome {
    /// No record existed for the id; one was inserted.
    Created,
    /// A record existed and was replaced with a different document.
    Updated,
    /// A record existed and already matched the replacement.
    Unchanged,
}

impl ReconcileOutcome {
    /// Classifies a store acknowledgement.
    #[must_use]
    pub const fn from_ack(ack: UpsertAck) -> Self {
        if ack.inserted {
            Self::Created
        } else if ack.modified {
            Self::Updated
        } else {
            Self::Unchanged
        }
    }

    /// Returns the lowercase outcome name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a committed reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileResult {
    /// Identifier of the reconciled world.
    pub id: EnvironmentId,
    /// How the stored record changed.
    pub outcome: ReconcileOutcome,
    /// The record as written.
    pub record: EnvironmentRecord,
}

/// Service-level errors for world reconciliation.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// Request validation failed before any document was built.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] EnvironmentDomainError),

    /// The document store could not be reached.
    #[error(transparent)]
    StoreUnavailable(StoreError),

    /// The upsert itself failed.
    #[error(transparent)]
    WriteFailed(StoreError),

    /// The store did not answer within the caller's deadline. Whether the
    /// write committed is unknown.
    #[error("document store did not respond within {0:?}")]
    DeadlineExceeded(Duration),

    /// A stored document could not be decoded into a world record.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),
}

impl From<StoreError> for RegistrarError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) => Self::StoreUnavailable(err),
            StoreError::Write(_) | StoreError::Serialization(_) => Self::WriteFailed(err),
        }
    }
}

/// Result type for registrar operations.
pub type RegistrarResult<T> = Result<T, RegistrarError>;

/// World reconciliation service.
#[derive(Clone)]
pub struct EnvironmentRegistrar<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    config: RegistrarConfig,
}

impl<S, C> EnvironmentRegistrar<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    /// Creates a new registrar.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>, config: RegistrarConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Returns the registrar configuration.
    #[must_use]
    pub const fn config(&self) -> &RegistrarConfig {
        &self.config
    }

    /// Resolves `request` into a full world record and upserts it by id.
    ///
    /// A record already stored under the same id is replaced as a whole,
    /// including its creation timestamp; fields the request leaves unset
    /// revert to their defaults rather than keeping stored values.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::InvalidInput`] when the request fails
    /// validation, [`RegistrarError::StoreUnavailable`] when the store cannot
    /// be reached, or [`RegistrarError::WriteFailed`] when the upsert fails.
    /// No record is committed in any of these cases.
    pub async fn reconcile(&self, request: ReconcileRequest) -> RegistrarResult<ReconcileResult> {
        let record = self.resolve(request)?;
        let document = serde_json::to_value(&record).map_err(StoreError::serialization)?;

        let ack = self
            .store
            .upsert_by_key(&self.config.collection, record.id().as_str(), &document)
            .await
            .inspect_err(|err| {
                warn!(id = %record.id(), error = %err, "environment record upsert failed");
            })?;

        let outcome = ReconcileOutcome::from_ack(ack);
        info!(
            id = %record.id(),
            outcome = %outcome,
            name = record.display_name(),
            host = record.host(),
            control_port = record.control_port().get(),
            adb_port = record.ports().adb().get(),
            container_name = record.provisioning().container_name(),
            status = %record.status(),
            "environment record reconciled"
        );

        Ok(ReconcileResult {
            id: record.id().clone(),
            outcome,
            record,
        })
    }

    /// Runs [`reconcile`](Self::reconcile), giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::DeadlineExceeded`] when the deadline passes
    /// first, otherwise the errors of [`reconcile`](Self::reconcile).
    pub async fn reconcile_within(
        &self,
        request: ReconcileRequest,
        timeout: Duration,
    ) -> RegistrarResult<ReconcileResult> {
        tokio::time::timeout(timeout, self.reconcile(request))
            .await
            .map_err(|_| RegistrarError::DeadlineExceeded(timeout))?
    }

    /// Finds a stored world record by id.
    ///
    /// Returns `Ok(None)` when no record has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::InvalidInput`] for a malformed id, the store
    /// errors of [`reconcile`](Self::reconcile), or
    /// [`RegistrarError::InvalidPersistedData`] when the stored document does
    /// not decode.
    pub async fn find_by_id(&self, id: &str) -> RegistrarResult<Option<EnvironmentRecord>> {
        let environment_id = EnvironmentId::new(id)?;
        let document = self
            .store
            .find_by_key(&self.config.collection, environment_id.as_str())
            .await?;
        document
            .map(|value| {
                serde_json::from_value(value)
                    .map_err(|err| RegistrarError::InvalidPersistedData(Arc::new(err)))
            })
            .transpose()
    }

    /// Fills defaults and derives dependent fields.
    fn resolve(
        &self,
        request: ReconcileRequest,
    ) -> Result<EnvironmentRecord, EnvironmentDomainError> {
        let ReconcileRequest {
            host,
            control_port,
            adb_port,
            container_name,
            display_name,
            description,
            id,
            for_annotation,
            status,
        } = request;
        let kind = EnvironmentKind::Android;

        let resolved_host = match host {
            Some(value) => value.trim().to_owned(),
            None => self.config.default_host.clone(),
        };
        if resolved_host.is_empty() {
            return Err(EnvironmentDomainError::EmptyHost);
        }

        let control = control_port
            .map(Port::new)
            .transpose()?
            .unwrap_or(self.config.base_port);
        let adb = adb_port
            .filter(|port| *port != 0)
            .map(Port::new)
            .transpose()?;
        let ports = PortAssignment::resolve(control, adb)?;

        let resolved_status = non_blank(status)
            .map(EnvironmentStatus::from)
            .unwrap_or_default();

        let resolved_id = match non_blank(id) {
            Some(value) => EnvironmentId::new(value)?,
            None => EnvironmentId::generate(self.config.id_length),
        };
        let resolved_container_name =
            non_blank(container_name).unwrap_or_else(|| format!("{kind}-{resolved_id}"));
        let resolved_display_name = non_blank(display_name)
            .unwrap_or_else(|| format!("{kind}-{}", self.clock.utc().timestamp_millis()));
        let resolved_description =
            non_blank(description).unwrap_or_else(|| self.config.default_description.clone());

        debug!(
            id = %resolved_id,
            control_port = ports.control().get(),
            adb_port = ports.adb().get(),
            "resolved environment request"
        );

        let provisioning = self
            .config
            .provisioning
            .instantiate(resolved_container_name, ports);
        let parts = EnvironmentRecordParts {
            id: resolved_id,
            display_name: resolved_display_name,
            kind,
            description: resolved_description,
            host: resolved_host,
            ports,
            status: resolved_status,
            reserved_for_annotation: for_annotation,
            provisioning,
        };
        Ok(EnvironmentRecord::new(parts, &*self.clock))
    }
}

/// Treats blank optional strings as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.trim().is_empty())
}
