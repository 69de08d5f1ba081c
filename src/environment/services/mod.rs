//! Application services for world registration.

mod registrar;

pub use registrar::{
    EnvironmentRegistrar, ReconcileOutcome, ReconcileRequest, ReconcileResult, RegistrarError,
    RegistrarResult,
};
