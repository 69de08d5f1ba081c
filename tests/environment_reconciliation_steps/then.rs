//! Then steps for android world reconciliation BDD scenarios.

use super::world::{ReconciliationWorld, run_async};
use rstest_bdd_macros::then;
use world_registrar::environment::services::RegistrarError;

#[then(r#"the outcome is "{outcome}""#)]
fn outcome_is(world: &ReconciliationWorld, outcome: String) -> Result<(), eyre::Report> {
    let result = world.last_success()?;
    if result.outcome.as_str() != outcome {
        return Err(eyre::eyre!(
            "expected outcome '{outcome}', got '{}'",
            result.outcome
        ));
    }
    Ok(())
}

#[then("the adb port is {port:u16}")]
fn adb_port_is(world: &ReconciliationWorld, port: u16) -> Result<(), eyre::Report> {
    let adb = world.last_success()?.record.ports().adb().get();
    if adb != port {
        return Err(eyre::eyre!("expected adb port {port}, got {adb}"));
    }
    Ok(())
}

#[then(r#"the status is "{status}""#)]
fn status_is(world: &ReconciliationWorld, status: String) -> Result<(), eyre::Report> {
    let actual = world.last_success()?.record.status();
    if actual.as_str() != status {
        return Err(eyre::eyre!("expected status '{status}', got '{actual}'"));
    }
    Ok(())
}

#[then("the registry holds {count:usize} worlds")]
fn registry_holds(world: &ReconciliationWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = world.stored_count()?;
    if stored != count {
        return Err(eyre::eyre!("expected {count} worlds, found {stored}"));
    }
    Ok(())
}

#[then(r#"the stored world "{id}" has status "{status}""#)]
fn stored_world_has_status(
    world: &ReconciliationWorld,
    id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let record = run_async(world.registrar.find_by_id(&id))
        .map_err(|err| eyre::eyre!("find_by_id failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("expected world '{id}' to exist"))?;
    if record.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected stored status '{status}', got '{}'",
            record.status()
        ));
    }
    Ok(())
}

#[then("reconciliation fails because the store is unavailable")]
fn fails_store_unavailable(world: &ReconciliationWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(RegistrarError::StoreUnavailable(_))) => Ok(()),
        other => Err(eyre::eyre!("expected store unavailable error, got {other:?}")),
    }
}

#[then("reconciliation fails with invalid input")]
fn fails_invalid_input(world: &ReconciliationWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(RegistrarError::InvalidInput(_))) => Ok(()),
        other => Err(eyre::eyre!("expected invalid input error, got {other:?}")),
    }
}
