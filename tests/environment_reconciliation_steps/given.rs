//! Given steps for android world reconciliation BDD scenarios.

use super::world::{ReconciliationWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use world_registrar::environment::services::ReconcileRequest;

#[given("an empty world registry")]
fn empty_registry(world: &ReconciliationWorld) -> Result<(), eyre::Report> {
    let count = world.stored_count()?;
    if count != 0 {
        return Err(eyre::eyre!("expected empty registry, found {count} worlds"));
    }
    Ok(())
}

#[given(r#"a world "{id}" has been registered"#)]
fn world_registered(world: &mut ReconciliationWorld, id: String) -> Result<(), eyre::Report> {
    run_async(world.registrar.reconcile(ReconcileRequest::new().with_id(id)))
        .wrap_err("register world for scenario")?;
    Ok(())
}

#[given("the document store is unreachable")]
fn store_unreachable(world: &ReconciliationWorld) -> Result<(), eyre::Report> {
    world
        .store
        .set_online(false)
        .map_err(|err| eyre::eyre!("take store offline: {err}"))
}
