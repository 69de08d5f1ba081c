//! When steps for android world reconciliation BDD scenarios.

use super::world::{ReconciliationWorld, run_async};
use rstest_bdd_macros::when;
use world_registrar::environment::services::ReconcileRequest;

#[when("a world is reconciled with control port {port:u16}")]
fn reconcile_with_control_port(world: &mut ReconciliationWorld, port: u16) {
    let request = ReconcileRequest::new().with_control_port(port);
    world.last_result = Some(run_async(world.registrar.reconcile(request)));
}

#[when(r#"the world "{id}" is reconciled again"#)]
fn reconcile_again(world: &mut ReconciliationWorld, id: String) {
    let request = ReconcileRequest::new().with_id(id);
    world.last_result = Some(run_async(world.registrar.reconcile(request)));
}

#[when(r#"the world "{id}" is reconciled with status "{status}""#)]
fn reconcile_with_status(world: &mut ReconciliationWorld, id: String, status: String) {
    let request = ReconcileRequest::new().with_id(id).with_status(status);
    world.last_result = Some(run_async(world.registrar.reconcile(request)));
}
