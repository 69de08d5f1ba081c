//! Concurrent reconciliation against the in-memory store.

use super::helpers::{Harness, harness};
use rstest::rstest;
use std::sync::Arc;
use world_registrar::environment::{
    ports::CollectionName,
    services::{ReconcileOutcome, ReconcileRequest, ReconcileResult, RegistrarError},
};

const TASKS: usize = 16;

async fn reconcile_all(
    harness: &Harness,
    requests: Vec<ReconcileRequest>,
) -> Vec<Result<ReconcileResult, RegistrarError>> {
    let handles: Vec<_> = requests
        .into_iter()
        .map(|request| {
            let registrar = Arc::clone(&harness.registrar);
            tokio::spawn(async move { registrar.reconcile(request).await })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.expect("task should not panic"));
    }
    results
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn distinct_ids_are_all_created(harness: Harness) {
    let requests = (0..TASKS)
        .map(|index| ReconcileRequest::new().with_id(format!("world-{index}")))
        .collect();

    let results = reconcile_all(&harness, requests).await;

    assert!(results.iter().all(|result| matches!(
        result,
        Ok(ReconcileResult {
            outcome: ReconcileOutcome::Created,
            ..
        })
    )));
    assert_eq!(
        harness
            .store
            .len(&CollectionName::default())
            .expect("len should succeed"),
        TASKS
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn shared_id_is_created_exactly_once(harness: Harness) {
    let requests = (0..TASKS)
        .map(|_| ReconcileRequest::new().with_id("shared"))
        .collect();

    let results = reconcile_all(&harness, requests).await;

    let outcomes: Vec<ReconcileOutcome> = results
        .into_iter()
        .map(|result| result.expect("reconcile should succeed").outcome)
        .collect();
    let created = outcomes
        .iter()
        .filter(|outcome| **outcome == ReconcileOutcome::Created)
        .count();
    assert_eq!(created, 1);
    assert!(
        outcomes
            .iter()
            .all(|outcome| *outcome != ReconcileOutcome::Updated)
    );
    assert_eq!(
        harness
            .store
            .len(&CollectionName::default())
            .expect("len should succeed"),
        1
    );
}
