//! In-memory integration tests for world reconciliation.

use super::helpers::{Harness, harness};
use rstest::rstest;
use world_registrar::{
    cli,
    environment::{
        domain::EnvironmentStatus,
        ports::CollectionName,
        services::{ReconcileOutcome, ReconcileRequest, RegistrarError},
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_then_refresh_then_change_status(harness: Harness) {
    let request = ReconcileRequest::new()
        .with_id("abc123")
        .with_control_port(5002);

    let created = harness
        .registrar
        .reconcile(request.clone())
        .await
        .expect("first reconcile should succeed");
    let refreshed = harness
        .registrar
        .reconcile(request.clone())
        .await
        .expect("second reconcile should succeed");
    let stopped = harness
        .registrar
        .reconcile(request.with_status("stopped"))
        .await
        .expect("third reconcile should succeed");

    assert_eq!(created.outcome, ReconcileOutcome::Created);
    assert_eq!(refreshed.outcome, ReconcileOutcome::Unchanged);
    assert_eq!(stopped.outcome, ReconcileOutcome::Updated);
    assert_eq!(stopped.record.ports().adb().get(), 5058);

    let stored = harness
        .registrar
        .find_by_id("abc123")
        .await
        .expect("lookup should succeed")
        .expect("record should exist");
    assert_eq!(stored.status(), &EnvironmentStatus::Stopped);
    assert_eq!(
        harness
            .store
            .len(&CollectionName::default())
            .expect("len should succeed"),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generated_ids_create_separate_records(harness: Harness) {
    let first = harness
        .registrar
        .reconcile(ReconcileRequest::new())
        .await
        .expect("first reconcile should succeed");
    let second = harness
        .registrar
        .reconcile(ReconcileRequest::new())
        .await
        .expect("second reconcile should succeed");

    assert_ne!(first.id, second.id);
    assert_eq!(second.outcome, ReconcileOutcome::Created);
    assert_eq!(
        harness
            .store
            .len(&CollectionName::default())
            .expect("len should succeed"),
        2
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outage_then_recovery(harness: Harness) {
    harness.store.set_online(false).expect("toggle should succeed");
    let failed = harness
        .registrar
        .reconcile(ReconcileRequest::new().with_id("abc123"))
        .await;
    assert!(matches!(failed, Err(RegistrarError::StoreUnavailable(_))));

    harness.store.set_online(true).expect("toggle should succeed");
    let created = harness
        .registrar
        .reconcile(ReconcileRequest::new().with_id("abc123"))
        .await
        .expect("reconcile should succeed once the store is back");
    assert_eq!(created.outcome, ReconcileOutcome::Created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn command_line_flow_prints_id_first(harness: Harness) {
    let args = cli::parse_args([
        "--uuid",
        "abc123",
        "--port",
        "5001",
        "--unknown",
        "ignored",
        "--image",
        "android-world:latest",
    ])
    .expect("arguments should parse");

    let result = harness
        .registrar
        .reconcile(args.request)
        .await
        .expect("reconcile should succeed");
    let summary = cli::render_summary(&result, args.image.as_deref());
    let lines: Vec<&str> = summary.lines().collect();

    assert_eq!(lines.first(), Some(&"abc123"));
    assert!(lines.contains(&"outcome: created"));
    assert!(lines.contains(&"control port: 5001 (container 5000)"));
    assert!(lines.contains(&"adb port: 5057 (container 5556)"));
    assert!(lines.contains(&"container: android-abc123"));
    assert!(
        lines
            .last()
            .is_some_and(|line| line.starts_with("docker run -d --name android-abc123"))
    );
}
