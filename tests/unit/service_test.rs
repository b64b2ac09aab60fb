//! Tests for the auto-sync controller lifecycle
//!
//! Runs a real service against a mock board and tracker so passes take a
//! known amount of time, then exercises start/stop transitions, including a
//! restart while a pass is still in flight.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use boardsync::service::SyncService;
use httpmock::prelude::*;
use tempfile::TempDir;

use super::common::test_config;

/// Service whose source and target both answer empty snapshots, with the
/// source responding after `pass_delay` so a pass is observably in flight.
fn mock_service(server: &MockServer, pass_delay: Duration) -> (Arc<SyncService>, TempDir) {
    server.mock(|when, then| {
        when.method(GET).path("/projects/1200000000000001/tasks");
        then.status(200)
            .delay(pass_delay)
            .json_body(serde_json::json!({"data": []}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/issues");
        then.status(200).json_body(serde_json::json!([]));
    });

    let dir = TempDir::new().unwrap();
    let mut config = test_config();
    config.source_base_url = server.base_url();
    config.target_base_url = server.base_url();
    config.poll_interval_secs = 1;
    config.suppression_file = dir.path().join("suppressed.json");
    (SyncService::new(config).unwrap(), dir)
}

#[test]
fn start_and_stop_report_transitions() {
    let server = MockServer::start();
    let (service, _dir) = mock_service(&server, Duration::ZERO);

    assert!(service.start_auto_sync());
    assert!(!service.start_auto_sync());
    assert!(service.stop_auto_sync());
    assert!(!service.stop_auto_sync());
    assert!(!service.auto_sync_status().running);
}

#[test]
fn restart_during_a_pass_leaves_a_single_loop() {
    let server = MockServer::start();
    let (service, _dir) = mock_service(&server, Duration::from_millis(700));

    // stop and restart while the first pass is still in flight; the first
    // loop must not survive alongside the new one
    assert!(service.start_auto_sync());
    thread::sleep(Duration::from_millis(300));
    assert!(service.stop_auto_sync());
    assert!(service.start_auto_sync());

    thread::sleep(Duration::from_millis(3500));
    assert!(service.stop_auto_sync());

    // with one loop at a 1s interval and ~0.7s passes, at most four passes
    // fit in the window; a leftover loop roughly doubles the count
    let status = service.auto_sync_status();
    assert!(!status.running);
    assert!(status.run_count >= 1);
    assert!(
        status.run_count <= 4,
        "expected a single auto-sync loop, run_count = {}",
        status.run_count
    );
}
