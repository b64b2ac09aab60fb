//! Tests for suppression persistence and its effect on classification

use std::collections::HashSet;
use std::fs;

use boardsync::suppress::{SuppressScope, SuppressionStore};
use boardsync::sync::classify;
use boardsync::sync::mapping::all_columns;
use tempfile::TempDir;

use super::common::task;

#[test]
fn permanent_entries_round_trip_through_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("suppressed.json");

    {
        let store = SuppressionStore::load(&path);
        store.suppress("S1", SuppressScope::Permanent).unwrap();
        store.suppress("S2", SuppressScope::Permanent).unwrap();
        store.suppress("S3", SuppressScope::Temporary).unwrap();
    }

    // the file holds only the permanent ids, as a sorted array
    let contents = fs::read_to_string(&path).unwrap();
    let ids: Vec<String> = serde_json::from_str(&contents).unwrap();
    assert_eq!(ids, vec!["S1".to_string(), "S2".to_string()]);

    let reloaded = SuppressionStore::load(&path);
    assert!(reloaded.is_suppressed("S1"));
    assert!(reloaded.is_suppressed("S2"));
    assert!(!reloaded.is_suppressed("S3"));
}

#[test]
fn removal_is_persisted_immediately() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("suppressed.json");

    let store = SuppressionStore::load(&path);
    store.suppress("S1", SuppressScope::Permanent).unwrap();
    store.suppress("S2", SuppressScope::Permanent).unwrap();
    assert!(store.unsuppress("S1").unwrap());

    let reloaded = SuppressionStore::load(&path);
    assert!(!reloaded.is_suppressed("S1"));
    assert!(reloaded.is_suppressed("S2"));
}

#[test]
fn reloaded_suppressions_still_exclude_tasks_from_sync() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("suppressed.json");

    {
        let store = SuppressionStore::load(&path);
        store.suppress("S1", SuppressScope::Permanent).unwrap();
    }

    let store = SuppressionStore::load(&path);
    let tasks = vec![
        task("S1", "muted forever", "Backlog", &[]),
        task("S2", "live", "Backlog", &[]),
    ];
    let analysis = classify(&tasks, &[], &all_columns(), &store.snapshot());
    assert_eq!(analysis.suppressed, vec!["S1".to_string()]);
    assert_eq!(analysis.missing_in_target.len(), 1);
    assert_eq!(analysis.missing_in_target[0].gid, "S2");
}

#[test]
fn temporary_scope_never_touches_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("suppressed.json");

    let store = SuppressionStore::load(&path);
    store.suppress("S1", SuppressScope::Temporary).unwrap();
    assert!(!path.exists());

    let snapshot: HashSet<String> = store.snapshot();
    assert!(snapshot.contains("S1"));
}
