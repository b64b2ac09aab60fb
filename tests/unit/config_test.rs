//! Tests for layered configuration loading

use std::fs;

use boardsync::config::SyncConfig;
use serial_test::serial;
use tempfile::TempDir;

const ENV_KEYS: &[&str] = &[
    "BOARDSYNC_PORT",
    "BOARDSYNC_SOURCE_BASE_URL",
    "BOARDSYNC_SOURCE_TOKEN",
    "BOARDSYNC_SOURCE_PROJECT",
    "BOARDSYNC_TARGET_BASE_URL",
    "BOARDSYNC_TARGET_TOKEN",
    "BOARDSYNC_TARGET_PROJECT",
    "BOARDSYNC_POLL_INTERVAL_SECS",
    "BOARDSYNC_SUPPRESSION_FILE",
];

fn clear_env() {
    for key in ENV_KEYS {
        // tests in this file run serially, so env mutation is safe
        unsafe { std::env::remove_var(key) };
    }
}

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("boardsync.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
#[serial]
fn file_values_override_defaults() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
            port = 9000
            source_token = "pat"
            source_project = "111"
            target_base_url = "https://tracker.example.com"
            target_token = "perm"
            target_project = "PRJ"
        "#,
    );

    let config = SyncConfig::load(Some(&path)).unwrap();
    assert_eq!(config.port, 9000);
    assert_eq!(config.source_base_url, "https://app.asana.com/api/1.0");
    assert_eq!(config.poll_interval_secs, 60);
}

#[test]
#[serial]
fn environment_overrides_file_values() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
            source_token = "file-pat"
            source_project = "111"
            target_base_url = "https://tracker.example.com"
            target_token = "perm"
            target_project = "PRJ"
        "#,
    );

    unsafe {
        std::env::set_var("BOARDSYNC_SOURCE_TOKEN", "env-pat");
        std::env::set_var("BOARDSYNC_PORT", "7070");
    }
    let config = SyncConfig::load(Some(&path)).unwrap();
    clear_env();

    assert_eq!(config.source_token, "env-pat");
    assert_eq!(config.port, 7070);
    assert_eq!(config.source_project, "111");
}

#[test]
#[serial]
fn missing_required_fields_fail_load() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "port = 8081\n");

    let err = SyncConfig::load(Some(&path)).unwrap_err().to_string();
    assert!(err.contains("source_token"));
    assert!(err.contains("target_base_url"));
}

#[test]
#[serial]
fn unreadable_or_invalid_file_is_fatal() {
    clear_env();
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("nope.toml");
    assert!(SyncConfig::load(Some(&missing)).is_err());

    let invalid = write_config(&dir, "port = \"not a number");
    assert!(SyncConfig::load(Some(&invalid)).is_err());
}
