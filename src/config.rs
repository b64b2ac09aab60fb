//! Service configuration
//!
//! Layered load: built-in defaults, then an optional `boardsync.toml`, then
//! `BOARDSYNC_*` environment variables. Connection parameters for both systems
//! are required; validation failure is fatal at startup.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "boardsync.toml";

const fn default_port() -> u16 {
    8080
}

const fn default_poll_interval() -> u64 {
    60
}

fn default_source_base_url() -> String {
    "https://app.asana.com/api/1.0".to_string()
}

fn default_suppression_file() -> PathBuf {
    PathBuf::from("suppressed_tasks.json")
}

/// Sync service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Port the HTTP service listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the source board API
    #[serde(default = "default_source_base_url")]
    pub source_base_url: String,

    /// Personal access token for the source board
    #[serde(default)]
    pub source_token: String,

    /// Source project id whose tasks are synced
    #[serde(default)]
    pub source_project: String,

    /// Base URL of the target tracker API
    #[serde(default)]
    pub target_base_url: String,

    /// Permanent token for the target tracker
    #[serde(default)]
    pub target_token: String,

    /// Target project key issues are created in
    #[serde(default)]
    pub target_project: String,

    /// Auto-sync polling interval in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Path of the persisted permanent suppression list
    #[serde(default = "default_suppression_file")]
    pub suppression_file: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            source_base_url: default_source_base_url(),
            source_token: String::new(),
            source_project: String::new(),
            target_base_url: String::new(),
            target_token: String::new(),
            target_project: String::new(),
            poll_interval_secs: default_poll_interval(),
            suppression_file: default_suppression_file(),
        }
    }
}

impl SyncConfig {
    /// Load configuration: file (if present) + environment overrides, validated
    pub fn load(path: Option<&Path>) -> Result<Self, SyncError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            },
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file, failing loudly on unreadable or invalid TOML
    pub fn from_file(path: &Path) -> Result<Self, SyncError> {
        let content = fs::read_to_string(path)
            .map_err(|e| SyncError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| SyncError::Config(format!("invalid config {}: {e}", path.display())))
    }

    /// Apply `BOARDSYNC_*` environment variable overrides
    pub fn apply_env(&mut self) {
        if let Some(port) = env_var("BOARDSYNC_PORT").and_then(|v| v.parse().ok()) {
            self.port = port;
        }
        if let Some(v) = env_var("BOARDSYNC_SOURCE_BASE_URL") {
            self.source_base_url = v;
        }
        if let Some(v) = env_var("BOARDSYNC_SOURCE_TOKEN") {
            self.source_token = v;
        }
        if let Some(v) = env_var("BOARDSYNC_SOURCE_PROJECT") {
            self.source_project = v;
        }
        if let Some(v) = env_var("BOARDSYNC_TARGET_BASE_URL") {
            self.target_base_url = v;
        }
        if let Some(v) = env_var("BOARDSYNC_TARGET_TOKEN") {
            self.target_token = v;
        }
        if let Some(v) = env_var("BOARDSYNC_TARGET_PROJECT") {
            self.target_project = v;
        }
        if let Some(secs) = env_var("BOARDSYNC_POLL_INTERVAL_SECS").and_then(|v| v.parse().ok()) {
            self.poll_interval_secs = secs;
        }
        if let Some(v) = env_var("BOARDSYNC_SUPPRESSION_FILE") {
            self.suppression_file = PathBuf::from(v);
        }
    }

    /// Verify all required connection parameters are present
    pub fn validate(&self) -> Result<(), SyncError> {
        let mut missing = Vec::new();
        if self.source_token.is_empty() {
            missing.push("source_token");
        }
        if self.source_project.is_empty() {
            missing.push("source_project");
        }
        if self.target_base_url.is_empty() {
            missing.push("target_base_url");
        }
        if self.target_token.is_empty() {
            missing.push("target_token");
        }
        if self.target_project.is_empty() {
            missing.push("target_project");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SyncError::Config(format!(
                "missing required settings: {}",
                missing.join(", ")
            )))
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
