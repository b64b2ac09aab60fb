//! Source board task model

use serde::{Deserialize, Serialize};

/// A task on the source planning board
///
/// `section` is the free-text board column the task sits in; it drives the
/// category rule cascade. `tags` feed the subsystem mapping and are write-only
/// toward the target (never read back for sync decisions).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceTask {
    /// Source-assigned unique id
    pub gid: String,

    /// Task title
    pub name: String,

    /// Free-text description
    #[serde(default)]
    pub notes: String,

    /// Board column name (may be empty when the task has no section)
    #[serde(default)]
    pub section: String,

    /// Free-text labels attached to the task
    #[serde(default)]
    pub tags: Vec<String>,

    /// Creation timestamp (RFC3339, as reported by the source)
    #[serde(default)]
    pub created_at: String,

    /// Last-modified timestamp (RFC3339, as reported by the source)
    #[serde(default)]
    pub modified_at: String,
}

impl SourceTask {
    /// Minimal constructor used by tests and fixtures
    #[must_use]
    pub fn new(gid: impl Into<String>, name: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            gid: gid.into(),
            name: name.into(),
            section: section.into(),
            ..Self::default()
        }
    }
}
