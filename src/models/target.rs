//! Target tracker issue model

use serde::{Deserialize, Serialize};

/// An issue in the target tracker
///
/// `description` carries the embedded correlation marker linking the issue
/// back to a source task. `state` and `subsystem` are already extracted from
/// the tracker's custom-field structure by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetIssue {
    /// Target-assigned id
    pub id: String,

    /// Issue title
    pub summary: String,

    /// Free-text body, including the correlation marker when linked
    #[serde(default)]
    pub description: String,

    /// Extracted state value ("Unknown" when the field is absent)
    #[serde(default)]
    pub state: String,

    /// Extracted subsystem value, when the tracker has the field configured
    #[serde(default)]
    pub subsystem: Option<String>,

    /// Short name of the project the issue belongs to
    #[serde(default)]
    pub project: String,
}

impl TargetIssue {
    /// Minimal constructor used by tests and fixtures
    #[must_use]
    pub fn new(id: impl Into<String>, summary: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            state: state.into(),
            ..Self::default()
        }
    }
}
