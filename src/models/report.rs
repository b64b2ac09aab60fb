//! Batch action reporting
//!
//! Bulk create/sync runs process items sequentially; each item's outcome is
//! recorded independently so one failure never hides the rest of the batch.

use serde::Serialize;

/// Outcome of a single create/update/ignore action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// Issue created in the target tracker
    Created,
    /// Issue updated to match the source state
    Synced,
    /// Skipped (an issue with the same title already exists)
    Skipped,
    /// The individual action failed
    Failed,
    /// Task suppressed for the process lifetime
    IgnoredTemporarily,
    /// Task suppressed durably
    IgnoredPermanently,
}

/// Per-item record in a batch report
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    /// Source task id the action applied to
    pub task_id: String,
    /// Task title, for display
    pub task_name: String,
    /// What happened
    pub status: ActionStatus,
    /// Failure or skip reason, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ActionOutcome {
    /// Record an outcome without detail
    #[must_use]
    pub fn new(task_id: impl Into<String>, task_name: impl Into<String>, status: ActionStatus) -> Self {
        Self {
            task_id: task_id.into(),
            task_name: task_name.into(),
            status,
            detail: None,
        }
    }

    /// Record an outcome with a reason
    #[must_use]
    pub fn with_detail(
        task_id: impl Into<String>,
        task_name: impl Into<String>,
        status: ActionStatus,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            task_name: task_name.into(),
            status,
            detail: Some(detail.into()),
        }
    }
}

/// Aggregate report for a sequential batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActionReport {
    /// Per-item outcomes, in processing order
    pub outcomes: Vec<ActionOutcome>,
}

impl ActionReport {
    /// Append an outcome
    pub fn push(&mut self, outcome: ActionOutcome) {
        self.outcomes.push(outcome);
    }

    /// Count outcomes with the given status
    #[must_use]
    pub fn count(&self, status: ActionStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Total number of processed items
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}
