//! Classification result model
//!
//! `BoardAnalysis` is the structured output of one reconciliation pass. Every
//! in-scope source task lands in exactly one bucket; target issues with a
//! correlation key but no in-scope counterpart are reported as orphaned.

use serde::Serialize;

use super::source::SourceTask;
use super::target::TargetIssue;

/// A source task whose linked issue carries the same state
#[derive(Debug, Clone, Serialize)]
pub struct MatchedPair {
    /// The source task
    pub task: SourceTask,
    /// The linked target issue
    pub issue: TargetIssue,
    /// The shared canonical state
    pub state: String,
    /// Whether the task's tags disagree with the issue's subsystem
    pub tag_mismatch: bool,
}

/// A source task whose linked issue carries a different state
#[derive(Debug, Clone, Serialize)]
pub struct MismatchedPair {
    /// The source task
    pub task: SourceTask,
    /// The linked target issue
    pub issue: TargetIssue,
    /// Canonical state derived from the task's board column
    pub source_state: String,
    /// State extracted from the target issue
    pub target_state: String,
    /// Whether the task's tags disagree with the issue's subsystem
    pub tag_mismatch: bool,
}

/// A task in a blocked column (triage bucket, state never compared)
#[derive(Debug, Clone, Serialize)]
pub struct BlockedItem {
    /// The source task
    pub task: SourceTask,
    /// The linked target issue, when one exists
    pub issue: Option<TargetIssue>,
}

/// A contradiction: the task reached findings but its issue is still active
#[derive(Debug, Clone, Serialize)]
pub struct FindingsAlert {
    /// The source task in the findings column
    pub task: SourceTask,
    /// The still-active target issue
    pub issue: TargetIssue,
    /// The active state the issue was found in
    pub target_state: String,
    /// Rendered alert message
    pub message: String,
}

/// Bucketed result of one reconciliation pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardAnalysis {
    /// The column filter the pass ran with
    pub selected_columns: Vec<String>,
    /// Linked pairs with equal states
    pub matched: Vec<MatchedPair>,
    /// Linked pairs with diverging states
    pub mismatched: Vec<MismatchedPair>,
    /// In-scope tasks with no linked target issue
    pub missing_in_target: Vec<SourceTask>,
    /// Display-only: tasks in a findings column
    pub findings: Vec<SourceTask>,
    /// Findings tasks whose linked issue is still active
    pub findings_alerts: Vec<FindingsAlert>,
    /// Display-only: tasks in a ready-for-stage column
    pub ready_for_stage: Vec<SourceTask>,
    /// Tasks in a blocked column
    pub blocked: Vec<BlockedItem>,
    /// Linked target issues whose source task is not in scope
    pub orphaned_in_target: Vec<TargetIssue>,
    /// Suppressed task ids excluded from the sync buckets
    pub suppressed: Vec<String>,
}

/// Derived per-bucket counts for reporting
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnalysisSummary {
    /// Number of matched pairs
    pub matched: usize,
    /// Number of mismatched pairs
    pub mismatched: usize,
    /// Number of tasks missing in the target
    pub missing_in_target: usize,
    /// Number of findings tasks
    pub findings: usize,
    /// Number of findings alerts
    pub findings_alerts: usize,
    /// Number of ready-for-stage tasks
    pub ready_for_stage: usize,
    /// Number of blocked tasks
    pub blocked: usize,
    /// Number of orphaned target issues
    pub orphaned_in_target: usize,
    /// Number of suppressed ids
    pub suppressed: usize,
}

impl BoardAnalysis {
    /// Compute the per-bucket counts
    #[must_use]
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            matched: self.matched.len(),
            mismatched: self.mismatched.len(),
            missing_in_target: self.missing_in_target.len(),
            findings: self.findings.len(),
            findings_alerts: self.findings_alerts.len(),
            ready_for_stage: self.ready_for_stage.len(),
            blocked: self.blocked.len(),
            orphaned_in_target: self.orphaned_in_target.len(),
            suppressed: self.suppressed.len(),
        }
    }

    /// Total number of source tasks placed in a bucket
    #[must_use]
    pub fn bucketed_task_count(&self) -> usize {
        self.matched.len()
            + self.mismatched.len()
            + self.missing_in_target.len()
            + self.findings.len()
            + self.ready_for_stage.len()
            + self.blocked.len()
            + self.suppressed.len()
    }
}
