//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use serde::{Deserialize, Serialize};

use crate::models::{ActionOutcome, ActionReport, ActionStatus, AnalysisSummary, BoardAnalysis};
use crate::service::{AutoSyncStatus, SyncActionRequest};

use super::error::ApiErrorData;

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Query/body for an analysis pass
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// Columns to include; empty means every known column
    #[serde(default)]
    pub columns: Vec<String>,
}

/// Request body for creating a single issue
#[derive(Debug, Deserialize)]
pub struct CreateSingleRequest {
    /// Source task id to create the issue for
    pub task_id: String,
}

/// Request body for a sync batch
#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    /// Per-task decisions
    pub actions: Vec<SyncActionRequest>,
}

/// Request body for adding or removing a suppression
#[derive(Debug, Deserialize)]
pub struct IgnoreRequest {
    /// Source task id
    pub task_id: String,
    /// "temp" or "forever"; ignored on removal
    #[serde(default = "default_ignore_scope")]
    pub scope: String,
    /// Remove the suppression instead of adding one
    #[serde(default)]
    pub remove: bool,
}

fn default_ignore_scope() -> String {
    "temp".to_string()
}

/// Request body for the auto-sync controller
#[derive(Debug, Deserialize)]
pub struct AutoSyncRequest {
    /// "start" or "stop"
    pub action: String,
}

// =============================================================================
// RESPONSE DATA
// =============================================================================

/// Liveness data
#[derive(Debug, Serialize)]
pub struct HealthData {
    /// Always "ok" when the process is serving
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
}

/// Service status data
#[derive(Debug, Serialize)]
pub struct StatusData {
    /// Configured source project id
    pub source_project: String,
    /// Configured target project key
    pub target_project: String,
    /// Temporarily suppressed task ids
    pub ignored_temporarily: Vec<String>,
    /// Permanently suppressed task ids
    pub ignored_permanently: Vec<String>,
    /// Auto-sync controller snapshot
    pub auto_sync: AutoSyncStatus,
}

/// Result of an analysis pass
#[derive(Debug, Serialize)]
pub struct AnalysisData {
    /// Per-bucket counts
    pub summary: AnalysisSummary,
    /// The full bucketed analysis
    pub analysis: BoardAnalysis,
}

/// Result of a batch action run
#[derive(Debug, Serialize)]
pub struct ReportData {
    /// Items processed
    pub total: usize,
    /// Issues created
    pub created: usize,
    /// Issues updated
    pub synced: usize,
    /// Creations skipped on a duplicate title
    pub skipped: usize,
    /// Individual failures
    pub failed: usize,
    /// Suppressions recorded
    pub ignored: usize,
    /// Per-item outcomes
    pub outcomes: Vec<ActionOutcome>,
}

impl From<ActionReport> for ReportData {
    fn from(report: ActionReport) -> Self {
        Self {
            total: report.total(),
            created: report.count(ActionStatus::Created),
            synced: report.count(ActionStatus::Synced),
            skipped: report.count(ActionStatus::Skipped),
            failed: report.count(ActionStatus::Failed),
            ignored: report.count(ActionStatus::IgnoredTemporarily)
                + report.count(ActionStatus::IgnoredPermanently),
            outcomes: report.outcomes,
        }
    }
}

/// Result of a suppression mutation
#[derive(Debug, Serialize)]
pub struct IgnoreData {
    /// The task id the mutation applied to
    pub task_id: String,
    /// Whether anything changed
    pub changed: bool,
    /// Temporarily suppressed task ids after the mutation
    pub ignored_temporarily: Vec<String>,
    /// Permanently suppressed task ids after the mutation
    pub ignored_permanently: Vec<String>,
}

/// Result of an auto-sync control request
#[derive(Debug, Serialize)]
pub struct AutoSyncData {
    /// Whether the request changed the controller state
    pub changed: bool,
    /// Controller snapshot after the request
    pub status: AutoSyncStatus,
}
