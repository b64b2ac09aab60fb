//! Sync service
//!
//! Owns the configuration, both clients and the suppression store, and
//! exposes the operations the HTTP surface and CLI share. Every operation
//! re-fetches both snapshots; nothing is cached between passes, so a pass is
//! always computed from fresh state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::client::{SourceClient, TargetClient};
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::models::{
    ActionOutcome, ActionReport, ActionStatus, BoardAnalysis, SourceTask, TargetIssue,
};
use crate::suppress::{SuppressScope, SuppressionStore};
use crate::sync::{classify, mapping};

/// What to do with one task in a sync batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    /// Update the linked issue to the task's state
    Sync,
    /// Suppress for the process lifetime
    IgnoreTemp,
    /// Suppress durably
    IgnoreForever,
}

/// One entry in a sync batch request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncActionRequest {
    /// Source task id the action applies to
    pub task_id: String,
    /// The requested action
    pub action: SyncAction,
}

/// Outcome counts of one automatic pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct AutoSyncSummary {
    /// Issues created
    pub created: usize,
    /// Issues updated
    pub synced: usize,
    /// Creations skipped on a duplicate title
    pub skipped: usize,
    /// Individual action failures
    pub failed: usize,
    /// Set when the pass could not even fetch its snapshots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Point-in-time view of the auto-sync controller
#[derive(Debug, Clone, Serialize)]
pub struct AutoSyncStatus {
    /// Whether the background loop is running
    pub running: bool,
    /// Interval between passes
    pub interval_secs: u64,
    /// Passes completed since the process started
    pub run_count: u64,
    /// When the most recent pass started (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run: Option<String>,
    /// When the next pass is due, while running (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_run: Option<String>,
    /// Counts from the most recent pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_summary: Option<AutoSyncSummary>,
}

#[derive(Debug, Default)]
struct AutoSyncState {
    run_count: u64,
    last_run: Option<DateTime<Utc>>,
    last_summary: Option<AutoSyncSummary>,
}

#[derive(Debug, Default)]
struct AutoSync {
    running: AtomicBool,
    // Bumped on every start; a loop holding an older value has been
    // superseded by a restart and must exit without touching the state.
    generation: AtomicU64,
    state: Mutex<AutoSyncState>,
}

impl AutoSync {
    fn is_current(&self, generation: u64) -> bool {
        self.running.load(Ordering::SeqCst)
            && self.generation.load(Ordering::SeqCst) == generation
    }
}

/// The one-directional board sync service
#[derive(Debug)]
pub struct SyncService {
    config: SyncConfig,
    source: SourceClient,
    target: TargetClient,
    suppression: SuppressionStore,
    autosync: AutoSync,
}

impl SyncService {
    /// Build the service from validated configuration
    pub fn new(config: SyncConfig) -> Result<Arc<Self>, SyncError> {
        let source = SourceClient::new(&config)
            .map_err(|e| SyncError::Config(format!("source client: {e}")))?;
        let target = TargetClient::new(&config)
            .map_err(|e| SyncError::Config(format!("target client: {e}")))?;
        let suppression = SuppressionStore::load(&config.suppression_file);
        Ok(Arc::new(Self {
            config,
            source,
            target,
            suppression,
            autosync: AutoSync::default(),
        }))
    }

    /// The configuration the service runs with
    #[must_use]
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// The suppression store, for status reporting and the ignore surface
    #[must_use]
    pub fn suppression(&self) -> &SuppressionStore {
        &self.suppression
    }

    fn snapshots(&self) -> Result<(Vec<SourceTask>, Vec<TargetIssue>), SyncError> {
        let tasks = self
            .source
            .fetch_tasks()
            .map_err(|e| SyncError::source_fetch(e.to_string()))?;
        let issues = self
            .target
            .fetch_issues()
            .map_err(|e| SyncError::target_fetch(e.to_string()))?;
        Ok((tasks, issues))
    }

    /// Run one classification pass over fresh snapshots
    ///
    /// An empty column list means every known column, syncable and
    /// display-only alike.
    pub fn analyze(&self, columns: &[String]) -> Result<BoardAnalysis, SyncError> {
        let columns = if columns.is_empty() {
            mapping::all_columns()
        } else {
            columns.to_vec()
        };
        let (tasks, issues) = self.snapshots()?;
        Ok(classify(&tasks, &issues, &columns, &self.suppression.snapshot()))
    }

    /// Create issues for every task missing in the target
    ///
    /// Sequential; each item gets its own outcome and a failure never halts
    /// the batch. The duplicate-title probe runs before each create.
    pub fn create_missing(&self) -> Result<ActionReport, SyncError> {
        let analysis = self.analyze(&[])?;
        let mut report = ActionReport::default();
        for task in &analysis.missing_in_target {
            report.push(self.create_one(task));
        }
        info!(
            "create pass: {} created, {} skipped, {} failed",
            report.count(ActionStatus::Created),
            report.count(ActionStatus::Skipped),
            report.count(ActionStatus::Failed)
        );
        Ok(report)
    }

    /// Create the issue for a single pending task
    pub fn create_single(&self, task_id: &str) -> Result<ActionOutcome, SyncError> {
        let analysis = self.analyze(&[])?;
        let task = analysis
            .missing_in_target
            .iter()
            .find(|t| t.gid == task_id)
            .ok_or_else(|| {
                SyncError::Action(format!("task {task_id} is not pending creation"))
            })?;
        Ok(self.create_one(task))
    }

    fn create_one(&self, task: &SourceTask) -> ActionOutcome {
        if self.target.exists_by_title(&task.name) {
            return ActionOutcome::with_detail(
                &task.gid,
                &task.name,
                ActionStatus::Skipped,
                "an issue with this title already exists",
            );
        }
        match self.target.create_issue(task) {
            Ok(()) => ActionOutcome::new(&task.gid, &task.name, ActionStatus::Created),
            Err(err) => {
                warn!("create failed for task {}: {err}", task.gid);
                ActionOutcome::with_detail(&task.gid, &task.name, ActionStatus::Failed, err.to_string())
            },
        }
    }

    /// Apply per-item sync/ignore decisions to mismatched pairs
    pub fn sync_mismatched(
        &self,
        requests: &[SyncActionRequest],
    ) -> Result<ActionReport, SyncError> {
        let analysis = self.analyze(&[])?;
        let mut report = ActionReport::default();
        for request in requests {
            report.push(self.apply_sync_action(&analysis, request));
        }
        Ok(report)
    }

    fn apply_sync_action(
        &self,
        analysis: &BoardAnalysis,
        request: &SyncActionRequest,
    ) -> ActionOutcome {
        let pair = analysis
            .mismatched
            .iter()
            .find(|p| p.task.gid == request.task_id);

        match request.action {
            SyncAction::Sync => {
                let Some(pair) = pair else {
                    return ActionOutcome::with_detail(
                        &request.task_id,
                        "",
                        ActionStatus::Failed,
                        "task is not in the mismatched set",
                    );
                };
                match self.target.update_issue(&pair.issue.id, &pair.task) {
                    Ok(()) => {
                        ActionOutcome::new(&pair.task.gid, &pair.task.name, ActionStatus::Synced)
                    },
                    Err(err) => {
                        warn!("sync failed for task {}: {err}", pair.task.gid);
                        ActionOutcome::with_detail(
                            &pair.task.gid,
                            &pair.task.name,
                            ActionStatus::Failed,
                            err.to_string(),
                        )
                    },
                }
            },
            SyncAction::IgnoreTemp | SyncAction::IgnoreForever => {
                let (scope, status) = if request.action == SyncAction::IgnoreTemp {
                    (SuppressScope::Temporary, ActionStatus::IgnoredTemporarily)
                } else {
                    (SuppressScope::Permanent, ActionStatus::IgnoredPermanently)
                };
                let name = pair.map(|p| p.task.name.clone()).unwrap_or_default();
                match self.suppression.suppress(&request.task_id, scope) {
                    Ok(()) => ActionOutcome::new(&request.task_id, name, status),
                    Err(err) => ActionOutcome::with_detail(
                        &request.task_id,
                        name,
                        ActionStatus::Failed,
                        err.to_string(),
                    ),
                }
            },
        }
    }

    /// Suppress a task id directly (ignore surface)
    pub fn ignore(&self, task_id: &str, scope: SuppressScope) -> Result<(), SyncError> {
        self.suppression
            .suppress(task_id, scope)
            .map_err(|e| SyncError::Action(e.to_string()))
    }

    /// Remove a suppression; returns whether anything changed
    pub fn unignore(&self, task_id: &str) -> Result<bool, SyncError> {
        self.suppression
            .unsuppress(task_id)
            .map_err(|e| SyncError::Action(e.to_string()))
    }

    /// Verify connectivity and resolve the configured target project
    pub fn check(&self) -> Result<String, SyncError> {
        let tasks = self
            .source
            .fetch_tasks()
            .map_err(|e| SyncError::source_fetch(e.to_string()))?;
        let project = self
            .target
            .verify_project()
            .map_err(|e| SyncError::target_fetch(e.to_string()))?;
        Ok(format!(
            "source project reachable ({} tasks); target project resolved as '{project}'",
            tasks.len()
        ))
    }

    /// Start the background auto-sync loop; `false` if already running
    pub fn start_auto_sync(self: &Arc<Self>) -> bool {
        if self.autosync.running.swap(true, Ordering::SeqCst) {
            return false;
        }
        let generation = self.autosync.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "auto-sync started, interval {}s",
            self.config.poll_interval_secs
        );
        let service = Arc::clone(self);
        thread::spawn(move || service.auto_sync_loop(generation));
        true
    }

    /// Stop the background loop; `false` if it was not running
    pub fn stop_auto_sync(&self) -> bool {
        let was_running = self.autosync.running.swap(false, Ordering::SeqCst);
        if was_running {
            info!("auto-sync stopping");
        }
        was_running
    }

    /// Snapshot of the auto-sync controller
    #[must_use]
    pub fn auto_sync_status(&self) -> AutoSyncStatus {
        let running = self.autosync.running.load(Ordering::SeqCst);
        let state = self
            .autosync
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let interval = self.config.poll_interval_secs;
        let next_run = if running {
            state
                .last_run
                .map(|t| {
                    let secs = i64::try_from(interval).unwrap_or(i64::MAX);
                    (t + chrono::Duration::seconds(secs)).to_rfc3339()
                })
        } else {
            None
        };
        AutoSyncStatus {
            running,
            interval_secs: interval,
            run_count: state.run_count,
            last_run: state.last_run.map(|t| t.to_rfc3339()),
            next_run,
            last_summary: state.last_summary.clone(),
        }
    }

    /// The loop only records passes and keeps iterating while its own
    /// generation is still the one that started it. A stop/start while a pass
    /// is in flight hands the controller to a new loop; the old one finds its
    /// generation stale when the pass returns and exits silently.
    fn auto_sync_loop(&self, generation: u64) {
        let interval = Duration::from_secs(self.config.poll_interval_secs);
        while self.autosync.is_current(generation) {
            let started = Utc::now();
            let summary = self.run_auto_pass();
            if self.autosync.generation.load(Ordering::SeqCst) != generation {
                break;
            }
            info!(
                "auto-sync pass: {} created, {} synced, {} skipped, {} failed",
                summary.created, summary.synced, summary.skipped, summary.failed
            );
            {
                let mut state = self
                    .autosync
                    .state
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                state.run_count += 1;
                state.last_run = Some(started);
                state.last_summary = Some(summary);
            }
            // sleep in short slices so stop takes effect promptly
            let deadline = Instant::now() + interval;
            while Instant::now() < deadline && self.autosync.is_current(generation) {
                thread::sleep(Duration::from_secs(1));
            }
        }
        info!("auto-sync stopped");
    }

    /// One automatic pass: update every mismatched pair, create every missing
    /// task. Snapshot failures end the pass but never the loop.
    fn run_auto_pass(&self) -> AutoSyncSummary {
        let analysis = match self.analyze(&[]) {
            Ok(a) => a,
            Err(err) => {
                error!("auto-sync pass aborted: {err}");
                return AutoSyncSummary {
                    error: Some(err.to_string()),
                    ..AutoSyncSummary::default()
                };
            },
        };

        let mut summary = AutoSyncSummary::default();
        for pair in &analysis.mismatched {
            match self.target.update_issue(&pair.issue.id, &pair.task) {
                Ok(()) => summary.synced += 1,
                Err(err) => {
                    warn!("auto-sync update failed for task {}: {err}", pair.task.gid);
                    summary.failed += 1;
                },
            }
        }
        for task in &analysis.missing_in_target {
            match self.create_one(task).status {
                ActionStatus::Created => summary.created += 1,
                ActionStatus::Skipped => summary.skipped += 1,
                _ => summary.failed += 1,
            }
        }
        summary
    }
}
