//! Reconciliation engine
//!
//! `classify` combines a source snapshot, a target snapshot, a column filter
//! and a suppression set into a bucketed [`BoardAnalysis`]. It is pure and
//! side-effect free: identical inputs always produce identical bucketing, and
//! no bucket decision performs I/O.

use std::collections::HashSet;

use crate::models::{
    BlockedItem, BoardAnalysis, FindingsAlert, MatchedPair, MismatchedPair, SourceTask,
    TargetIssue,
};

use super::correlate;
use super::mapping::{self, Category};

/// Whether a task's column matches any filter entry (case-insensitive substring)
fn in_scope(task: &SourceTask, group_filter: &[String]) -> bool {
    let section = task.section.to_lowercase();
    group_filter.iter().any(|col| section.contains(&col.to_lowercase()))
}

/// Classify one pass worth of snapshots
///
/// Every in-scope source task lands in exactly one bucket. Malformed records
/// never fail the pass: a task with a missing or unrecognized column falls
/// through the rule cascade to `Backlog`.
#[must_use]
pub fn classify(
    tasks: &[SourceTask],
    issues: &[TargetIssue],
    group_filter: &[String],
    suppressed: &HashSet<String>,
) -> BoardAnalysis {
    let by_key = correlate::index_by_key(issues);

    let filtered: Vec<&SourceTask> =
        tasks.iter().filter(|t| in_scope(t, group_filter)).collect();

    let mut analysis = BoardAnalysis {
        selected_columns: group_filter.to_vec(),
        ..BoardAnalysis::default()
    };

    for task in &filtered {
        if suppressed.contains(&task.gid) {
            analysis.suppressed.push(task.gid.clone());
            continue;
        }

        let category = mapping::categorize(&task.section);
        match category {
            Category::Findings => {
                // A findings task should already be resolved; a still-active
                // linked issue is contradictory and worth an alert.
                if let Some(issue) = by_key.get(task.gid.as_str()) {
                    if mapping::is_active_state(&issue.state) {
                        analysis.findings_alerts.push(FindingsAlert {
                            task: (*task).clone(),
                            issue: (*issue).clone(),
                            target_state: issue.state.clone(),
                            message: format!(
                                "'{}' is in Findings on the board but still active in the tracker ({})",
                                task.name, issue.state
                            ),
                        });
                    }
                }
                analysis.findings.push((*task).clone());
            },
            Category::ReadyForStage => {
                analysis.ready_for_stage.push((*task).clone());
            },
            Category::Blocked => {
                // Triage bucket: state equality is never checked for blocked
                // items, with or without a linked issue.
                analysis.blocked.push(BlockedItem {
                    task: (*task).clone(),
                    issue: by_key.get(task.gid.as_str()).map(|i| (*i).clone()),
                });
            },
            Category::Backlog | Category::InProgress | Category::Dev | Category::Stage => {
                let source_state = category
                    .state_name()
                    .unwrap_or("Backlog")
                    .to_string();

                if let Some(issue) = by_key.get(task.gid.as_str()) {
                    let mismatched_tags = mapping::tag_mismatch(
                        &task.tags,
                        issue.subsystem.as_deref().unwrap_or(""),
                    );
                    if issue.state == source_state {
                        analysis.matched.push(MatchedPair {
                            task: (*task).clone(),
                            issue: (*issue).clone(),
                            state: source_state,
                            tag_mismatch: mismatched_tags,
                        });
                    } else {
                        analysis.mismatched.push(MismatchedPair {
                            task: (*task).clone(),
                            issue: (*issue).clone(),
                            source_state,
                            target_state: issue.state.clone(),
                            tag_mismatch: mismatched_tags,
                        });
                    }
                } else {
                    analysis.missing_in_target.push((*task).clone());
                }
            },
        }
    }

    // Orphan pass: linked issues whose source task is not in scope. Suppressed
    // tasks still count as present here; they exist on the board.
    let filtered_ids: HashSet<&str> = filtered.iter().map(|t| t.gid.as_str()).collect();
    for issue in issues {
        if let Some(key) = correlate::extract_key(&issue.description) {
            if !filtered_ids.contains(key.as_str()) {
                analysis.orphaned_in_target.push(issue.clone());
            }
        }
    }

    analysis
}
