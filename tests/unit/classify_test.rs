//! Tests for the classification pass over realistic mixed boards

use std::collections::HashSet;

use boardsync::sync::classify;
use boardsync::sync::mapping::all_columns;

use super::common::{linked_issue, task, unlinked_issue};

#[test]
fn mixed_board_lands_every_task_in_exactly_one_bucket() {
    let tasks = vec![
        task("S1", "write spec", "Backlog", &[]),
        task("S2", "login fix", "In Progress", &["Mobile"]),
        task("S3", "api rollout", "Dev", &["API"]),
        task("S4", "load test", "Stage", &[]),
        task("S5", "vendor outage", "Blocked", &[]),
        task("S6", "review notes", "Findings", &[]),
        task("S7", "cutover", "Ready for Stage", &[]),
        task("S8", "stale entry", "Backlog", &[]),
    ];
    let issues = vec![
        linked_issue("T-2", "S2", "In Progress"),
        linked_issue("T-3", "S3", "Backlog"),
        linked_issue("T-5", "S5", "Stage"),
    ];
    let suppressed: HashSet<String> = ["S8".to_string()].into();

    let analysis = classify(&tasks, &issues, &all_columns(), &suppressed);

    assert_eq!(analysis.matched.len(), 1);
    assert_eq!(analysis.mismatched.len(), 1);
    assert_eq!(analysis.missing_in_target.len(), 2); // S1 and S4
    assert_eq!(analysis.blocked.len(), 1);
    assert_eq!(analysis.findings.len(), 1);
    assert_eq!(analysis.ready_for_stage.len(), 1);
    assert_eq!(analysis.suppressed, vec!["S8".to_string()]);
    assert_eq!(analysis.bucketed_task_count(), tasks.len());
}

#[test]
fn out_of_scope_columns_are_not_bucketed() {
    let tasks = vec![
        task("S1", "in scope", "Backlog", &[]),
        task("S2", "someday", "Icebox", &[]),
    ];
    let filter = vec!["backlog".to_string()];
    let analysis = classify(&tasks, &[], &filter, &HashSet::new());
    assert_eq!(analysis.bucketed_task_count(), 1);
    assert_eq!(analysis.missing_in_target[0].gid, "S1");
}

#[test]
fn scope_filter_matches_case_insensitive_substrings() {
    let tasks = vec![task("S1", "x", "Sprint Backlog (Q3)", &[])];
    let filter = vec!["BACKLOG".to_string()];
    let analysis = classify(&tasks, &[], &filter, &HashSet::new());
    assert_eq!(analysis.missing_in_target.len(), 1);
}

#[test]
fn duplicate_correlation_keys_resolve_to_first_issue() {
    let tasks = vec![task("S1", "doubly linked", "Backlog", &[])];
    let issues = vec![
        linked_issue("T-1", "S1", "Backlog"),
        linked_issue("T-2", "S1", "Dev"),
    ];
    let analysis = classify(&tasks, &issues, &all_columns(), &HashSet::new());
    // the first-seen issue matches; the shadowed one is neither matched nor orphaned
    assert_eq!(analysis.matched.len(), 1);
    assert_eq!(analysis.matched[0].issue.id, "T-1");
    assert!(analysis.orphaned_in_target.is_empty());
}

#[test]
fn unlinked_issues_are_never_orphans() {
    let issues = vec![unlinked_issue("T-9", "manually filed", "Dev")];
    let analysis = classify(&[], &issues, &all_columns(), &HashSet::new());
    assert!(analysis.orphaned_in_target.is_empty());
}

#[test]
fn suppressed_task_with_issue_is_not_reported_as_orphan() {
    let tasks = vec![task("S1", "muted", "Backlog", &[])];
    let issues = vec![linked_issue("T-1", "S1", "Dev")];
    let suppressed: HashSet<String> = ["S1".to_string()].into();
    let analysis = classify(&tasks, &issues, &all_columns(), &suppressed);
    // the task exists on the board, so its issue stays linked
    assert!(analysis.orphaned_in_target.is_empty());
    assert!(analysis.mismatched.is_empty());
}

#[test]
fn tag_disagreement_is_flagged_on_matched_pairs() {
    let tasks = vec![task("S1", "tagged", "Dev", &["Mobile"])];
    let mut issue = linked_issue("T-1", "S1", "Dev");
    issue.subsystem = Some("backend".to_string());
    let analysis = classify(&tasks, &[issue], &all_columns(), &HashSet::new());
    assert_eq!(analysis.matched.len(), 1);
    assert!(analysis.matched[0].tag_mismatch);
}

#[test]
fn agreeing_tags_are_not_flagged() {
    let tasks = vec![task("S1", "tagged", "Dev", &["API"])];
    let mut issue = linked_issue("T-1", "S1", "Dev");
    issue.subsystem = Some("backend".to_string());
    let analysis = classify(&tasks, &[issue], &all_columns(), &HashSet::new());
    assert!(!analysis.matched[0].tag_mismatch);
}
