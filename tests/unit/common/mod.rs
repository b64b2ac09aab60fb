//! Shared test fixtures and helpers
//!
//! Builders for board tasks and tracker issues with predictable content.

use boardsync::config::SyncConfig;
use boardsync::models::{SourceTask, TargetIssue};
use boardsync::sync::correlate::format_marker;

/// A task in the given board column, with tags
pub fn task(gid: &str, name: &str, section: &str, tags: &[&str]) -> SourceTask {
    SourceTask {
        tags: tags.iter().map(ToString::to_string).collect(),
        notes: format!("notes for {name}"),
        ..SourceTask::new(gid, name, section)
    }
}

/// An issue whose description carries the correlation marker for `task_gid`
pub fn linked_issue(id: &str, task_gid: &str, state: &str) -> TargetIssue {
    TargetIssue {
        description: format_marker(task_gid),
        project: "PRJ".to_string(),
        ..TargetIssue::new(id, format!("issue {id}"), state)
    }
}

/// An issue with no correlation marker
pub fn unlinked_issue(id: &str, summary: &str, state: &str) -> TargetIssue {
    TargetIssue {
        description: "manually filed".to_string(),
        project: "PRJ".to_string(),
        ..TargetIssue::new(id, summary, state)
    }
}

/// A configuration that passes validation without touching the network
pub fn test_config() -> SyncConfig {
    SyncConfig {
        source_token: "test-pat".into(),
        source_project: "1200000000000001".into(),
        target_base_url: "http://127.0.0.1:9".into(),
        target_token: "perm:test".into(),
        target_project: "PRJ".into(),
        ..SyncConfig::default()
    }
}
