//! Correlation key extraction
//!
//! Created issues carry a marker line in their description linking them back
//! to the originating source task. The extractor pulls that key back out of
//! free text so the classifier can index the target snapshot by source id.

use std::collections::HashMap;

use crate::models::TargetIssue;

/// Marker label embedded in issue descriptions
pub const MARKER: &str = "Source ID:";

/// Render the marker line appended to created/updated issue descriptions
#[must_use]
pub fn format_marker(task_id: &str) -> String {
    format!("[Synced from {MARKER} {task_id}]")
}

/// Extract the correlation key from an issue description
///
/// Scans for the marker line and returns the trimmed id after it; `None` when
/// the marker is absent or carries no id (unlinked issue).
#[must_use]
pub fn extract_key(description: &str) -> Option<String> {
    let line = description.lines().find(|l| l.contains(MARKER))?;
    let (_, rest) = line.split_once(MARKER)?;
    let key = rest.trim().trim_end_matches(']').trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// Index a target snapshot by correlation key
///
/// Issues without a key are dropped (they are unlinked, never orphans).
/// Duplicate keys keep the first issue seen and silently shadow the rest; no
/// conflict policy is defined upstream, so the observed behavior is preserved.
#[must_use]
pub fn index_by_key(issues: &[TargetIssue]) -> HashMap<String, &TargetIssue> {
    let mut by_key: HashMap<String, &TargetIssue> = HashMap::new();
    for issue in issues {
        if let Some(key) = extract_key(&issue.description) {
            by_key.entry(key).or_insert(issue);
        }
    }
    by_key
}
