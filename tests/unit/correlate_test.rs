//! Tests for correlation marker round-trips through realistic descriptions

use boardsync::sync::correlate::{extract_key, format_marker, index_by_key};

use super::common::{linked_issue, unlinked_issue};

#[test]
fn marker_survives_a_multi_paragraph_description() {
    let description = format!(
        "Steps to reproduce:\n1. open the app\n2. tap login\n\n{}\n\nEdited by QA",
        format_marker("1200000000000042")
    );
    assert_eq!(extract_key(&description), Some("1200000000000042".to_string()));
}

#[test]
fn index_separates_linked_from_unlinked() {
    let issues = vec![
        linked_issue("T-1", "S1", "Backlog"),
        unlinked_issue("T-2", "handmade", "Dev"),
        linked_issue("T-3", "S3", "Stage"),
    ];
    let index = index_by_key(&issues);
    assert_eq!(index.len(), 2);
    assert_eq!(index["S1"].id, "T-1");
    assert_eq!(index["S3"].id, "T-3");
}
