//! Tests for the column and tag mapping tables

use boardsync::sync::Category;
use boardsync::sync::mapping::{
    all_columns, categorize, map_section_to_state, map_tag_to_subsystem, DISPLAY_ONLY_COLUMNS,
    SYNCABLE_COLUMNS,
};

#[test]
fn every_syncable_column_maps_to_a_state() {
    for column in SYNCABLE_COLUMNS {
        assert!(
            map_section_to_state(column).is_some(),
            "column '{column}' should have a target state"
        );
    }
}

#[test]
fn every_display_only_column_has_no_state() {
    for column in DISPLAY_ONLY_COLUMNS {
        assert!(
            map_section_to_state(column).is_none(),
            "column '{column}' should be display-only"
        );
    }
}

#[test]
fn all_columns_lists_syncable_before_display_only() {
    let columns = all_columns();
    assert_eq!(columns.len(), SYNCABLE_COLUMNS.len() + DISPLAY_ONLY_COLUMNS.len());
    assert_eq!(columns[0], SYNCABLE_COLUMNS[0]);
    assert_eq!(columns.last().map(String::as_str), DISPLAY_ONLY_COLUMNS.last().copied());
}

#[test]
fn decorated_column_names_still_categorize() {
    assert_eq!(categorize("Sprint Backlog"), Category::Backlog);
    assert_eq!(categorize("In Progress (active)"), Category::InProgress);
    assert_eq!(categorize("Dev QA"), Category::Dev);
    assert_eq!(categorize("Blocked - waiting on vendor"), Category::Blocked);
}

#[test]
fn tag_dictionary_covers_the_full_set() {
    let expectations = [
        ("Mobile", "mobile"),
        ("Web", "web"),
        ("API", "backend"),
        ("Frontend", "frontend"),
        ("Backend", "backend"),
        ("iOS", "mobile"),
        ("Android", "mobile"),
        ("Desktop", "desktop"),
        ("Database", "backend"),
        ("UI/UX", "frontend"),
        ("DevOps", "infrastructure"),
        ("QA", "testing"),
        ("Testing", "testing"),
        ("Security", "security"),
        ("Performance", "performance"),
    ];
    for (tag, subsystem) in expectations {
        assert_eq!(map_tag_to_subsystem(tag), subsystem, "tag '{tag}'");
    }
}

#[test]
fn unknown_tags_degrade_to_lowercase() {
    assert_eq!(map_tag_to_subsystem("Payments"), "payments");
    assert_eq!(map_tag_to_subsystem("DATA-ENG"), "data-eng");
}
