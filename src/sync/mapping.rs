//! Column and tag mapping
//!
//! Maps a task's free-text board column to a canonical category via an ordered
//! first-match-wins rule cascade, and a free-text tag to a target subsystem
//! name via a static dictionary. Both mappings are total: unknown columns fall
//! back to `Backlog`, unknown tags degrade to their own lowercased form.

use serde::Serialize;

/// Canonical category derived from a board column name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    /// Work not started
    Backlog,
    /// Work underway
    InProgress,
    /// In development verification
    Dev,
    /// In staging verification
    Stage,
    /// Blocked; triaged, never state-compared
    Blocked,
    /// Display-only: review findings column
    Findings,
    /// Display-only: queued for staging column
    ReadyForStage,
}

impl Category {
    /// Whether this category must never trigger create/update actions
    #[must_use]
    pub const fn is_display_only(self) -> bool {
        matches!(self, Self::Findings | Self::ReadyForStage)
    }

    /// The canonical state string written to / compared against the target
    ///
    /// Display-only categories have no target state.
    #[must_use]
    pub const fn state_name(self) -> Option<&'static str> {
        match self {
            Self::Backlog => Some("Backlog"),
            Self::InProgress => Some("In Progress"),
            Self::Dev => Some("Dev"),
            Self::Stage => Some("Stage"),
            Self::Blocked => Some("Blocked"),
            Self::Findings | Self::ReadyForStage => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backlog => write!(f, "Backlog"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Dev => write!(f, "Dev"),
            Self::Stage => write!(f, "Stage"),
            Self::Blocked => write!(f, "Blocked"),
            Self::Findings => write!(f, "Findings"),
            Self::ReadyForStage => write!(f, "Ready for Stage"),
        }
    }
}

/// One entry in the category rule cascade
struct Rule {
    /// Substring the lowercased column name must contain
    requires: &'static str,
    /// Substring the column name must NOT contain for the rule to fire
    excludes: Option<&'static str>,
    /// Resulting category
    category: Category,
}

/// Ordered rule cascade; first match wins
///
/// Order matters: "ready for stage" contains "stage", so the dev/stage rules
/// carry a "ready" exclusion and the explicit ready-for-stage rule sits after
/// them.
const RULES: &[Rule] = &[
    Rule { requires: "backlog", excludes: None, category: Category::Backlog },
    Rule { requires: "in progress", excludes: None, category: Category::InProgress },
    Rule { requires: "dev", excludes: Some("ready"), category: Category::Dev },
    Rule { requires: "stage", excludes: Some("ready"), category: Category::Stage },
    Rule { requires: "blocked", excludes: None, category: Category::Blocked },
    Rule { requires: "findings", excludes: None, category: Category::Findings },
    Rule { requires: "ready for stage", excludes: None, category: Category::ReadyForStage },
];

/// Board columns that participate in sync actions
pub const SYNCABLE_COLUMNS: &[&str] = &["backlog", "in progress", "dev", "stage", "blocked"];

/// Board columns that are reported but never synced
pub const DISPLAY_ONLY_COLUMNS: &[&str] = &["ready for stage", "findings"];

/// All known board columns, syncable first
#[must_use]
pub fn all_columns() -> Vec<String> {
    SYNCABLE_COLUMNS
        .iter()
        .chain(DISPLAY_ONLY_COLUMNS)
        .map(|&c| c.to_string())
        .collect()
}

/// Map a board column name to its canonical category
///
/// Total for any input: empty or unrecognized names fall back to `Backlog`.
#[must_use]
pub fn categorize(section: &str) -> Category {
    let lower = section.to_lowercase();
    RULES
        .iter()
        .find(|rule| {
            lower.contains(rule.requires)
                && rule.excludes.is_none_or(|ex| !lower.contains(ex))
        })
        .map_or(Category::Backlog, |rule| rule.category)
}

/// Map a board column name to the canonical state string written to the target
///
/// `None` for display-only columns; falls back to "Backlog" like `categorize`.
#[must_use]
pub fn map_section_to_state(section: &str) -> Option<&'static str> {
    categorize(section).state_name()
}

/// Static tag-to-subsystem dictionary
const TAG_SUBSYSTEMS: &[(&str, &str)] = &[
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

/// Map a free-text tag to a target subsystem name
///
/// Exact-case lookup first, then case-insensitive; unknown tags degrade to
/// their own lowercased form rather than failing.
#[must_use]
pub fn map_tag_to_subsystem(tag: &str) -> String {
    if let Some(&(_, subsystem)) = TAG_SUBSYSTEMS.iter().find(|&&(t, _)| t == tag) {
        return subsystem.to_string();
    }
    let lower = tag.to_lowercase();
    TAG_SUBSYSTEMS
        .iter()
        .find(|&&(t, _)| t.to_lowercase() == lower)
        .map_or(lower, |&(_, subsystem)| subsystem.to_string())
}

/// Detect disagreement between a task's tags and an issue's subsystem
///
/// Both empty: no mismatch. Exactly one empty: mismatch. Otherwise a mismatch
/// unless some tag maps to the subsystem (case-insensitively).
#[must_use]
pub fn tag_mismatch(tags: &[String], subsystem: &str) -> bool {
    if tags.is_empty() && subsystem.is_empty() {
        return false;
    }
    if tags.is_empty() || subsystem.is_empty() {
        return true;
    }
    !tags
        .iter()
        .any(|tag| map_tag_to_subsystem(tag).eq_ignore_ascii_case(subsystem))
}

/// Target states that count as "active" for findings alerts
const ACTIVE_STATES: &[&str] = &["Backlog", "In Progress", "Dev", "Stage", "Blocked"];

/// Whether a target state string is in the fixed active set
#[must_use]
pub fn is_active_state(state: &str) -> bool {
    ACTIVE_STATES.iter().any(|s| s.eq_ignore_ascii_case(state))
}
