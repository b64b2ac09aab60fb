//! Top-level error taxonomy
//!
//! Three failure classes with deliberately different blast radii:
//! a snapshot fetch failure aborts the whole pass, an action failure is
//! recorded per item and never halts a batch, and a configuration failure is
//! fatal at startup only.

use thiserror::Error;

/// Which external system an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncSystem {
    /// The planning board tasks are read from
    Source,
    /// The issue tracker being kept in sync
    Target,
}

impl std::fmt::Display for SyncSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source board"),
            Self::Target => write!(f, "target tracker"),
        }
    }
}

/// Errors surfaced by the sync service
#[derive(Debug, Error)]
pub enum SyncError {
    /// A snapshot fetch failed; the classification pass is aborted
    #[error("failed to fetch {system} snapshot: {detail}")]
    SnapshotFetch {
        /// The system that could not be read
        system: SyncSystem,
        /// Underlying failure description
        detail: String,
    },

    /// A single create/update action failed (recorded per item, never fatal)
    #[error("action failed: {0}")]
    Action(String),

    /// Missing or invalid connection parameters (fatal at startup)
    #[error("configuration error: {0}")]
    Config(String),
}

impl SyncError {
    /// Snapshot fetch failure for the source board
    #[must_use]
    pub fn source_fetch(detail: impl Into<String>) -> Self {
        Self::SnapshotFetch {
            system: SyncSystem::Source,
            detail: detail.into(),
        }
    }

    /// Snapshot fetch failure for the target tracker
    #[must_use]
    pub fn target_fetch(detail: impl Into<String>) -> Self {
        Self::SnapshotFetch {
            system: SyncSystem::Target,
            detail: detail.into(),
        }
    }
}
