//! Domain models
//!
//! Plain data carried between the clients, the reconciliation engine and the
//! API layer. Snapshot records are read-only for the duration of a pass.

mod analysis;
mod report;
mod source;
mod target;

pub use analysis::{AnalysisSummary, BlockedItem, BoardAnalysis, FindingsAlert, MatchedPair, MismatchedPair};
pub use report::{ActionOutcome, ActionReport, ActionStatus};
pub use source::SourceTask;
pub use target::TargetIssue;
