//! Reconciliation core
//!
//! Pure logic with no I/O dependencies: the column-to-category rule cascade,
//! the correlation key extractor, and the classifier that combines both
//! snapshots into a bucketed result.

pub mod classify;
pub mod correlate;
pub mod mapping;

pub use classify::classify;
pub use mapping::Category;
