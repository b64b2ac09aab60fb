//! Fetch strategy chain
//!
//! The target tracker exposes several ways to list issues and not every
//! deployment supports all of them. Retrieval strategies share one interface
//! and run in order; the first transport-level success wins, even with an
//! empty payload. A failed strategy is never retried; resilience comes from
//! moving on to the next strategy, not from backoff.

use log::{info, warn};

use super::ClientError;
use crate::models::TargetIssue;

/// One way of retrieving the target snapshot
pub trait FetchStrategy {
    /// Short name used in logs and aggregated errors
    fn name(&self) -> &'static str;

    /// Attempt the fetch
    ///
    /// An `Ok` with an empty vector is a success: the project may simply hold
    /// no issues. Network errors, non-2xx statuses and decode failures are
    /// strategy failures.
    fn fetch(&self) -> Result<Vec<TargetIssue>, ClientError>;
}

/// Every strategy in the chain failed
#[derive(Debug)]
pub struct FetchChainError {
    /// Per-strategy failures, in attempt order
    pub failures: Vec<(&'static str, ClientError)>,
}

impl std::fmt::Display for FetchChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "all {} fetch strategies failed:", self.failures.len())?;
        for (name, err) in &self.failures {
            write!(f, " [{name}: {err}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for FetchChainError {}

/// Run strategies in order, returning the first success as-is
pub fn run_chain(
    strategies: &[&dyn FetchStrategy],
) -> Result<Vec<TargetIssue>, FetchChainError> {
    let mut failures = Vec::new();
    for strategy in strategies {
        info!("attempting fetch strategy '{}'", strategy.name());
        match strategy.fetch() {
            Ok(issues) => {
                info!(
                    "fetch strategy '{}' succeeded with {} issues",
                    strategy.name(),
                    issues.len()
                );
                return Ok(issues);
            },
            Err(err) => {
                warn!("fetch strategy '{}' failed: {err}", strategy.name());
                failures.push((strategy.name(), err));
            },
        }
    }
    Err(FetchChainError { failures })
}
