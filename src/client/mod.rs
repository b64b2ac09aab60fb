//! HTTP clients for the two external systems
//!
//! Blocking reqwest clients with fixed per-call timeouts. The target client
//! fetches through an ordered strategy chain because the tracker API's shape
//! varies by deployment; the source client is a single fail-closed fetch.

pub mod source;
pub mod strategy;
pub mod target;

use thiserror::Error;

pub use source::SourceClient;
pub use strategy::{FetchChainError, FetchStrategy};
pub use target::TargetClient;

use crate::sync::Category;

/// Errors from a single client call
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, DNS or timeout failure
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("HTTP {0}: {1}")]
    Status(u16, String),

    /// Response body could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// Create/update refused for a display-only category
    #[error("refusing to sync display-only category '{0}'")]
    DisplayOnly(Category),

    /// The referenced record does not exist upstream
    #[error("not found: {0}")]
    NotFound(String),
}

impl ClientError {
    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Truncate an upstream error body for logs and error messages
pub(crate) fn trim_body(body: &str) -> String {
    const MAX: usize = 300;
    if body.len() > MAX {
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
