//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure business
//! logic handlers that can be used by any HTTP server implementation
//! (`tiny_http`, axum, etc.) or directly by clients such as the CLI.
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take a service reference plus typed
//!   input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for
//!   translation

mod error;
mod handlers;
mod types;

pub use error::ApiError;
pub use handlers::{
    analyze, control_auto_sync, create_missing, create_single, get_auto_sync, get_health,
    get_status, list_ignored, modify_ignore, sync_actions,
};
pub use types::{
    AnalysisData, AnalyzeRequest, ApiResponse, AutoSyncData, AutoSyncRequest, CreateSingleRequest,
    HealthData, IgnoreData, IgnoreRequest, ReportData, StatusData, SyncRequest,
};
