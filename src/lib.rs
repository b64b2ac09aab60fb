//! boardsync - One-directional task board synchronization
//!
//! This library projects task status from a source planning board (Asana-shaped
//! API) onto a target issue tracker (YouTrack-shaped API). The core is a pure
//! reconciliation engine that correlates records across the two systems via an
//! embedded correlation marker and buckets every task into a disjoint
//! classification that drives which create/update actions are eligible.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod server;
pub mod service;
pub mod suppress;
pub mod sync;
