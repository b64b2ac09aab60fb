//! Command implementations

mod analyze;
mod check;
mod create;
mod ignore;
mod serve;
mod sync;

pub use analyze::analyze;
pub use check::check;
pub use create::create;
pub use ignore::ignore;
pub use serve::serve;
pub use sync::sync;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use boardsync::config::SyncConfig;
use boardsync::service::SyncService;

/// Load configuration and build the service every command shares
fn service_from(config_path: Option<&Path>) -> anyhow::Result<Arc<SyncService>> {
    let config = SyncConfig::load(config_path).context("failed to load configuration")?;
    Ok(SyncService::new(config)?)
}
