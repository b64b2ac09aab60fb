//! Serve command - run the HTTP service

use std::path::Path;

use anyhow::Context;

use boardsync::config::SyncConfig;
use boardsync::server;
use boardsync::service::SyncService;

/// Start the HTTP service
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> anyhow::Result<()> {
    let config = SyncConfig::load(config_path).context("failed to load configuration")?;
    let port = port.unwrap_or(config.port);
    let service = SyncService::new(config)?;

    println!("boardsync v{}", env!("CARGO_PKG_VERSION"));
    println!("Listening on http://localhost:{port}");

    server::serve(&service, port)
}
