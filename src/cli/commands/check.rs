//! Check command - verify connectivity and configuration

use std::path::Path;

use boardsync::output::{OperationResult, OutputMode};

/// Verify both systems are reachable and the target project resolves
pub fn check(config_path: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let service = super::service_from(config_path)?;
    let message = service.check()?;
    OperationResult {
        success: true,
        message,
    }
    .render(mode);
    Ok(())
}
