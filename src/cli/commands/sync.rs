//! Sync command - push board states to mismatched issues

use std::path::Path;

use boardsync::output::{render_report, OperationResult, OutputMode};
use boardsync::service::{SyncAction, SyncActionRequest};

/// Update every mismatched issue to its board state
pub fn sync(config_path: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let service = super::service_from(config_path)?;

    let analysis = service.analyze(&[])?;
    if analysis.mismatched.is_empty() {
        OperationResult {
            success: true,
            message: "Nothing to sync; all linked issues match.".to_string(),
        }
        .render(mode);
        return Ok(());
    }

    let requests: Vec<SyncActionRequest> = analysis
        .mismatched
        .iter()
        .map(|pair| SyncActionRequest {
            task_id: pair.task.gid.clone(),
            action: SyncAction::Sync,
        })
        .collect();

    let report = service.sync_mismatched(&requests)?;
    render_report(&report, mode);
    Ok(())
}
