//! Create command - create missing tracker issues

use std::path::Path;

use boardsync::models::ActionReport;
use boardsync::output::{render_report, OutputMode};

/// Create issues for tasks missing in the target, or for one task id
pub fn create(
    config_path: Option<&Path>,
    task_id: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let service = super::service_from(config_path)?;

    let report = match task_id {
        Some(task_id) => {
            let outcome = service.create_single(task_id)?;
            let mut report = ActionReport::default();
            report.push(outcome);
            report
        },
        None => service.create_missing()?,
    };

    render_report(&report, mode);
    Ok(())
}
