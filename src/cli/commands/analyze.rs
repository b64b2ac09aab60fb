//! Analyze command - run one classification pass

use std::path::Path;

use boardsync::output::{render_analysis, OutputMode};

/// Classify the board against the tracker and print the buckets
pub fn analyze(
    config_path: Option<&Path>,
    columns: &[String],
    mode: OutputMode,
) -> anyhow::Result<()> {
    let service = super::service_from(config_path)?;
    let analysis = service.analyze(columns)?;
    render_analysis(&analysis, mode);
    Ok(())
}
