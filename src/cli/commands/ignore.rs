//! Ignore command - manage suppressed task ids

use std::path::Path;

use boardsync::output::{OperationResult, OutputMode};
use boardsync::suppress::SuppressScope;

use crate::cli::app::IgnoreAction;

/// Add, remove or list suppressions
pub fn ignore(
    config_path: Option<&Path>,
    action: &IgnoreAction,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let service = super::service_from(config_path)?;

    match action {
        IgnoreAction::Add { task_id, scope } => {
            let scope: SuppressScope = scope.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            service.ignore(task_id, scope)?;
            OperationResult {
                success: true,
                message: format!("Task {task_id} suppressed ({scope})"),
            }
            .render(mode);
        },
        IgnoreAction::Remove { task_id } => {
            let changed = service.unignore(task_id)?;
            OperationResult {
                success: changed,
                message: if changed {
                    format!("Task {task_id} is no longer suppressed")
                } else {
                    format!("Task {task_id} was not suppressed")
                },
            }
            .render(mode);
        },
        IgnoreAction::List => {
            let (temporary, permanent) = service.suppression().lists();
            match mode {
                OutputMode::Json => println!(
                    "{}",
                    serde_json::json!({
                        "ignored_temporarily": temporary,
                        "ignored_permanently": permanent,
                    })
                ),
                OutputMode::Human => {
                    if temporary.is_empty() && permanent.is_empty() {
                        println!("No suppressed tasks.");
                    }
                    for id in &temporary {
                        println!("  {id} (temp)");
                    }
                    for id in &permanent {
                        println!("  {id} (forever)");
                    }
                },
            }
        },
    }
    Ok(())
}
