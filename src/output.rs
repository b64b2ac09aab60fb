//! Output formatting for human and JSON modes
//!
//! This module renders analysis and batch results either as human-readable
//! text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::models::{ActionReport, ActionStatus, BoardAnalysis};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

/// Render a classification pass
pub fn render_analysis(analysis: &BoardAnalysis, mode: OutputMode) {
    match mode {
        OutputMode::Human => render_analysis_human(analysis),
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(analysis).unwrap_or_default());
        },
    }
}

fn render_analysis_human(analysis: &BoardAnalysis) {
    let summary = analysis.summary();
    println!("Board analysis ({} columns selected)\n", analysis.selected_columns.len());

    println!("  {} {}", format!("{:>3}", summary.matched).green(), "matched".green());

    println!("  {} {}", format!("{:>3}", summary.mismatched).yellow(), "mismatched".yellow());
    for pair in &analysis.mismatched {
        println!(
            "      {} ({} on the board, {} in the tracker)",
            pair.task.name, pair.source_state, pair.target_state
        );
    }

    println!("  {} missing in target", format!("{:>3}", summary.missing_in_target).cyan());
    for task in &analysis.missing_in_target {
        println!("      {} [{}]", task.name, task.section);
    }

    println!("  {:>3} blocked", summary.blocked);
    println!("  {:>3} findings", summary.findings);
    for alert in &analysis.findings_alerts {
        println!("      {} {}", "!".red().bold(), alert.message.red());
    }
    println!("  {:>3} ready for stage", summary.ready_for_stage);
    println!("  {:>3} orphaned in target", summary.orphaned_in_target);
    for issue in &analysis.orphaned_in_target {
        println!("      {} ({})", issue.summary, issue.id);
    }
    if summary.suppressed > 0 {
        println!("  {:>3} suppressed", summary.suppressed);
    }
}

/// Render a batch action report
pub fn render_report(report: &ActionReport, mode: OutputMode) {
    match mode {
        OutputMode::Human => render_report_human(report),
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(report).unwrap_or_default());
        },
    }
}

fn render_report_human(report: &ActionReport) {
    if report.outcomes.is_empty() {
        println!("Nothing to do.");
        return;
    }

    for outcome in &report.outcomes {
        let label = match outcome.status {
            ActionStatus::Created => "created".green(),
            ActionStatus::Synced => "synced".green(),
            ActionStatus::Skipped => "skipped".yellow(),
            ActionStatus::Failed => "failed".red(),
            ActionStatus::IgnoredTemporarily => "ignored (temp)".normal(),
            ActionStatus::IgnoredPermanently => "ignored (forever)".normal(),
        };
        match &outcome.detail {
            Some(detail) => println!("  {label}  {} - {detail}", outcome.task_name),
            None => println!("  {label}  {}", outcome.task_name),
        }
    }

    println!(
        "\n{} processed: {} created, {} synced, {} skipped, {} failed",
        report.total(),
        report.count(ActionStatus::Created),
        report.count(ActionStatus::Synced),
        report.count(ActionStatus::Skipped),
        report.count(ActionStatus::Failed)
    );
}
