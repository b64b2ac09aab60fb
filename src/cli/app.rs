//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use boardsync::output::OutputMode;

/// boardsync - one-directional board to tracker sync
#[derive(Parser, Debug)]
#[command(
    name = "boardsync",
    version,
    about = "One-directional planning-board to issue-tracker sync",
    long_about = "Reads tasks from a planning board, classifies them against the\n\
                  linked issues in a target tracker, and pushes creates and state\n\
                  updates in one direction only."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run a classification pass and print the buckets
    Analyze {
        /// Columns to include (defaults to every known column)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },

    /// Create tracker issues for tasks missing in the target
    Create {
        /// Create only the issue for this task id
        #[arg(long)]
        task_id: Option<String>,
    },

    /// Update every mismatched issue to its board state
    Sync,

    /// Manage suppressed task ids
    Ignore {
        #[command(subcommand)]
        action: IgnoreAction,
    },

    /// Verify connectivity and the configured projects
    Check,

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum IgnoreAction {
    /// Suppress a task id
    Add {
        /// Source task id
        task_id: String,

        /// Scope: temp or forever
        #[arg(short, long, default_value = "temp")]
        scope: String,
    },

    /// Remove a suppression
    Remove {
        /// Source task id
        task_id: String,
    },

    /// List suppressed task ids
    List,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Command::Serve { port }) => commands::serve(config_path, port),
        Some(Command::Analyze { columns }) => commands::analyze(config_path, &columns, output_mode),
        Some(Command::Create { task_id }) => {
            commands::create(config_path, task_id.as_deref(), output_mode)
        },
        Some(Command::Sync) => commands::sync(config_path, output_mode),
        Some(Command::Ignore { action }) => commands::ignore(config_path, &action, output_mode),
        Some(Command::Check) => commands::check(config_path, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("boardsync v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("boardsync v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'boardsync --help' for usage");
                println!("Run 'boardsync serve' to start the HTTP service");
            }
            Ok(())
        },
    }
}
