//! Run command implementation
//!
//! This module implements the `run` command: discover the scripts in the
//! configured folder and execute them one after another on a background
//! task while progress is printed here.

use crate::adapters::database::create_batch_executor;
use crate::cli::Session;
use crate::config::redact_connection_string;
use crate::core::discovery::discover_scripts;
use crate::core::executor::SequentialExecutor;
use crate::core::progress::{progress_channel, ProgressEvent};
use crate::core::report::{RunOutcome, RunReport};
use crate::domain::ScriptFile;
use clap::Args;
use secrecy::ExposeSecret;
use std::path::PathBuf;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - read every script but don't touch the database
    #[arg(long)]
    pub dry_run: bool,

    /// Write the full message log to this file when the run ends
    #[arg(long, value_name = "PATH")]
    pub export_log: Option<PathBuf>,

    /// Write the error log to this file when the run ends
    #[arg(long, value_name = "PATH")]
    pub error_log: Option<PathBuf>,

    /// Only print the final status
    #[arg(short, long)]
    pub quiet: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, session: &Session) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");
        let config = session.config();

        // A dry run never connects, so only the folder has to be usable
        if !self.dry_run {
            if let Err(e) = config.validate() {
                tracing::error!(error = %e, "Configuration validation failed");
                println!("Status: {e}");
                return Ok(2); // Configuration error exit code
            }
        }

        let scripts = match discover_scripts(&config.script_folder) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Script discovery failed");
                println!("Status: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if scripts.is_empty() {
            println!(
                "Status: No scripts found in {}",
                config.script_folder.display()
            );
            return Ok(0);
        }

        if self.dry_run {
            tracing::info!("Dry run mode enabled - no SQL will be executed");
            println!("🔍 DRY RUN MODE - No SQL will be sent to the database");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !self.dry_run {
            match confirm(config, &scripts) {
                Ok(true) => {}
                Ok(false) => {
                    println!("Run cancelled.");
                    return Ok(0);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read confirmation");
                    println!("Status: Failed to read confirmation: {e}");
                    return Ok(5); // Fatal error exit code
                }
            }
        }

        let executor = match create_batch_executor(config, self.dry_run) {
            Ok(e) => e,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create executor");
                println!("Status: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let (tx, mut rx) = progress_channel();
        let worker = SequentialExecutor::new(executor)
            .with_progress(tx)
            .spawn(scripts.into_iter().map(ScriptFile::into_path).collect());

        while let Some(event) = rx.recv().await {
            if let Some(line) = render_event(&event, self.quiet) {
                println!("{line}");
            }
        }

        let report = match worker.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Run task failed");
                println!("Status: Run task failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };
        report.log_summary();

        println!();
        println!("Status: {}", report.status_line());
        if report.error_count > 0 {
            println!();
            print!("{}", report.error_log_text());
        }

        if let Err(code) = self.export_logs(&report) {
            return Ok(code);
        }

        Ok(exit_code(&report.outcome()))
    }

    fn export_logs(&self, report: &RunReport) -> Result<(), i32> {
        if let Some(path) = &self.export_log {
            if let Err(e) = report.export_message_log(path) {
                tracing::error!(error = %e, "Message log export failed");
                println!("❌ {e}");
                return Err(5); // Fatal error exit code
            }
            println!("Message log exported to {}", path.display());
        }

        if let Some(path) = &self.error_log {
            if let Err(e) = report.export_error_log(path) {
                tracing::error!(error = %e, "Error log export failed");
                println!("❌ {e}");
                return Err(5); // Fatal error exit code
            }
            println!("Error log exported to {}", path.display());
        }

        Ok(())
    }
}

fn confirm(config: &crate::config::AppConfig, scripts: &[ScriptFile]) -> std::io::Result<bool> {
    use std::io::{self, Write};

    println!("Run Configuration:");
    println!(
        "  Database: {}",
        redact_connection_string(config.connection_string.expose_secret().as_str())
    );
    println!("  Folder: {}", config.script_folder.display());
    println!("  Scripts: {}", scripts.len());
    println!();
    print!("Run all scripts on database? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Line to print for a progress event, if any
fn render_event(event: &ProgressEvent, quiet: bool) -> Option<String> {
    match event {
        ProgressEvent::FileMissing { .. } => Some(format!("❌ {event}")),
        _ if quiet => None,
        ProgressEvent::RunStarted { .. } => Some(format!("🚀 {event}")),
        ProgressEvent::ScriptStarted { .. } => Some(event.to_string()),
        ProgressEvent::ScriptCompleted { failed: true, .. } => Some(format!("⚠️  {event}")),
        ProgressEvent::ScriptCompleted { .. } => Some(format!("   {event}")),
        // The status line after the run says the same thing
        ProgressEvent::RunFinished { .. } => None,
    }
}

/// Process exit code for a run outcome
fn exit_code(outcome: &RunOutcome) -> i32 {
    match outcome {
        RunOutcome::Succeeded => 0,
        RunOutcome::CompletedWithErrors(_) => 1,
        RunOutcome::Aborted { .. } => 3,
    }
}
