// SQL Runner - Sequential SQL script runner for PostgreSQL
// Copyright (c) 2025 SQL Runner Contributors
// Licensed under the MIT License

use clap::Parser;
use sqlrunner::cli::{Cli, Commands, Session};
use sqlrunner::log_error_with_context;
use sqlrunner::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Console logging always; JSON file logging only with --log-dir
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = cli.logging_config();
    let log_guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "SQL Runner - Sequential SQL script runner"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors, so flush the file log first
    drop(log_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    if let Commands::Init(args) = &cli.command {
        return args
            .execute(cli.folder.as_deref(), cli.connection_string.as_deref())
            .await;
    }

    let session = match Session::open(cli) {
        Ok(s) => s,
        Err(e) => {
            log_error_with_context!(e, "Failed to load configuration");
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            return Ok(2); // Configuration error exit code
        }
    };

    let result = match &cli.command {
        Commands::List(args) => args.execute(&session).await,
        Commands::TestConnection(args) => args.execute(&session).await,
        Commands::Run(args) => args.execute(&session).await,
        Commands::Init(_) => unreachable!("init is handled before the session opens"),
    };

    // Saved at shutdown, as the last step of every command
    Ok(session.finish(result))
}
