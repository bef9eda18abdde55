//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.
//!
//! Exit codes:
//! - 0 success
//! - 1 run completed with script errors
//! - 2 configuration or discovery error
//! - 3 run aborted because a script went missing
//! - 4 connection error
//! - 5 fatal error

pub mod commands;
pub mod session;

pub use session::Session;

use crate::config::LoggingConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SQL Runner - run a folder of SQL scripts in order
#[derive(Parser, Debug)]
#[command(name = "sqlrunner")]
#[command(version, about, long_about = None)]
#[command(author = "SQL Runner Contributors")]
pub struct Cli {
    /// Path to configuration file (default: appConfig.json next to the executable)
    #[arg(short, long, env = "SQLRUNNER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SQLRUNNER_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Also write JSON logs to a rotated file in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// Rotation of the file log (daily, hourly, never)
    #[arg(long, global = true, value_parser = ["daily", "hourly", "never"])]
    pub log_rotation: Option<String>,

    /// Script folder to use instead of the configured one
    #[arg(short, long, global = true)]
    pub folder: Option<PathBuf>,

    /// Connection string to use instead of the configured one
    #[arg(long, global = true)]
    pub connection_string: Option<String>,

    /// Don't write the configuration back on exit
    #[arg(long, global = true)]
    pub no_save: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Logging setup requested on the command line
    ///
    /// Console logging is always on; `--log-dir` adds the JSON file log.
    pub fn logging_config(&self) -> LoggingConfig {
        let config = match &self.log_dir {
            Some(dir) => LoggingConfig::with_file(dir.clone()),
            None => LoggingConfig::console(),
        };
        match &self.log_rotation {
            Some(rotation) => config.with_rotation(rotation.clone()),
            None => config,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the scripts that would be run, in order
    List(commands::list::ListArgs),

    /// Open a connection and run a trivial query
    TestConnection(commands::test_connection::TestConnectionArgs),

    /// Run all scripts in order
    Run(commands::run::RunArgs),

    /// Write a default configuration file
    Init(commands::init::InitArgs),
}
