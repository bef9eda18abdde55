// SQL Runner - Sequential SQL script runner for PostgreSQL
// Copyright (c) 2025 SQL Runner Contributors
// Licensed under the MIT License

//! # SQL Runner
//!
//! SQL Runner takes a folder of `.sql` files and executes them one after
//! another against a PostgreSQL database, keeping a log of every server
//! message and every error along the way.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Discovering** `*.sql` files under a folder, sorted by file name
//! - **Executing** each file as a single batch on its own connection
//! - **Recording** server notices and failures in an error log and a full message log
//! - **Reporting** progress while the run is under way
//!
//! ## Architecture
//!
//! SQL Runner follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Discovery, sequential execution, progress and run reports
//! - [`adapters`] - Database integrations (PostgreSQL, dry run)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration file handling
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sqlrunner::adapters::database::create_batch_executor;
//! use sqlrunner::config::{executable_dir, ConfigStore};
//! use sqlrunner::core::{discover_scripts, SequentialExecutor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = ConfigStore::new("appConfig.json").load_or_init(&executable_dir())?;
//!
//!     // Find the scripts and run them in order
//!     let scripts = discover_scripts(&config.script_folder)?;
//!     let executor = create_batch_executor(&config, false)?;
//!     let report = SequentialExecutor::new(executor).run_scripts(scripts).await;
//!
//!     println!("{}", report.status_line());
//!     Ok(())
//! }
//! ```
//!
//! ## Run Semantics
//!
//! - A failing script is logged and counted; the next script still runs.
//! - A server notice whose text contains `ERROR` counts as an error too.
//! - A script deleted from disk before its turn stops the run.
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`], whose error type is
//! [`domain::RunnerError`]:
//!
//! ```rust,no_run
//! use sqlrunner::domain::RunnerError;
//!
//! fn example() -> Result<(), RunnerError> {
//!     let config = sqlrunner::config::load_config("appConfig.json")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! SQL Runner uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(total = 12, "Running scripts on database");
//! warn!(path = "002_seed.sql", "Server reported an error");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
