//! Core logic of the script runner.
//!
//! # Modules
//!
//! - [`discovery`] - Find `*.sql` files under a folder
//! - [`executor`] - Run scripts one by one and collect results
//! - [`progress`] - Progress events sent while a run is under way
//! - [`report`] - Run results, error log and message log
//!
//! # Workflow
//!
//! 1. **Discover**: walk the script folder, sort by file name
//! 2. **Execute**: for each script, read it and run it as one batch
//! 3. **Record**: server messages and failures go into the report
//! 4. **Report**: status line, error log, optional log export
//!
//! # Example
//!
//! ```rust,no_run
//! use sqlrunner::adapters::database::create_batch_executor;
//! use sqlrunner::config::AppConfig;
//! use sqlrunner::core::discovery::discover_scripts;
//! use sqlrunner::core::executor::SequentialExecutor;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::new("host=localhost user=postgres", "./sql");
//! let scripts = discover_scripts(&config.script_folder)?;
//! let executor = create_batch_executor(&config, false)?;
//!
//! let report = SequentialExecutor::new(executor).run_scripts(scripts).await;
//!
//! println!("{}", report.status_line());
//! print!("{}", report.error_log_text());
//! # Ok(())
//! # }
//! ```

pub mod discovery;
pub mod executor;
pub mod progress;
pub mod report;

pub use discovery::discover_scripts;
pub use executor::SequentialExecutor;
pub use progress::{progress_channel, ProgressEvent};
pub use report::{progress_percent, ErrorEntry, MessageEntry, RunOutcome, RunReport};
