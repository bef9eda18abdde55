//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - Configurable log levels
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use sqlrunner::logging::init_logging;
//! use sqlrunner::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a script
///
/// # Example
///
/// ```no_run
/// use sqlrunner::log_script_start;
/// use std::path::Path;
///
/// log_script_start!(1, 12, Path::new("001_schema.sql").display());
/// ```
#[macro_export]
macro_rules! log_script_start {
    ($index:expr, $total:expr, $path:expr) => {
        tracing::info!(
            index = $index,
            total = $total,
            path = %$path,
            "Running script"
        );
    };
}

/// Log a failed script
///
/// # Example
///
/// ```no_run
/// use sqlrunner::log_script_failed;
///
/// log_script_failed!("002_data.sql", "ERROR: syntax error at or near \"INSRT\"");
/// ```
#[macro_export]
macro_rules! log_script_failed {
    ($path:expr, $error:expr) => {
        tracing::warn!(
            path = %$path,
            error = %$error,
            "Script failed"
        );
    };
}

/// Log the completion of a run
///
/// # Example
///
/// ```no_run
/// use sqlrunner::log_run_complete;
/// use std::time::Duration;
///
/// log_run_complete!(10, 12, 1, Duration::from_secs(4));
/// ```
#[macro_export]
macro_rules! log_run_complete {
    ($processed:expr, $total:expr, $errors:expr, $duration:expr) => {
        tracing::info!(
            processed = $processed,
            total = $total,
            errors = $errors,
            duration_ms = $duration.as_millis(),
            "Run completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use sqlrunner::log_error_with_context;
/// use sqlrunner::domain::RunnerError;
///
/// let error = RunnerError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
