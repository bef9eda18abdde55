//! Domain error types
//!
//! This module defines the error hierarchy for the script runner.
//! All errors are domain-specific and don't expose third-party types.

use std::path::PathBuf;
use thiserror::Error;

/// Main runner error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Script folder could not be enumerated
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Errors raised by the database while executing a batch
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Writing a log file failed
    #[error("Export error: {0}")]
    Export(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Error reported by the server for a failed batch
///
/// Carries the pieces PostgreSQL attaches to an error response so the
/// message log can show more than the one-line summary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{severity}: {message}")]
pub struct DatabaseError {
    /// Severity as sent by the server (usually `ERROR`)
    pub severity: String,

    /// SQLSTATE code, if the server supplied one
    pub code: Option<String>,

    /// Primary message
    pub message: String,

    /// Optional detail line
    pub detail: Option<String>,

    /// Optional hint line
    pub hint: Option<String>,
}

impl DatabaseError {
    /// Creates a database error with `ERROR` severity
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            severity: "ERROR".to_string(),
            code: None,
            message: message.into(),
            detail: None,
            hint: None,
        }
    }

    /// Sets the SQLSTATE code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the detail line
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the hint line
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Multi-line rendering used by the full message log
    pub fn detailed(&self) -> String {
        let mut out = match &self.code {
            Some(code) => format!("{} {}: {}", self.severity, code, self.message),
            None => format!("{}: {}", self.severity, self.message),
        };
        if let Some(detail) = &self.detail {
            out.push_str("\nDETAIL: ");
            out.push_str(detail);
        }
        if let Some(hint) = &self.hint {
            out.push_str("\nHINT: ");
            out.push_str(hint);
        }
        out
    }
}

/// Reason a single script failed
///
/// Failures are recorded in the run report and never stop the run.
#[derive(Debug, Clone, Error)]
pub enum ScriptFailure {
    /// Script exists but could not be read
    #[error("Failed to read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    /// Opening the connection for this script failed
    #[error("Failed to connect: {0}")]
    Connect(String),

    /// Server rejected the batch
    #[error("{0}")]
    Execution(DatabaseError),
}

impl ScriptFailure {
    /// Multi-line rendering used by the full message log
    pub fn detailed(&self) -> String {
        match self {
            ScriptFailure::Execution(err) => err.detailed(),
            other => other.to_string(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RunnerError {
    fn from(err: std::io::Error) -> Self {
        RunnerError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RunnerError {
    fn from(err: serde_json::Error) -> Self {
        RunnerError::Serialization(err.to_string())
    }
}

impl From<walkdir::Error> for RunnerError {
    fn from(err: walkdir::Error) -> Self {
        RunnerError::Discovery(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_error_display() {
        let err = RunnerError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_database_error_conversion() {
        let db_err = DatabaseError::new("syntax error at or near \"SELEC\"");
        let runner_err: RunnerError = db_err.into();
        assert!(matches!(runner_err, RunnerError::Database(_)));
    }

    #[test]
    fn test_database_error_display() {
        let err = DatabaseError::new("relation \"missing\" does not exist").with_code("42P01");
        assert_eq!(
            err.to_string(),
            "ERROR: relation \"missing\" does not exist"
        );
    }

    #[test]
    fn test_database_error_detailed() {
        let err = DatabaseError::new("duplicate key value violates unique constraint")
            .with_code("23505")
            .with_detail("Key (id)=(1) already exists.")
            .with_hint("Use ON CONFLICT");

        assert_eq!(
            err.detailed(),
            "ERROR 23505: duplicate key value violates unique constraint\n\
             DETAIL: Key (id)=(1) already exists.\n\
             HINT: Use ON CONFLICT"
        );
    }

    #[test]
    fn test_script_failure_detailed_falls_back_to_display() {
        let failure = ScriptFailure::Connect("connection refused".to_string());
        assert_eq!(failure.detailed(), "Failed to connect: connection refused");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let runner_err: RunnerError = io_err.into();
        assert!(matches!(runner_err, RunnerError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let runner_err: RunnerError = json_err.into();
        assert!(matches!(runner_err, RunnerError::Serialization(_)));
    }

    #[test]
    fn test_runner_error_implements_std_error() {
        let err = RunnerError::Discovery("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
