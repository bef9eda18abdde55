//! Run results and logs
//!
//! A [`RunReport`] replaces the two global text buffers the runner used to
//! append to. It is built by one run and handed back to the caller, who can
//! print it or write the logs to disk.

use crate::domain::{Result, RunnerError, ScriptFailure, ServerMessage};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

/// Line written after each log entry
pub const LOG_SEPARATOR: &str =
    "----------------------------------------------------------------------------------------------------------";

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every script ran and nothing reported an error
    Succeeded,

    /// Every script ran, this many errors were recorded
    CompletedWithErrors(usize),

    /// A queued script disappeared; scripts after it were not run
    Aborted {
        /// The missing file
        missing: PathBuf,
    },
}

/// One entry in the error-only log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    /// Script the error belongs to
    pub path: PathBuf,

    /// Text shown to the operator
    pub message: String,
}

/// One entry in the full message log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    /// Text of the entry, possibly several lines
    pub text: String,

    /// Whether a separator line follows the entry
    pub separated: bool,
}

/// Result of one run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Identifier used in log spans
    pub run_id: Uuid,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock time of the run
    pub duration: Duration,

    /// Number of scripts queued
    pub total: usize,

    /// Number of scripts that were executed (successfully or not)
    pub processed: usize,

    /// Total errors: failed batches plus error-marked server messages
    pub error_count: usize,

    /// Error-only log, in order
    pub error_log: Vec<ErrorEntry>,

    /// Every server message and failure, in order
    pub message_log: Vec<MessageEntry>,

    /// Script that was missing when its turn came
    pub missing_file: Option<PathBuf>,
}

impl RunReport {
    /// Create an empty report for a run of `total` scripts
    pub fn new(total: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            duration: Duration::ZERO,
            total,
            processed: 0,
            error_count: 0,
            error_log: Vec::new(),
            message_log: Vec::new(),
            missing_file: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a script whose batch did not complete
    ///
    /// The error log gets the short form, the message log the detailed one
    /// without a separator.
    pub fn record_failure(&mut self, path: &Path, failure: &ScriptFailure) {
        self.error_count += 1;
        self.error_log.push(ErrorEntry {
            path: path.to_path_buf(),
            message: format!("Error in file: {}\n{}", path.display(), failure),
        });
        self.message_log.push(MessageEntry {
            text: format!("Error in file: {}\n{}", path.display(), failure.detailed()),
            separated: false,
        });
    }

    /// Record a message the server emitted while running `path`
    ///
    /// Messages carrying the error marker also count as errors.
    pub fn record_message(&mut self, path: &Path, message: &ServerMessage) {
        let text = message.to_string();
        if message.is_error() {
            self.error_count += 1;
            self.error_log.push(ErrorEntry {
                path: path.to_path_buf(),
                message: text.clone(),
            });
        }
        self.message_log.push(MessageEntry {
            text,
            separated: true,
        });
    }

    /// Record that `path` was missing and the run stopped
    pub fn record_missing(&mut self, path: &Path) {
        self.missing_file = Some(path.to_path_buf());
    }

    /// How the run ended
    pub fn outcome(&self) -> RunOutcome {
        if let Some(missing) = &self.missing_file {
            RunOutcome::Aborted {
                missing: missing.clone(),
            }
        } else if self.error_count > 0 {
            RunOutcome::CompletedWithErrors(self.error_count)
        } else {
            RunOutcome::Succeeded
        }
    }

    /// Whether every script ran without errors
    pub fn is_successful(&self) -> bool {
        self.outcome() == RunOutcome::Succeeded
    }

    /// One-line status for the operator
    pub fn status_line(&self) -> String {
        match self.outcome() {
            RunOutcome::Succeeded => "Completed Successfully".to_string(),
            RunOutcome::CompletedWithErrors(n) => format!("{n} Errors"),
            RunOutcome::Aborted { missing } => {
                format!("File does not exist: {}", missing.display())
            }
        }
    }

    /// Error log as plain text
    pub fn error_log_text(&self) -> String {
        render(self.error_log.iter().map(|e| (e.message.as_str(), true)))
    }

    /// Full message log as plain text
    pub fn message_log_text(&self) -> String {
        render(
            self.message_log
                .iter()
                .map(|e| (e.text.as_str(), e.separated)),
        )
    }

    /// Write the full message log to `path`
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Export`] if the file cannot be written
    pub fn export_message_log(&self, path: impl AsRef<Path>) -> Result<()> {
        write_log(path.as_ref(), &self.message_log_text())
    }

    /// Write the error log to `path`
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Export`] if the file cannot be written
    pub fn export_error_log(&self, path: impl AsRef<Path>) -> Result<()> {
        write_log(path.as_ref(), &self.error_log_text())
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            total = self.total,
            processed = self.processed,
            errors = self.error_count,
            duration_ms = self.duration.as_millis() as u64,
            status = %self.status_line(),
            "Run summary"
        );
    }
}

fn render<'a>(entries: impl Iterator<Item = (&'a str, bool)>) -> String {
    let mut out = String::new();
    for (entry, separated) in entries {
        out.push_str(entry);
        out.push('\n');
        if separated {
            out.push_str(LOG_SEPARATOR);
            out.push('\n');
        }
    }
    out
}

fn write_log(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| {
        RunnerError::Export(format!("Failed to write log {}: {}", path.display(), e))
    })?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "Log exported");
    Ok(())
}

/// Percentage of `completed` out of `total`, rounded to two decimals
///
/// Halves round up. Rounding happens on integers, so a value like 14.375
/// is never nudged below the midpoint first. Returns `100.0` for an empty run.
pub fn progress_percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let (completed, total) = (completed as u128, total as u128);
    let hundredths = (completed * 20_000 + total) / (2 * total);
    hundredths as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DatabaseError;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test_case(0, 3, 0.0)]
    #[test_case(1, 3, 33.33)]
    #[test_case(2, 3, 66.67)]
    #[test_case(3, 3, 100.0)]
    #[test_case(1, 7, 14.29)]
    #[test_case(0, 0, 100.0)]
    #[test_case(23, 160, 14.38)]
    #[test_case(41, 160, 25.63)]
    #[test_case(1, 8, 12.5)]
    fn test_progress_percent(completed: usize, total: usize, expected: f64) {
        assert_eq!(progress_percent(completed, total), expected);
    }

    #[test]
    fn test_new_report_is_successful() {
        let report = RunReport::new(0);
        assert!(report.is_successful());
        assert_eq!(report.status_line(), "Completed Successfully");
        assert_eq!(report.error_log_text(), "");
    }

    #[test]
    fn test_record_failure_writes_both_logs() {
        let mut report = RunReport::new(1);
        let failure = ScriptFailure::Execution(
            DatabaseError::new("syntax error at or near \"SELEC\"").with_code("42601"),
        );

        report.record_failure(Path::new("a/001.sql"), &failure);

        assert_eq!(report.error_count, 1);
        assert_eq!(
            report.error_log_text(),
            format!("Error in file: a/001.sql\nERROR: syntax error at or near \"SELEC\"\n{LOG_SEPARATOR}\n")
        );
        assert_eq!(
            report.message_log_text(),
            "Error in file: a/001.sql\nERROR 42601: syntax error at or near \"SELEC\"\n"
        );
        assert_eq!(report.outcome(), RunOutcome::CompletedWithErrors(1));
        assert_eq!(report.status_line(), "1 Errors");
    }

    #[test]
    fn test_record_message_only_counts_error_marker() {
        let mut report = RunReport::new(1);
        let path = Path::new("001.sql");

        report.record_message(path, &ServerMessage::new("NOTICE", "relation exists, skipping"));
        report.record_message(path, &ServerMessage::new("NOTICE", "ERROR: nested step failed"));

        assert_eq!(report.error_count, 1);
        assert_eq!(report.error_log.len(), 1);
        assert_eq!(report.message_log.len(), 2);
        assert_eq!(report.error_log[0].path, PathBuf::from("001.sql"));
    }

    #[test]
    fn test_message_log_separates_notices_but_not_failures() {
        let mut report = RunReport::new(1);
        let path = Path::new("001.sql");

        report.record_message(path, &ServerMessage::new("NOTICE", "creating table"));
        report.record_failure(
            path,
            &ScriptFailure::Execution(DatabaseError::new("boom").with_code("42601")),
        );

        assert_eq!(
            report.message_log_text(),
            format!("NOTICE: creating table\n{LOG_SEPARATOR}\nError in file: 001.sql\nERROR 42601: boom\n")
        );
    }

    #[test]
    fn test_missing_file_outcome_wins() {
        let mut report = RunReport::new(2);
        report.record_failure(Path::new("1.sql"), &ScriptFailure::Connect("refused".to_string()));
        report.record_missing(Path::new("2.sql"));

        assert_eq!(
            report.outcome(),
            RunOutcome::Aborted {
                missing: PathBuf::from("2.sql")
            }
        );
        assert_eq!(report.status_line(), "File does not exist: 2.sql");
        assert!(!report.is_successful());
    }

    #[test]
    fn test_export_message_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Message Log.txt");

        let mut report = RunReport::new(1);
        report.record_message(Path::new("1.sql"), &ServerMessage::new("INFO", "done"));
        report.export_message_log(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, format!("INFO: done\n{LOG_SEPARATOR}\n"));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let report = RunReport::new(0);
        let result = report.export_error_log(dir.path().join("no/such/dir/log.txt"));
        assert!(matches!(result, Err(RunnerError::Export(_))));
    }

    #[test]
    fn test_separator_width() {
        assert_eq!(LOG_SEPARATOR.len(), 106);
    }
}
