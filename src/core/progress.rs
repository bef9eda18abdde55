//! Progress notifications
//!
//! The executor reports progress over an unbounded channel so whatever is
//! showing progress (a terminal, a test) never blocks or is blocked by the
//! worker running the scripts.

use crate::core::report::RunOutcome;
use std::fmt;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Sending half handed to the executor
pub type ProgressSender = mpsc::UnboundedSender<ProgressEvent>;

/// Receiving half kept by whoever renders progress
pub type ProgressReceiver = mpsc::UnboundedReceiver<ProgressEvent>;

/// Creates a progress channel
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}

/// Something that happened during a run
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Run is starting with `total` scripts queued
    RunStarted { total: usize },

    /// Script number `index` (1-based) is about to run
    ScriptStarted {
        index: usize,
        total: usize,
        path: PathBuf,
    },

    /// Script number `index` (1-based) finished
    ScriptCompleted {
        index: usize,
        total: usize,
        percent: f64,
        failed: bool,
    },

    /// Script was gone when its turn came; nothing after it runs
    FileMissing { path: PathBuf },

    /// Run is over
    RunFinished { outcome: RunOutcome },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::RunStarted { total } => {
                write!(f, "Running {total} script(s) on database...")
            }
            ProgressEvent::ScriptStarted { path, .. } => {
                write!(f, "Running script: {}", path.display())
            }
            ProgressEvent::ScriptCompleted {
                index,
                total,
                percent,
                failed,
            } => {
                let mark = if *failed { " (errors)" } else { "" };
                write!(f, "[{index}/{total}] {percent:.2}%{mark}")
            }
            ProgressEvent::FileMissing { path } => {
                write!(f, "File does not exist: {}", path.display())
            }
            ProgressEvent::RunFinished { outcome } => match outcome {
                RunOutcome::Succeeded => write!(f, "Completed Successfully"),
                RunOutcome::CompletedWithErrors(n) => write!(f, "{n} Errors"),
                RunOutcome::Aborted { missing } => {
                    write!(f, "Aborted, file does not exist: {}", missing.display())
                }
            },
        }
    }
}
