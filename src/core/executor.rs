//! Sequential script executor
//!
//! Runs scripts strictly one after another. Each script is read in full and
//! sent to the database as one batch on its own connection. A failing script
//! is recorded and the run moves on; a script that has vanished from disk
//! stops the run, since later scripts usually depend on earlier ones.

use crate::adapters::database::traits::BatchExecutor;
use crate::core::progress::{ProgressEvent, ProgressSender};
use crate::core::report::{progress_percent, RunReport};
use crate::domain::{ScriptFailure, ScriptFile};
use crate::{log_run_complete, log_script_failed, log_script_start};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Result of reading a queued script from disk
enum ScriptSource {
    Loaded(String),
    Missing,
    Unreadable(ScriptFailure),
}

/// Runs a queue of scripts against a [`BatchExecutor`]
///
/// # Example
///
/// ```rust,no_run
/// use sqlrunner::adapters::database::DryRunExecutor;
/// use sqlrunner::core::executor::SequentialExecutor;
/// use sqlrunner::core::progress::progress_channel;
/// use std::sync::Arc;
///
/// # async fn example() {
/// let (tx, mut rx) = progress_channel();
/// let worker = SequentialExecutor::new(Arc::new(DryRunExecutor::new()))
///     .with_progress(tx)
///     .spawn(vec!["001.sql".into(), "002.sql".into()]);
///
/// while let Some(event) = rx.recv().await {
///     println!("{event}");
/// }
/// let report = worker.await.unwrap();
/// println!("{}", report.status_line());
/// # }
/// ```
pub struct SequentialExecutor {
    executor: Arc<dyn BatchExecutor>,
    progress: Option<ProgressSender>,
}

impl SequentialExecutor {
    /// Create an executor that runs batches through `executor`
    pub fn new(executor: Arc<dyn BatchExecutor>) -> Self {
        Self {
            executor,
            progress: None,
        }
    }

    /// Report progress on `sender`
    pub fn with_progress(mut self, sender: ProgressSender) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Run discovered scripts in their sorted order
    pub async fn run_scripts(self, scripts: Vec<ScriptFile>) -> RunReport {
        self.run(scripts.into_iter().map(ScriptFile::into_path).collect())
            .await
    }

    /// Run the scripts on a background task
    ///
    /// The task owns the executor and its report until it finishes; the
    /// progress receiver is the only thing shared with the caller.
    pub fn spawn(self, paths: Vec<PathBuf>) -> JoinHandle<RunReport> {
        tokio::spawn(self.run(paths))
    }

    /// Run `paths` in the given order
    ///
    /// Never fails: per-script problems end up in the report.
    pub async fn run(self, paths: Vec<PathBuf>) -> RunReport {
        let report = RunReport::new(paths.len());
        let span = tracing::info_span!(
            "run",
            run_id = %report.run_id,
            total = paths.len(),
            target_db = %self.executor.describe()
        );

        self.run_inner(paths, report).instrument(span).await
    }

    async fn run_inner(self, paths: Vec<PathBuf>, mut report: RunReport) -> RunReport {
        let start = Instant::now();
        let total = paths.len();

        tracing::info!("Running scripts on database");
        self.notify(ProgressEvent::RunStarted { total });

        for (position, path) in paths.iter().enumerate() {
            let index = position + 1;

            let sql = match read_script(path).await {
                ScriptSource::Loaded(sql) => Some(sql),
                ScriptSource::Missing => {
                    tracing::error!(
                        path = %path.display(),
                        remaining = total - position,
                        "Script no longer exists, aborting run"
                    );
                    report.record_missing(path);
                    self.notify(ProgressEvent::FileMissing { path: path.clone() });
                    break;
                }
                ScriptSource::Unreadable(failure) => {
                    log_script_failed!(path.display(), failure);
                    report.record_failure(path, &failure);
                    None
                }
            };

            let errors_before = report.error_count;

            if let Some(sql) = sql {
                log_script_start!(index, total, path.display());
                self.notify(ProgressEvent::ScriptStarted {
                    index,
                    total,
                    path: path.clone(),
                });

                self.execute_one(path, &sql, &mut report).await;
            }

            report.processed += 1;
            self.notify(ProgressEvent::ScriptCompleted {
                index,
                total,
                percent: progress_percent(index, total),
                failed: report.error_count > errors_before,
            });
        }

        let report = report.with_duration(start.elapsed());
        log_run_complete!(report.processed, total, report.error_count, report.duration);
        self.notify(ProgressEvent::RunFinished {
            outcome: report.outcome(),
        });

        report
    }

    async fn execute_one(&self, path: &Path, sql: &str, report: &mut RunReport) {
        let outcome = self.executor.execute_batch(sql).await;

        // Notices arrive while the batch runs, so they precede the failure
        for message in &outcome.messages {
            if message.is_error() {
                tracing::warn!(path = %path.display(), message = %message, "Server reported an error");
            }
            report.record_message(path, message);
        }

        match &outcome.failure {
            Some(failure) => {
                log_script_failed!(path.display(), failure);
                report.record_failure(path, failure);
            }
            None => {
                tracing::debug!(
                    path = %path.display(),
                    messages = outcome.messages.len(),
                    "Script executed"
                );
            }
        }
    }

    fn notify(&self, event: ProgressEvent) {
        if let Some(sender) = &self.progress {
            // Nobody listening is fine, the report still has everything
            let _ = sender.send(event);
        }
    }
}

async fn read_script(path: &Path) -> ScriptSource {
    match tokio::fs::read_to_string(path).await {
        Ok(sql) => ScriptSource::Loaded(sql),
        Err(e) if e.kind() == ErrorKind::NotFound => ScriptSource::Missing,
        Err(e) => ScriptSource::Unreadable(ScriptFailure::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}
