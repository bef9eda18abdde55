//! Executor that never touches a database
//!
//! Used by `run --dry-run` to walk the queue (ordering, missing files,
//! unreadable files, progress) without sending anything to the server.

use super::traits::{BatchExecutor, BatchOutcome};
use crate::domain::{Result, ServerMessage};
use async_trait::async_trait;

/// Accepts every batch without executing it
#[derive(Debug, Clone, Default)]
pub struct DryRunExecutor;

impl DryRunExecutor {
    /// Creates a dry-run executor
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BatchExecutor for DryRunExecutor {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn execute_batch(&self, sql: &str) -> BatchOutcome {
        tracing::debug!(bytes = sql.len(), "Dry run: skipping batch");
        BatchOutcome::succeeded(vec![ServerMessage::new(
            "INFO",
            format!("dry run: {} bytes not executed", sql.len()),
        )])
    }

    fn describe(&self) -> String {
        "dry run (no database)".to_string()
    }
}
