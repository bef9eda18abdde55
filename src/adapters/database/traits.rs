//! Database abstraction traits
//!
//! The executor only needs two things from a database: a way to check that a
//! connection can be opened, and a way to run one script as a single batch
//! while collecting whatever the server says along the way.

use crate::domain::{Result, ScriptFailure, ServerMessage};
use async_trait::async_trait;

/// Everything a single batch produced
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Server messages in the order they arrived
    pub messages: Vec<ServerMessage>,

    /// Set when the batch did not complete
    pub failure: Option<ScriptFailure>,
}

impl BatchOutcome {
    /// Batch completed
    pub fn succeeded(messages: Vec<ServerMessage>) -> Self {
        Self {
            messages,
            failure: None,
        }
    }

    /// Batch failed after the server emitted `messages`
    pub fn failed(messages: Vec<ServerMessage>, failure: ScriptFailure) -> Self {
        Self {
            messages,
            failure: Some(failure),
        }
    }

    /// Whether the batch completed
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Executes SQL batches against a database
///
/// Implementations open a fresh connection per call; nothing is shared
/// between two batches.
#[async_trait]
pub trait BatchExecutor: Send + Sync {
    /// Test the database connection
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be opened or a trivial query
    /// fails.
    async fn test_connection(&self) -> Result<()>;

    /// Execute `sql` as one batch
    ///
    /// Never returns an error: connection and execution failures are
    /// reported through [`BatchOutcome::failure`] so the caller can keep going.
    async fn execute_batch(&self, sql: &str) -> BatchOutcome;

    /// Human-readable target description, safe to log
    fn describe(&self) -> String;
}
