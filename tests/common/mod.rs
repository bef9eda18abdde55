//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use sqlrunner::adapters::database::{BatchExecutor, BatchOutcome};
use sqlrunner::domain::{DatabaseError, Result, ScriptFailure, ServerMessage};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// In-memory stand-in for a database server
///
/// - SQL starting with `SELEC ` fails with a syntax error
/// - `RAISE NOTICE` yields a NOTICE message
/// - `RAISE WARNING 'ERROR ...'` yields a WARNING whose text carries the error marker
#[derive(Default)]
pub struct FakeServer {
    pub executed: Mutex<Vec<String>>,
}

impl FakeServer {
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl BatchExecutor for FakeServer {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn execute_batch(&self, sql: &str) -> BatchOutcome {
        self.executed.lock().unwrap().push(sql.trim().to_string());

        let mut messages = Vec::new();
        if sql.contains("RAISE NOTICE") {
            messages.push(ServerMessage::new("NOTICE", "hello from script").with_code("00000"));
        }
        if sql.contains("RAISE WARNING 'ERROR") {
            messages.push(ServerMessage::new("WARNING", "ERROR in nested call").with_code("01000"));
        }

        if sql.trim_start().starts_with("SELEC ") {
            let err = DatabaseError::new("syntax error at or near \"SELEC\"").with_code("42601");
            return BatchOutcome::failed(messages, ScriptFailure::Execution(err));
        }
        BatchOutcome::succeeded(messages)
    }

    fn describe(&self) -> String {
        "fake server".to_string()
    }
}

/// Write `sql` to `root/relative`, creating parent directories
pub fn write_script(root: &Path, relative: &str, sql: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, sql).unwrap();
    path
}
