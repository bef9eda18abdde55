//! Test-connection command implementation
//!
//! Opens a connection with the effective connection string and runs
//! `SELECT 1`. The outcome is reported as status text only.

use crate::adapters::database::BatchExecutor;
use crate::adapters::postgresql::PostgresExecutor;
use crate::cli::Session;
use clap::Args;

/// Arguments for the test-connection command
#[derive(Args, Debug)]
pub struct TestConnectionArgs {}

impl TestConnectionArgs {
    /// Execute the test-connection command
    pub async fn execute(&self, session: &Session) -> anyhow::Result<i32> {
        let config = session.config();

        if !config.has_connection_string() {
            tracing::warn!("No connection string specified");
            println!("Status: No connection string specified");
            return Ok(2); // Configuration error exit code
        }

        let executor = match PostgresExecutor::new(config.connection_string.clone()) {
            Ok(e) => e,
            Err(e) => {
                tracing::error!(error = %e, "Invalid connection string");
                println!("Status: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        tracing::info!(target_db = %executor.connection_string_safe(), "Testing connection");

        match executor.test_connection().await {
            Ok(()) => {
                println!("Status: Connection Successful");
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Connection test failed");
                println!("Status: {e}");
                Ok(4) // Connection error exit code
            }
        }
    }
}
