//! Batch executor factory
//!
//! Picks the executor implementation for an invocation.

use crate::adapters::database::dry_run::DryRunExecutor;
use crate::adapters::database::traits::BatchExecutor;
use crate::adapters::postgresql::PostgresExecutor;
use crate::config::AppConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create a batch executor for the configuration
///
/// # Arguments
///
/// * `config` - Effective configuration for this invocation
/// * `dry_run` - Skip the database entirely
///
/// # Errors
///
/// Returns an error if the connection string cannot be parsed
pub fn create_batch_executor(
    config: &AppConfig,
    dry_run: bool,
) -> Result<Arc<dyn BatchExecutor>> {
    if dry_run {
        tracing::info!("Creating dry-run executor");
        return Ok(Arc::new(DryRunExecutor::new()));
    }

    let executor = PostgresExecutor::new(config.connection_string.clone())?;
    tracing::info!(target_db = %executor.describe(), "Creating PostgreSQL executor");
    Ok(Arc::new(executor))
}
