//! External system integrations.
//!
//! - [`database`] - Batch execution abstraction (trait-based) plus the dry-run executor
//! - [`postgresql`] - PostgreSQL implementation
//!
//! # Design Pattern
//!
//! Adapters isolate the database driver behind [`database::BatchExecutor`] so
//! the executor can be tested with an in-memory implementation.
//!
//! ```rust,no_run
//! use sqlrunner::adapters::database::BatchExecutor;
//! use sqlrunner::adapters::postgresql::PostgresExecutor;
//! use sqlrunner::config::secret_string;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = PostgresExecutor::new(secret_string(
//!     "host=localhost user=postgres dbname=postgres".to_string(),
//! ))?;
//!
//! executor.test_connection().await?;
//! let outcome = executor.execute_batch("CREATE TABLE IF NOT EXISTS t (id int);").await;
//! for message in &outcome.messages {
//!     println!("{message}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod postgresql;
