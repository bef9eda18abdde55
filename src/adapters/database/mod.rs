//! Database abstraction layer
//!
//! This module provides a trait-based abstraction for running SQL batches,
//! so the executor can be driven by PostgreSQL, a dry run, or a test double.

pub mod dry_run;
pub mod factory;
pub mod traits;

pub use dry_run::DryRunExecutor;
pub use factory::create_batch_executor;
pub use traits::{BatchExecutor, BatchOutcome};
