//! PostgreSQL database integration
//!
//! Executes scripts through `tokio-postgres` and captures server notices.

pub mod client;

pub use client::PostgresExecutor;
