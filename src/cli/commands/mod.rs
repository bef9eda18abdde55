//! CLI command implementations
//!
//! Each command returns its process exit code; see [`crate::cli`] for the
//! meaning of each code.

pub mod init;
pub mod list;
pub mod run;
pub mod test_connection;
