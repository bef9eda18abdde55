//! Domain models and types for the script runner.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Scripts** ([`ScriptFile`]) as produced by discovery
//! - **Server output** ([`ServerMessage`]) captured while a batch runs
//! - **Error types** ([`RunnerError`], [`DatabaseError`], [`ScriptFailure`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, RunnerError>`]:
//!
//! ```rust
//! use sqlrunner::domain::{Result, ScriptFile};
//!
//! fn example() -> Result<Vec<ScriptFile>> {
//!     sqlrunner::core::discovery::discover_scripts("./scripts")
//! }
//! ```

pub mod errors;
pub mod message;
pub mod result;
pub mod script;

pub use errors::{DatabaseError, RunnerError, ScriptFailure};
pub use message::{ServerMessage, ERROR_MARKER};
pub use result::Result;
pub use script::ScriptFile;
