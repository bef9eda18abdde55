//! Result type alias for the runner

use super::errors::RunnerError;

/// Result type alias for runner operations
///
/// # Examples
///
/// ```
/// use sqlrunner::domain::result::Result;
/// use sqlrunner::domain::errors::RunnerError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RunnerError::Configuration("Missing folder".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RunnerError>;
