//! Configuration schema types
//!
//! The persisted file holds exactly two settings, with the field names the
//! file has always used:
//!
//! ```json
//! {"ConnectionString":"host=localhost dbname=postgres user=postgres","ScriptFolder":"/srv/sql"}
//! ```
//!
//! Logging is configured per invocation and is never written to the file.

use crate::config::{secret_string, SecretString};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Connection string written into a freshly created config file
pub const DEFAULT_CONNECTION_STRING: &str = "host=localhost dbname=postgres user=postgres";

/// Persisted application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Connection string handed to the database driver
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(rename = "ConnectionString", default = "default_connection_string")]
    pub connection_string: SecretString,

    /// Root folder scanned for `*.sql` files
    #[serde(rename = "ScriptFolder", default)]
    pub script_folder: PathBuf,
}

impl AppConfig {
    /// Creates a configuration from its two settings
    pub fn new(connection_string: impl Into<String>, script_folder: impl Into<PathBuf>) -> Self {
        Self {
            connection_string: secret_string(connection_string.into()),
            script_folder: script_folder.into(),
        }
    }

    /// Default configuration for a program installed in `exe_dir`
    ///
    /// Scripts are expected one level above the program's own directory.
    pub fn default_for(exe_dir: &Path) -> Self {
        let script_folder = exe_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| exe_dir.to_path_buf());
        Self::new(DEFAULT_CONNECTION_STRING, script_folder)
    }

    /// Whether a connection string has been provided
    pub fn has_connection_string(&self) -> bool {
        !self.connection_string.expose_secret().is_blank()
    }

    /// Validates the settings needed to run scripts
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        if !self.has_connection_string() {
            return Err("No connection string specified".to_string());
        }

        if self.script_folder.as_os_str().is_empty() {
            return Err("No script folder specified".to_string());
        }

        Ok(())
    }
}

/// Logging configuration
///
/// Built from command-line flags for each invocation.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Write JSON logs to a rolling file in addition to the console
    pub local_enabled: bool,

    /// Directory for the rolling log file
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    pub local_rotation: String,
}

impl LoggingConfig {
    /// Console-only logging
    pub fn console() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }

    /// Console plus a daily-rotated file in `dir`
    pub fn with_file(dir: impl Into<String>) -> Self {
        Self {
            local_enabled: true,
            local_path: dir.into(),
            local_rotation: default_local_rotation(),
        }
    }

    /// Use another rotation policy for the file log
    pub fn with_rotation(mut self, rotation: impl Into<String>) -> Self {
        self.local_rotation = rotation.into();
        self
    }

    /// Validates the logging configuration
    pub fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::console()
    }
}

// Default value functions
fn default_connection_string() -> SecretString {
    secret_string(String::new())
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
