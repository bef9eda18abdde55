//! Configuration loading, persistence and environment overrides
//!
//! The config file is read at startup and written back at shutdown. A missing
//! file is not an error: a default configuration is created and saved so the
//! operator has something to edit.

use super::schema::AppConfig;
use crate::config::secret_string;
use crate::domain::errors::RunnerError;
use crate::domain::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// File name used when no explicit config path is given
pub const CONFIG_FILE_NAME: &str = "appConfig.json";

/// Environment variable overriding the connection string for one invocation
pub const ENV_CONNECTION_STRING: &str = "SQLRUNNER_CONNECTION_STRING";

/// Environment variable overriding the script folder for one invocation
pub const ENV_SCRIPT_FOLDER: &str = "SQLRUNNER_SCRIPT_FOLDER";

/// Directory containing the running executable
///
/// Falls back to the current directory when the executable path cannot be
/// determined.
pub fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default config file location: next to the executable
pub fn default_config_path() -> PathBuf {
    executable_dir().join(CONFIG_FILE_NAME)
}

/// Reads and writes the persisted configuration file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration, creating a default file when none exists
    ///
    /// # Arguments
    ///
    /// * `exe_dir` - Directory the default script folder is derived from
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the default file cannot be written.
    pub fn load_or_init(&self, exe_dir: &Path) -> Result<AppConfig> {
        if self.path.exists() {
            return load_config(&self.path);
        }

        tracing::info!(
            path = %self.path.display(),
            "Configuration file not found, creating default"
        );
        let config = AppConfig::default_for(exe_dir);
        self.save(&config)?;
        Ok(config)
    }

    /// Writes the configuration to the backing file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        save_config(&self.path, config)
    }
}

/// Loads configuration from a JSON file
///
/// # Errors
///
/// Returns an error if:
/// - File does not exist or cannot be read
/// - JSON parsing fails
///
/// # Examples
///
/// ```no_run
/// use sqlrunner::config::loader::load_config;
///
/// let config = load_config("appConfig.json").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RunnerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RunnerError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Editors on Windows like to prepend a BOM
    let contents = contents.trim_start_matches('\u{feff}');

    let config: AppConfig = serde_json::from_str(contents).map_err(|e| {
        RunnerError::Configuration(format!(
            "Failed to parse configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(
        path = %path.display(),
        script_folder = %config.script_folder.display(),
        "Configuration loaded"
    );

    Ok(config)
}

/// Saves configuration as a JSON file
///
/// # Errors
///
/// Returns an error if serialization or the write fails
pub fn save_config(path: impl AsRef<Path>, config: &AppConfig) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string(config)?;

    fs::write(path, json).map_err(|e| {
        RunnerError::Configuration(format!(
            "Failed to write configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(path = %path.display(), "Configuration saved");
    Ok(())
}

/// Returns a copy of `config` with `SQLRUNNER_*` environment overrides applied
///
/// The overrides only affect the current invocation; callers persist the
/// original value, so credentials passed through the environment never end
/// up in the file.
pub fn with_env_overrides(config: &AppConfig) -> AppConfig {
    let mut effective = config.clone();

    if let Ok(val) = std::env::var(ENV_CONNECTION_STRING) {
        effective.connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var(ENV_SCRIPT_FOLDER) {
        effective.script_folder = PathBuf::from(val);
    }

    effective
}
