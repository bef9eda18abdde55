//! Configuration lifecycle for one invocation
//!
//! Loads the config file at startup, applies command-line and environment
//! overrides, and writes the file back when the command is done.

use super::Cli;
use crate::config::{
    default_config_path, executable_dir, redact_connection_string, secret_string,
    with_env_overrides, AppConfig, ConfigStore,
};
use crate::domain::Result;
use crate::log_error_with_context;
use secrecy::ExposeSecret;

/// Loaded configuration plus where to save it
pub struct Session {
    store: ConfigStore,

    /// What gets written back: file contents plus command-line overrides
    persisted: AppConfig,

    /// What the command uses: `persisted` plus environment overrides
    effective: AppConfig,

    save_on_close: bool,
}

impl Session {
    /// Load (or create) the config file named by `cli`
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is unreadable or invalid JSON,
    /// or if a default file cannot be created.
    pub fn open(cli: &Cli) -> Result<Self> {
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        let store = ConfigStore::new(path);
        let loaded = store.load_or_init(&executable_dir())?;

        Ok(Self::from_loaded(
            store,
            loaded,
            cli.folder.clone(),
            cli.connection_string.clone(),
            !cli.no_save,
        ))
    }

    pub(crate) fn from_loaded(
        store: ConfigStore,
        mut persisted: AppConfig,
        folder: Option<std::path::PathBuf>,
        connection_string: Option<String>,
        save_on_close: bool,
    ) -> Self {
        if let Some(folder) = folder {
            tracing::info!(folder = %folder.display(), "Overriding script folder from CLI");
            persisted.script_folder = folder;
        }
        if let Some(conn) = connection_string {
            tracing::info!(
                connection_string = %redact_connection_string(&conn),
                "Overriding connection string from CLI"
            );
            persisted.connection_string = secret_string(conn);
        }

        let effective = with_env_overrides(&persisted);
        tracing::debug!(
            config_path = %store.path().display(),
            script_folder = %effective.script_folder.display(),
            connection_string = %redact_connection_string(
                effective.connection_string.expose_secret().as_str()
            ),
            "Effective configuration"
        );

        Self {
            store,
            persisted,
            effective,
            save_on_close,
        }
    }

    /// Configuration the command should use
    pub fn config(&self) -> &AppConfig {
        &self.effective
    }

    /// Save the configuration unless saving was disabled
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn close(self) -> Result<()> {
        if !self.save_on_close {
            tracing::debug!("Skipping configuration save (--no-save)");
            return Ok(());
        }
        self.store.save(&self.persisted)
    }

    /// Turn a command result into the exit code, saving the configuration
    ///
    /// A command error is fatal (5). The configuration is saved either way;
    /// a failed save turns success into 5 and leaves other codes alone.
    pub fn finish(self, result: anyhow::Result<i32>) -> i32 {
        let code = match result {
            Ok(code) => code,
            Err(e) => {
                tracing::error!(error = %e, "Command execution failed");
                eprintln!("Error: {e}");
                5 // Fatal error exit code
            }
        };

        if let Err(e) = self.close() {
            log_error_with_context!(e, "Failed to save configuration");
            eprintln!("Failed to save configuration: {e}");
            return if code == 0 { 5 } else { code };
        }
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_are_saved_on_close() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("appConfig.json"));
        let loaded = AppConfig::new("host=old", "/old");

        let session = Session::from_loaded(
            store.clone(),
            loaded,
            Some(PathBuf::from("/new")),
            Some("host=new".to_string()),
            true,
        );
        assert_eq!(session.config().script_folder, PathBuf::from("/new"));
        session.close().unwrap();

        let saved = load_config(store.path()).unwrap();
        assert_eq!(saved.script_folder, PathBuf::from("/new"));
        assert_eq!(saved.connection_string.expose_secret().as_str(), "host=new");
    }

    #[test]
    fn test_no_save_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("appConfig.json"));

        let session = Session::from_loaded(
            store.clone(),
            AppConfig::new("host=db", "/srv"),
            None,
            None,
            false,
        );
        session.close().unwrap();

        assert!(!store.path().exists());
    }

    #[test]
    fn test_finish_saves_after_command_error() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("appConfig.json"));
        let session = Session::from_loaded(
            store.clone(),
            AppConfig::new("host=db", "/srv"),
            None,
            None,
            true,
        );

        assert_eq!(session.finish(Err(anyhow::anyhow!("worker panicked"))), 5);
        assert_eq!(load_config(store.path()).unwrap().script_folder, PathBuf::from("/srv"));
    }

    #[test]
    fn test_finish_keeps_command_code_when_save_fails() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the save fail
        let path = dir.path().join("appConfig.json");
        std::fs::create_dir(&path).unwrap();

        let session = |save| {
            Session::from_loaded(
                ConfigStore::new(path.clone()),
                AppConfig::new("host=db", "/srv"),
                None,
                None,
                save,
            )
        };
        assert_eq!(session(true).finish(Ok(0)), 5);
        assert_eq!(session(true).finish(Ok(1)), 1);
        assert_eq!(session(false).finish(Ok(0)), 0);
    }
}
