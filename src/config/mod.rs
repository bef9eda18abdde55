//! Configuration management.
//!
//! # Overview
//!
//! The runner persists two settings in a small JSON file (`appConfig.json`
//! next to the executable unless `--config` says otherwise):
//!
//! - `ConnectionString` - PostgreSQL connection string (keyword or URL form)
//! - `ScriptFolder` - root folder scanned for `*.sql` files
//!
//! The file is loaded at startup (created with defaults when missing) and
//! saved again when the program exits.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sqlrunner::config::{ConfigStore, executable_dir, with_env_overrides};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ConfigStore::new("appConfig.json");
//! let config = store.load_or_init(&executable_dir())?;
//!
//! // Environment overrides apply to this run only
//! let effective = with_env_overrides(&config);
//! println!("Scripts: {}", effective.script_folder.display());
//!
//! store.save(&config)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! ```bash
//! export SQLRUNNER_CONNECTION_STRING="host=db user=deploy password=secret"
//! export SQLRUNNER_SCRIPT_FOLDER="/srv/release/sql"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{
    default_config_path, executable_dir, load_config, save_config, with_env_overrides,
    ConfigStore,
};
pub use schema::{AppConfig, LoggingConfig, DEFAULT_CONNECTION_STRING};
pub use secret::{redact_connection_string, secret_string, SecretString, SecretValue};
