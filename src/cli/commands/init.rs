//! Init command implementation
//!
//! This module implements the `init` command for writing a default
//! configuration file.

use crate::config::{
    default_config_path, executable_dir, save_config, secret_string, AppConfig,
};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    /// (default: appConfig.json next to the executable)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    ///
    /// `folder` and `connection_string` are the global overrides; when given
    /// they replace the defaults in the written file.
    pub async fn execute(
        &self,
        folder: Option<&Path>,
        connection_string: Option<&str>,
    ) -> anyhow::Result<i32> {
        let output = self.output.clone().unwrap_or_else(default_config_path);
        tracing::info!(output = %output.display(), "Initializing configuration file");

        println!("📝 Initializing SQL Runner configuration");
        println!();

        if output.exists() && !self.force {
            println!("❌ Configuration file already exists: {}", output.display());
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config = initial_config(&executable_dir(), folder, connection_string);

        match save_config(&output, &config) {
            Ok(()) => {
                println!("✅ Configuration file created: {}", output.display());
                println!();
                println!("Next steps:");
                println!("  1. Edit ConnectionString and ScriptFolder in {}", output.display());
                println!("  2. Keep passwords out of the file with SQLRUNNER_CONNECTION_STRING");
                println!("  3. Check the connection: sqlrunner test-connection");
                println!("  4. Review the scripts: sqlrunner list");
                println!("  5. Run them: sqlrunner run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}

fn initial_config(
    exe_dir: &Path,
    folder: Option<&Path>,
    connection_string: Option<&str>,
) -> AppConfig {
    let mut config = AppConfig::default_for(exe_dir);
    if let Some(folder) = folder {
        config.script_folder = folder.to_path_buf();
    }
    if let Some(conn) = connection_string {
        config.connection_string = secret_string(conn.to_string());
    }
    config
}
