//! List command implementation
//!
//! This module implements the `list` command, which shows the scripts a
//! `run` would execute, in execution order.

use crate::cli::Session;
use crate::core::discovery::discover_scripts;
use crate::domain::ScriptFile;
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print only the full paths, one per line
    #[arg(long)]
    pub paths_only: bool,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, session: &Session) -> anyhow::Result<i32> {
        let folder = &session.config().script_folder;
        tracing::info!(folder = %folder.display(), "Listing scripts");

        let scripts = match discover_scripts(folder) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Script discovery failed");
                println!("Status: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if self.paths_only {
            for script in &scripts {
                println!("{}", script.path().display());
            }
            return Ok(0);
        }

        print!("{}", render_table(&scripts));
        println!();
        println!("Files Loaded: {}", scripts.len());
        Ok(0)
    }
}

/// Render scripts as an aligned Directory / Name / Path table
fn render_table(scripts: &[ScriptFile]) -> String {
    let dir_width = scripts
        .iter()
        .map(|s| s.directory().len())
        .max()
        .unwrap_or(0)
        .max("Directory".len());
    let name_width = scripts
        .iter()
        .map(|s| s.name().len())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = format!(
        "{:<dir_width$}  {:<name_width$}  Path\n",
        "Directory", "Name"
    );
    for script in scripts {
        out.push_str(&format!(
            "{:<dir_width$}  {:<name_width$}  {}\n",
            script.directory(),
            script.name(),
            script.path().display()
        ));
    }
    out
}
