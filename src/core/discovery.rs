//! Script discovery
//!
//! Walks a folder recursively and returns every `*.sql` file (extension
//! matched case-insensitively), sorted by file name.

use crate::domain::{Result, RunnerError, ScriptFile};
use std::path::Path;
use walkdir::WalkDir;

/// Extension of script files, compared case-insensitively
pub const SCRIPT_EXTENSION: &str = "sql";

/// Finds all SQL scripts under `root`
///
/// Symlinks are followed. Entries that cannot be read are logged and skipped
/// so one bad subdirectory does not hide the rest of the folder.
///
/// # Errors
///
/// Returns [`RunnerError::Discovery`] if `root` does not exist or is not a
/// directory.
///
/// # Examples
///
/// ```no_run
/// use sqlrunner::core::discovery::discover_scripts;
///
/// let scripts = discover_scripts("./migrations").unwrap();
/// for script in &scripts {
///     println!("{}\t{}", script.directory(), script.name());
/// }
/// ```
pub fn discover_scripts(root: impl AsRef<Path>) -> Result<Vec<ScriptFile>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(RunnerError::Discovery(format!(
            "Script folder does not exist: {}",
            root.display()
        )));
    }
    if !root.is_dir() {
        return Err(RunnerError::Discovery(format!(
            "Script folder is not a directory: {}",
            root.display()
        )));
    }

    tracing::debug!(root = %root.display(), "Loading files");

    let mut scripts = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_script(entry.path()) {
            continue;
        }

        match ScriptFile::from_path(entry.path()) {
            Ok(script) => {
                tracing::debug!(
                    count = scripts.len() + 1,
                    path = %script.path().display(),
                    "Loaded file"
                );
                scripts.push(script);
            }
            Err(e) => tracing::warn!(error = %e, "Skipping script"),
        }
    }

    scripts.sort();

    tracing::info!(
        root = %root.display(),
        count = scripts.len(),
        "Files loaded"
    );

    Ok(scripts)
}

/// Whether `path` has a `.sql` extension, ignoring case
pub fn is_script(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SCRIPT_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test_case("001.sql", true; "lowercase")]
    #[test_case("001.SQL", true; "uppercase")]
    #[test_case("001.Sql", true; "mixed case")]
    #[test_case("001.sqlx", false; "longer extension")]
    #[test_case("001.sql.bak", false; "backup file")]
    #[test_case("sql", false; "bare name")]
    #[test_case("notes.txt", false; "text file")]
    fn test_is_script(name: &str, expected: bool) {
        assert_eq!(is_script(Path::new(name)), expected);
    }

    #[test]
    fn test_discover_missing_folder() {
        let dir = TempDir::new().unwrap();
        let result = discover_scripts(dir.path().join("nope"));
        assert!(matches!(result, Err(RunnerError::Discovery(_))));
    }

    #[test]
    fn test_discover_file_instead_of_folder() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.sql");
        fs::write(&file, "SELECT 1;").unwrap();

        let result = discover_scripts(&file);
        assert!(matches!(result, Err(RunnerError::Discovery(_))));
    }

    #[test]
    fn test_discover_recursive_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("views");
        fs::create_dir_all(&nested).unwrap();

        fs::write(dir.path().join("003_seed.sql"), "").unwrap();
        fs::write(nested.join("002_view.SQL"), "").unwrap();
        fs::write(dir.path().join("001_schema.sql"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();
        fs::create_dir_all(dir.path().join("folder.sql")).unwrap();

        let scripts = discover_scripts(dir.path()).unwrap();
        let names: Vec<_> = scripts.iter().map(|s| s.name()).collect();

        assert_eq!(names, vec!["001_schema.sql", "002_view.SQL", "003_seed.sql"]);
        assert_eq!(scripts[1].directory(), "views");
    }

    #[test]
    fn test_discover_empty_folder() {
        let dir = TempDir::new().unwrap();
        assert!(discover_scripts(dir.path()).unwrap().is_empty());
    }
}
