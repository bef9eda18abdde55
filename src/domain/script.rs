//! Script file records
//!
//! A [`ScriptFile`] is what discovery produces and what the executor consumes.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// A discovered SQL script
///
/// Immutable once created. Scripts order by file name, then by full path so
/// two files with the same name in different directories still have a stable
/// position.
///
/// # Examples
///
/// ```
/// use sqlrunner::domain::ScriptFile;
///
/// let script = ScriptFile::from_path("/srv/db/tables/001_users.sql").unwrap();
/// assert_eq!(script.name(), "001_users.sql");
/// assert_eq!(script.directory(), "tables");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptFile {
    path: PathBuf,
    directory: String,
    name: String,
}

impl ScriptFile {
    /// Builds a script record from a file path
    ///
    /// # Returns
    ///
    /// Returns `Err` if the path has no file name component
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| format!("Path has no file name: {}", path.display()))?;
        let directory = path
            .parent()
            .and_then(Path::file_name)
            .map(|d| d.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path,
            directory,
            name,
        })
    }

    /// Full path to the script
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the directory that directly contains the script
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// File name, used for ordering
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consumes self and returns the path
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl Ord for ScriptFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for ScriptFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ScriptFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl AsRef<Path> for ScriptFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_extracts_labels() {
        let script = ScriptFile::from_path("scripts/views/010_active_users.sql").unwrap();
        assert_eq!(script.name(), "010_active_users.sql");
        assert_eq!(script.directory(), "views");
        assert_eq!(
            script.path(),
            Path::new("scripts/views/010_active_users.sql")
        );
    }

    #[test]
    fn test_from_path_without_parent_directory() {
        let script = ScriptFile::from_path("001.sql").unwrap();
        assert_eq!(script.directory(), "");
    }

    #[test]
    fn test_from_path_rejects_empty_name() {
        assert!(ScriptFile::from_path("/").is_err());
    }

    #[test]
    fn test_ordering_by_name_then_path() {
        let mut scripts = vec![
            ScriptFile::from_path("b/002.sql").unwrap(),
            ScriptFile::from_path("z/001.sql").unwrap(),
            ScriptFile::from_path("a/002.sql").unwrap(),
        ];
        scripts.sort();

        let paths: Vec<_> = scripts.iter().map(|s| s.to_string()).collect();
        assert_eq!(paths, vec!["z/001.sql", "a/002.sql", "b/002.sql"]);
    }
}
