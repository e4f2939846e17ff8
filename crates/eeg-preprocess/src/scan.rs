//! Directory Scanning

use crate::error::PreprocessError;
use std::path::Path;

/// Names of the direct child directories of `dir`, sorted
pub fn immediate_subdirectories(dir: impl AsRef<Path>) -> Result<Vec<String>, PreprocessError> {
    list_children(dir.as_ref(), |path| path.is_dir())
}

/// Names of the direct child files of `dir`, sorted
pub fn immediate_files(dir: impl AsRef<Path>) -> Result<Vec<String>, PreprocessError> {
    list_children(dir.as_ref(), |path| path.is_file())
}

fn list_children(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<String>, PreprocessError> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        // Follows symlinks, like a stat-based check would
        if keep(&entry.path()) {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_only_direct_children() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("P02")).unwrap();
        std::fs::create_dir(root.path().join("P01")).unwrap();
        std::fs::create_dir_all(root.path().join("P01").join("nested")).unwrap();
        std::fs::write(root.path().join("notes.txt"), "x").unwrap();
        std::fs::write(root.path().join("P01").join("session.csv"), "x").unwrap();

        assert_eq!(immediate_subdirectories(root.path()).unwrap(), vec!["P01", "P02"]);
        assert_eq!(immediate_files(root.path()).unwrap(), vec!["notes.txt"]);
        assert_eq!(immediate_files(root.path().join("P01")).unwrap(), vec!["session.csv"]);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let root = tempfile::tempdir().unwrap();
        let result = immediate_files(root.path().join("absent"));
        assert!(matches!(result, Err(PreprocessError::Io(_))));
    }
}
