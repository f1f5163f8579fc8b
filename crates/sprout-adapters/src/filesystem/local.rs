//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use sprout_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SproutError, SproutResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> SproutResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SproutResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> SproutResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn remove_file(&self, path: &Path) -> SproutResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir_all(&self, path: &Path) -> SproutResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn rename(&self, from: &Path, to: &Path) -> SproutResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename"))
    }
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SproutError {
    ApplicationError::filesystem(path, format!("Failed to {}: {}", operation, e)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let from = dir.path().join("README-starter.md");
        let to = dir.path().join("README.md");

        fs.write_file(&from, "# [package-name]\n").unwrap();
        fs.rename(&from, &to).unwrap();

        assert!(!fs.exists(&from));
        assert_eq!(fs.read_to_string(&to).unwrap(), "# [package-name]\n");
    }

    #[test]
    fn removing_a_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFilesystem::new()
            .remove_file(&dir.path().join("CHANGELOG.md"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to remove file"));
    }

    #[test]
    fn remove_dir_all_removes_nested_content() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let nested = dir.path().join("src/cli/args");
        fs.create_dir_all(&nested).unwrap();
        fs.write_file(&nested.join("args.ts"), "").unwrap();

        fs.remove_dir_all(&dir.path().join("src/cli")).unwrap();
        assert!(!fs.exists(&dir.path().join("src/cli")));
        assert!(fs.exists(&dir.path().join("src")));
    }
}
