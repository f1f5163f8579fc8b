//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use sprout_core::{
    application::{ApplicationError, ports::Filesystem},
    error::SproutResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep one handle for inspection while
/// the pipeline owns another.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_ancestors(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Create a file along with any missing parent directories (testing helper).
    pub fn seed_file(&self, path: impl AsRef<Path>, content: impl Into<String>) -> SproutResult<()> {
        let path = path.as_ref();
        let mut inner = self.write()?;
        if let Some(parent) = path.parent() {
            inner.add_ancestors(parent);
        }
        inner.files.insert(path.to_path_buf(), content.into());
        Ok(())
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> SproutResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }

    fn write(&self) -> SproutResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> SproutResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| ApplicationError::filesystem(path, "File does not exist").into())
    }

    fn write_file(&self, path: &Path, content: &str) -> SproutResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(
                    ApplicationError::filesystem(path, "Parent directory does not exist").into(),
                );
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> SproutResult<()> {
        self.write()?.add_ancestors(path);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> SproutResult<()> {
        match self.write()?.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(ApplicationError::filesystem(path, "File does not exist").into()),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> SproutResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.remove(path) {
            return Err(ApplicationError::filesystem(path, "Directory does not exist").into());
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> SproutResult<()> {
        let mut inner = self.write()?;
        let content = inner
            .files
            .remove(from)
            .ok_or_else(|| ApplicationError::filesystem(from, "File does not exist"))?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }
}
