//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind, validate_relative};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory file entry.
#[derive(Debug, Clone)]
struct MockFile {
    content: String,
    mtime: f64,
}

/// Mock storage for testing.
///
/// Stores files in memory under a virtual root (`/app` by default). Use the
/// builder methods to configure the mock with test data. Directories exist
/// implicitly as ancestors of stored files.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use helpdocs_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("Documentation/README.md", "# Help");
///
/// let path = storage.locate(Path::new("Documentation/README.md")).unwrap();
/// assert_eq!(path, Path::new("/app/Documentation/README.md"));
/// ```
#[derive(Debug)]
pub struct MockStorage {
    root: PathBuf,
    files: RwLock<HashMap<PathBuf, MockFile>>,
}

impl Default for MockStorage {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/app"),
            files: RwLock::new(HashMap::new()),
        }
    }
}

impl MockStorage {
    /// Create a new empty mock storage rooted at `/app`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different virtual root.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Add a file at a root-relative path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let full = self.absolute(path.as_ref());
        self.files.write().unwrap().insert(
            full,
            MockFile {
                content: content.into(),
                mtime: 0.0,
            },
        );
        self
    }

    /// Set modification time for a root-relative path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_mtime(self, path: impl AsRef<Path>, mtime: f64) -> Self {
        self.set_mtime(path, mtime);
        self
    }

    /// Replace the content of a file, keeping its mtime.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_content(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let full = self.absolute(path.as_ref());
        let mut files = self.files.write().unwrap();
        let entry = files.entry(full).or_insert(MockFile {
            content: String::new(),
            mtime: 0.0,
        });
        entry.content = content.into();
    }

    /// Change the modification time of a file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_mtime(&self, path: impl AsRef<Path>, mtime: f64) {
        let full = self.absolute(path.as_ref());
        if let Some(file) = self.files.write().unwrap().get_mut(&full) {
            file.mtime = mtime;
        }
    }

    /// Root-join and normalize away `.` components.
    fn absolute(&self, path: &Path) -> PathBuf {
        self.root.join(path).components().collect()
    }

    fn lookup(&self, path: &Path) -> Result<MockFile, StorageError> {
        if path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        let full = self.absolute(path);
        self.files
            .read()
            .unwrap()
            .get(&full)
            .cloned()
            .ok_or_else(|| StorageError::not_found(full).with_backend(BACKEND))
    }
}

impl Storage for MockStorage {
    fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, path: &Path) -> Option<PathBuf> {
        validate_relative(path, BACKEND).ok()?;
        let full = self.absolute(path);
        self.files
            .read()
            .unwrap()
            .contains_key(&full)
            .then_some(full)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        self.lookup(path).map(|file| file.content)
    }

    fn mtime(&self, path: &Path) -> Result<f64, StorageError> {
        self.lookup(path).map(|file| file.mtime)
    }

    fn list_dirs(&self, path: &Path) -> Result<Vec<String>, StorageError> {
        validate_relative(path, BACKEND)?;
        let dir = self.absolute(path);

        let files = self.files.read().unwrap();
        let mut names: Vec<String> = files
            .keys()
            .filter_map(|file| file.strip_prefix(&dir).ok())
            // Only paths with at least one more component below the child are directories.
            .filter(|rel| rel.components().count() > 1)
            .filter_map(|rel| rel.components().next())
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .filter(|name| !name.starts_with('.'))
            .collect();

        if names.is_empty() && !files.keys().any(|file| file.starts_with(&dir)) {
            return Err(StorageError::not_found(dir).with_backend(BACKEND));
        }

        names.sort();
        names.dedup();
        Ok(names)
    }
}
