//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading documentation from the local filesystem.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::storage::{Storage, StorageError, StorageErrorKind, validate_relative};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Every call goes to disk; nothing is cached between requests.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use helpdocs_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("/srv/backend"));
/// let readme = storage.locate(Path::new("Documentation/README.md"));
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Application root containing the documentation directories.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Join a path onto the root, rejecting parent components.
    ///
    /// Absolute paths (as returned by [`Storage::locate`]) are used as-is.
    fn full_path(&self, path: &Path) -> Result<PathBuf, StorageError> {
        if path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(self.root.join(path))
    }
}

impl Storage for FsStorage {
    fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, path: &Path) -> Option<PathBuf> {
        if let Err(err) = validate_relative(path, BACKEND) {
            tracing::debug!(error = %err, "Rejected documentation path");
            return None;
        }

        let candidate = self.root.join(path);
        let canonical = match fs::canonicalize(&candidate) {
            Ok(canonical) => canonical,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(path = %candidate.display(), error = %err, "Cannot resolve path");
                }
                return None;
            }
        };

        fs::metadata(&canonical)
            .is_ok_and(|m| m.is_file())
            .then_some(canonical)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        let full_path = self.full_path(path)?;
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))
    }

    fn mtime(&self, path: &Path) -> Result<f64, StorageError> {
        let full_path = self.full_path(path)?;
        let metadata = fs::metadata(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))?;
        let modified = metadata
            .modified()
            .map_err(|e| StorageError::io(e, Some(full_path)).with_backend(BACKEND))?;
        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64()))
    }

    fn list_dirs(&self, path: &Path) -> Result<Vec<String>, StorageError> {
        validate_relative(path, BACKEND)?;
        let dir = self.root.join(path);
        let entries = fs::read_dir(&dir)
            .map_err(|e| StorageError::io(e, Some(dir.clone())).with_backend(BACKEND))?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            // `Path::is_dir` follows symlinks, matching `locate`.
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();

        Ok(names)
    }
}
