//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for locating and reading documentation
//! files, along with [`StorageError`] for unified error handling across backends.
//!
//! # Path Convention
//!
//! Lookup paths passed to [`Storage::locate`] and [`Storage::list_dirs`] are
//! **relative to the application root** (e.g. `Documentation/README.md` or
//! `Modules/Billing/Docs/Help/en/pricing.md`). Located paths are absolute and
//! canonical; [`Storage::read`] and [`Storage::mtime`] accept either form.

use std::path::{Component, Path, PathBuf};

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path (escapes the root, absolute where relative is required).
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidInput => StorageErrorKind::InvalidPath,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Reject paths that could escape the storage root.
///
/// Lookup paths come from request input, so parent components (`..`) and
/// absolute paths are refused before touching the backend.
pub(crate) fn validate_relative(path: &Path, backend: &'static str) -> Result<(), StorageError> {
    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });

    if escapes {
        return Err(StorageError::new(StorageErrorKind::InvalidPath)
            .with_path(path)
            .with_backend(backend));
    }
    Ok(())
}

/// Read-only access to the documentation tree.
///
/// Implementations never create or modify files and must be safe to share
/// across request-handling threads.
pub trait Storage: Send + Sync {
    /// Absolute root directory that relative lookup paths are joined onto.
    fn root(&self) -> &Path;

    /// Locate a regular file by root-relative path.
    ///
    /// Returns the canonical absolute path (symlinks followed) when the file
    /// exists, `None` otherwise. Invalid paths (parent components, absolute
    /// paths, embedded NUL bytes) are reported as missing.
    fn locate(&self, path: &Path) -> Option<PathBuf>;

    /// Read a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or can't be read.
    fn read(&self, path: &Path) -> Result<String, StorageError>;

    /// Get modification time as seconds since Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or mtime can't be retrieved.
    fn mtime(&self, path: &Path) -> Result<f64, StorageError>;

    /// List the names of the immediate subdirectories of a root-relative directory.
    ///
    /// Names are sorted; hidden entries (leading `.`) are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory doesn't exist or can't be listed.
    fn list_dirs(&self, path: &Path) -> Result<Vec<String>, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_new() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert!(err.path.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_storage_error_io_kinds() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let invalid = std::io::Error::new(std::io::ErrorKind::InvalidInput, "nul byte");

        assert_eq!(
            StorageError::io(not_found, None).kind,
            StorageErrorKind::NotFound
        );
        assert_eq!(
            StorageError::io(denied, None).kind,
            StorageErrorKind::PermissionDenied
        );
        assert_eq!(
            StorageError::io(invalid, None).kind,
            StorageErrorKind::InvalidPath
        );
    }

    #[test]
    fn test_storage_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::new(StorageErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("/app/Documentation/README.md")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (path: /app/Documentation/README.md)"
        );
    }

    #[test]
    fn test_storage_error_display_simple() {
        assert_eq!(StorageError::not_found("x.md").to_string(), "Not found (path: x.md)");
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }

    #[test]
    fn test_validate_relative_accepts_nested() {
        assert!(validate_relative(Path::new("Modules/Billing/Docs/Help/en/a.md"), "Fs").is_ok());
        assert!(validate_relative(Path::new("Documentation/./README.md"), "Fs").is_ok());
    }

    #[test]
    fn test_validate_relative_rejects_escape() {
        let err = validate_relative(Path::new("Documentation/../../etc/passwd.md"), "Fs")
            .unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidPath);

        let err = validate_relative(Path::new("/etc/passwd"), "Fs").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }
}
