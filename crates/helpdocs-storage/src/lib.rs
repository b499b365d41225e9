//! Read-only storage abstraction over the documentation tree.
//!
//! This crate provides a [`Storage`] trait for locating and reading the
//! markdown files that make up the help and developer documentation. This
//! enables:
//!
//! - **Unit testing** of path resolution without touching the real filesystem
//! - **Clean separation** between fallback logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `locate()`, `read()`, `mtime()` and `list_dirs()` methods
//! - [`FsStorage`] implementation backed by the local filesystem
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use helpdocs_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("/srv/backend"));
//! if let Some(readme) = storage.locate(Path::new("Documentation/README.md")) {
//!     let markdown = storage.read(&readme)?;
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
