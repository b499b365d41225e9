//! Help and developer documentation pages.
//!
//! Resolves a documentation request (general help, module help or the
//! developer guide) to a markdown file through a language-aware fallback
//! chain, renders it next to its `SUMMARY.md` navigation, and hands the
//! result to an external view layer.
//!
//! # Architecture
//!
//! - [`DocPathResolver`]: pure path resolution over a [`Storage`](helpdocs_storage::Storage)
//! - [`ModuleRegistry`]: which modules are installed and active
//! - [`HelpPages`]: view assembly (resolve, read, render, cache)
//!
//! Resolution never fails: a page that exists at no fallback tier resolves to
//! `None` and renders as empty content.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use helpdocs_help::{DirectoryRegistry, HelpPages};
//! use helpdocs_renderer::HtmlRenderer;
//! use helpdocs_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("/srv/backend")));
//! let registry = Arc::new(DirectoryRegistry::new(storage.clone(), None));
//! let pages = HelpPages::new(storage, Arc::new(HtmlRenderer::new()), registry, "en");
//! let view = pages.module(Some("Billing"), Some("Help/pricing"), "de");
//! ```

mod cache;
mod category;
mod pages;
mod registry;
mod request;
mod resolver;

pub use cache::{MemoryPageCache, NullPageCache, PageCache};
pub use category::{ContentCategory, UnknownCategory};
pub use pages::{HelpPages, HelpView, PageView};
pub use registry::{DirectoryRegistry, ModuleRegistry, StaticRegistry};
pub use request::{ModulePage, PageRequest};
pub use resolver::{DocPathResolver, ResolvedDoc};
