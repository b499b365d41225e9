//! Documentation path resolution.
//!
//! Maps a [`PageRequest`] to the markdown file to render and the `SUMMARY.md`
//! files that provide its navigation. Every lookup goes through
//! [`Storage::locate`], so a missing file at one tier simply moves on to the
//! next one; nothing here returns an error.
//!
//! # Fallback chains
//!
//! General help and the developer guide:
//!
//! 1. `<root>/<page>.md` (skipped for `README` or no page)
//! 2. `<root>/README.md`
//!
//! Module help, with `<base>` = `Modules/<id>/Docs/<type>`:
//!
//! 1. `<base>/<requested language>/<slug>.md`
//! 2. `<base>/<server language>/<slug>.md`
//! 3. `<base>/en/<slug>.md`
//! 4. `<base>/en/introduction.md`

use std::path::{Path, PathBuf};

use helpdocs_storage::Storage;

use crate::category::ContentCategory;
use crate::request::{INTRODUCTION, ModulePage, PageRequest};

/// Page name that always maps to the tree's README.
const README: &str = "README";

/// Navigation file name shared by all documentation trees.
const SUMMARY: &str = "SUMMARY.md";

/// Language every module ships its navigation in.
const BASE_LANGUAGE: &str = "en";

/// Resolved paths for one documentation page.
///
/// All paths are absolute and canonical. `None` means the file exists at no
/// tier and the view shows empty content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDoc {
    /// Markdown file to render.
    pub content_path: Option<PathBuf>,
    /// Navigation `SUMMARY.md`, if present.
    pub summary_path: Option<PathBuf>,
    /// Module developer navigation, present only when the file is non-empty.
    pub dev_summary_path: Option<PathBuf>,
}

impl ResolvedDoc {
    /// Check whether a content file was found.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.content_path.is_some()
    }
}

/// Resolves documentation requests to files in a [`Storage`].
///
/// Holds no state besides its inputs; build one per request.
pub struct DocPathResolver<'a> {
    storage: &'a dyn Storage,
    fallback_language: &'a str,
}

impl<'a> DocPathResolver<'a> {
    /// Create a resolver.
    ///
    /// # Arguments
    ///
    /// * `storage` - Storage rooted at the application directory
    /// * `fallback_language` - Server language tried after the requested one
    pub fn new(storage: &'a dyn Storage, fallback_language: &'a str) -> Self {
        Self {
            storage,
            fallback_language,
        }
    }

    /// Resolve any request.
    ///
    /// A module request without a module id resolves to nothing.
    pub fn resolve(&self, request: &PageRequest) -> ResolvedDoc {
        let page = request.page.as_deref();
        match request.category {
            ContentCategory::GeneralHelp | ContentCategory::DeveloperHelp => {
                let root = request.category.root_dir();
                ResolvedDoc {
                    content_path: self.resolve_tree_page(root, page),
                    summary_path: self.locate(&format!("{root}/{SUMMARY}")),
                    dev_summary_path: None,
                }
            }
            ContentCategory::ModuleHelp => match request.module_id.as_deref() {
                Some(module_id) => self.resolve_module(module_id, page, &request.language),
                None => ResolvedDoc::default(),
            },
        }
    }

    /// Resolve a general help page under `Documentation/`.
    pub fn resolve_general(&self, page: Option<&str>) -> Option<PathBuf> {
        self.resolve_tree_page(ContentCategory::GeneralHelp.root_dir(), page)
    }

    /// Resolve a developer guide page under `Developer-Guide/`.
    pub fn resolve_developer(&self, page: Option<&str>) -> Option<PathBuf> {
        self.resolve_tree_page(ContentCategory::DeveloperHelp.root_dir(), page)
    }

    /// Resolve a module help page and the module's navigation files.
    pub fn resolve_module(&self, module_id: &str, page: Option<&str>, language: &str) -> ResolvedDoc {
        let ModulePage { doc_type, slug } = ModulePage::parse(page);
        let docs = format!("{}/{module_id}/Docs", ContentCategory::ModuleHelp.root_dir());
        let base = format!("{docs}/{doc_type}");

        let content_path = [language, self.fallback_language, BASE_LANGUAGE]
            .into_iter()
            .find_map(|lang| {
                let path = self.locate(&format!("{base}/{lang}/{slug}.md"));
                if path.is_none() {
                    tracing::debug!(module = module_id, language = lang, slug = %slug, "Module page not found");
                }
                path
            })
            .or_else(|| self.locate(&format!("{base}/{BASE_LANGUAGE}/{INTRODUCTION}.md")));

        if content_path.is_none() {
            tracing::debug!(module = module_id, doc_type = %doc_type, "No module page at any fallback tier");
        }

        let summary_path = self.locate(&format!("{docs}/Help/{BASE_LANGUAGE}/{SUMMARY}"));
        let dev_summary_path = self
            .locate(&format!("{docs}/Dev/{BASE_LANGUAGE}/{SUMMARY}"))
            .filter(|path| self.storage.read(path).is_ok_and(|s| !s.is_empty()));

        ResolvedDoc {
            content_path,
            summary_path,
            dev_summary_path,
        }
    }

    /// Resolve `<root>/<page>.md`, falling back to the root's README.
    fn resolve_tree_page(&self, root: &str, page: Option<&str>) -> Option<PathBuf> {
        let target = page.unwrap_or(README);
        let readme = format!("{root}/{README}.md");

        if target != README
            && let Some(path) = self.locate(&format!("{root}/{target}.md"))
        {
            return Some(path);
        }

        let path = self.locate(&readme);
        if target != README {
            tracing::debug!(root, page = target, found_readme = path.is_some(), "Falling back to README");
        }
        path
    }

    fn locate(&self, relative: &str) -> Option<PathBuf> {
        self.storage.locate(Path::new(relative))
    }
}
