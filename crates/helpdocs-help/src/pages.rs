//! Help page view assembly.
//!
//! Resolves a request, reads the markdown files, renders them and packages
//! the result for the view layer. Missing or unreadable files render as
//! empty content; nothing here fails.

use std::path::Path;
use std::sync::Arc;

use helpdocs_renderer::{Render, RenderedContent};
use helpdocs_storage::Storage;
use serde::Serialize;

use crate::cache::{NullPageCache, PageCache};
use crate::category::ContentCategory;
use crate::registry::ModuleRegistry;
use crate::request::PageRequest;
use crate::resolver::{DocPathResolver, ResolvedDoc};

/// Data for a rendered documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    /// Rendered page.
    pub content: RenderedContent,
    /// Rendered `SUMMARY.md` of the documentation tree.
    pub navigation: RenderedContent,
    /// Rendered developer `SUMMARY.md` (module help only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_navigation: Option<RenderedContent>,
}

/// What the view layer should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HelpView {
    /// A documentation page.
    Page(PageView),
    /// The list of modules with help pages.
    ModuleList {
        /// Installed module identifiers.
        modules: Vec<String>,
    },
}

/// Help page service.
///
/// Shared across request handlers; every call resolves and reads afresh,
/// with rendering optionally served from a [`PageCache`].
pub struct HelpPages {
    storage: Arc<dyn Storage>,
    renderer: Arc<dyn Render>,
    registry: Arc<dyn ModuleRegistry>,
    cache: Arc<dyn PageCache>,
    fallback_language: String,
}

impl HelpPages {
    /// Create a help page service without caching.
    ///
    /// # Arguments
    ///
    /// * `storage` - Storage rooted at the application directory
    /// * `renderer` - Markdown renderer
    /// * `registry` - Installed and active modules
    /// * `fallback_language` - Server language tried after the requested one
    pub fn new(
        storage: Arc<dyn Storage>,
        renderer: Arc<dyn Render>,
        registry: Arc<dyn ModuleRegistry>,
        fallback_language: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            renderer,
            registry,
            cache: Arc::new(NullPageCache),
            fallback_language: fallback_language.into(),
        }
    }

    /// Serve rendered files from `cache`.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn PageCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Path resolver over this service's storage.
    pub fn resolver(&self) -> DocPathResolver<'_> {
        DocPathResolver::new(self.storage.as_ref(), &self.fallback_language)
    }

    /// Module registry used for module help.
    pub fn registry(&self) -> &dyn ModuleRegistry {
        self.registry.as_ref()
    }

    /// Show any request.
    pub fn show(&self, request: &PageRequest) -> HelpView {
        match request.category {
            ContentCategory::GeneralHelp => self.general(request.page.as_deref()),
            ContentCategory::DeveloperHelp => self.developer(request.page.as_deref()),
            ContentCategory::ModuleHelp => self.module(
                request.module_id.as_deref(),
                request.page.as_deref(),
                &request.language,
            ),
        }
    }

    /// Show a general help page.
    pub fn general(&self, page: Option<&str>) -> HelpView {
        let resolved = self.resolver().resolve(&PageRequest::general(page));
        HelpView::Page(self.assemble(&resolved))
    }

    /// Show a developer guide page.
    pub fn developer(&self, page: Option<&str>) -> HelpView {
        let resolved = self.resolver().resolve(&PageRequest::developer(page));
        HelpView::Page(self.assemble(&resolved))
    }

    /// Show a module help page.
    ///
    /// Falls back to the module list when no module is given or the module
    /// is not active.
    pub fn module(&self, module_id: Option<&str>, page: Option<&str>, language: &str) -> HelpView {
        let Some(module_id) = module_id.filter(|id| self.registry.is_active(id)) else {
            tracing::info!(module = ?module_id, "No active module requested, showing module list");
            return self.module_list();
        };

        let resolved = self.resolver().resolve_module(module_id, page, language);
        HelpView::Page(self.assemble(&resolved))
    }

    /// Show the list of installed modules.
    pub fn module_list(&self) -> HelpView {
        HelpView::ModuleList {
            modules: self.registry.installed(),
        }
    }

    fn assemble(&self, resolved: &ResolvedDoc) -> PageView {
        if let Some(path) = &resolved.content_path {
            tracing::debug!(path = %path.display(), "Rendering help page");
        } else {
            tracing::info!("Help page not found at any fallback tier");
        }

        PageView {
            content: self.render_file(resolved.content_path.as_deref()),
            navigation: self.render_file(resolved.summary_path.as_deref()),
            dev_navigation: resolved
                .dev_summary_path
                .as_deref()
                .map(|path| self.render_file(Some(path))),
        }
    }

    /// Render a file, or empty content when there is none.
    fn render_file(&self, path: Option<&Path>) -> RenderedContent {
        let Some(path) = path else {
            return self.renderer.render("");
        };

        let etag = self.storage.mtime(path).ok().map(|mtime| mtime.to_string());
        if let Some(etag) = &etag
            && let Some(cached) = self.cache.get(path, etag)
        {
            return cached;
        }

        let markdown = self.storage.read(path).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Cannot read help file");
            String::new()
        });
        let rendered = self.renderer.render(&markdown);

        if let Some(etag) = &etag {
            self.cache.set(path, etag, &rendered);
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use helpdocs_renderer::HtmlRenderer;
    use helpdocs_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cache::MemoryPageCache;
    use crate::registry::StaticRegistry;

    fn storage() -> Arc<MockStorage> {
        Arc::new(
            MockStorage::new()
                .with_file("Documentation/README.md", "# Help\n\nWelcome.")
                .with_file("Documentation/SUMMARY.md", "* [Help](README.md)")
                .with_file("Developer-Guide/README.md", "# Developer Guide")
                .with_file("Modules/Billing/Docs/Help/en/introduction.md", "# Billing")
                .with_file("Modules/Billing/Docs/Help/en/pricing.md", "# Pricing")
                .with_file(
                    "Modules/Billing/Docs/Help/en/SUMMARY.md",
                    "* [Pricing](pricing.md)",
                )
                .with_file("Modules/Billing/Docs/Dev/en/SUMMARY.md", "* [Hooks](hooks.md)")
                .with_file("Modules/Admin/Docs/Help/en/introduction.md", "# Admin"),
        )
    }

    fn pages(storage: Arc<MockStorage>) -> HelpPages {
        let registry = StaticRegistry::new(
            vec!["Admin".to_owned(), "Billing".to_owned()],
            vec!["Billing".to_owned()],
        );
        HelpPages::new(
            storage,
            Arc::new(HtmlRenderer::new()),
            Arc::new(registry),
            "en",
        )
    }

    fn page(view: HelpView) -> PageView {
        match view {
            HelpView::Page(page) => page,
            HelpView::ModuleList { modules } => panic!("expected page, got module list {modules:?}"),
        }
    }

    #[test]
    fn test_general_page() {
        let view = page(pages(storage()).general(None));

        assert_eq!(view.content.title.as_deref(), Some("Help"));
        assert!(view.content.html.contains("<p>Welcome.</p>"));
        assert!(view.navigation.html.contains(r#"<a href="README.md">Help</a>"#));
        assert!(view.dev_navigation.is_none());
    }

    #[test]
    fn test_developer_page_without_summary() {
        let view = page(pages(storage()).developer(Some("missing")));

        assert_eq!(view.content.title.as_deref(), Some("Developer Guide"));
        assert!(view.navigation.is_empty());
    }

    #[test]
    fn test_unresolved_page_renders_empty() {
        let pages = pages(Arc::new(MockStorage::new()));

        let view = page(pages.general(Some("anything")));

        assert!(view.content.is_empty());
        assert!(view.navigation.is_empty());
    }

    #[test]
    fn test_module_page_with_navigation() {
        let view = page(pages(storage()).module(Some("Billing"), Some("Help/pricing"), "de"));

        assert_eq!(view.content.title.as_deref(), Some("Pricing"));
        assert!(view.navigation.html.contains("pricing.md"));
        assert!(
            view.dev_navigation
                .is_some_and(|nav| nav.html.contains("hooks.md"))
        );
    }

    #[test]
    fn test_inactive_module_shows_module_list() {
        let view = pages(storage()).module(Some("Admin"), None, "en");

        assert_eq!(
            view,
            HelpView::ModuleList {
                modules: vec!["Admin".to_owned(), "Billing".to_owned()],
            }
        );
    }

    #[test]
    fn test_missing_module_id_shows_module_list() {
        let view = pages(storage()).module(None, Some("Help/pricing"), "en");

        assert!(matches!(view, HelpView::ModuleList { .. }));
    }

    #[test]
    fn test_show_dispatches_on_category() {
        let pages = pages(storage());

        let view = page(pages.show(&PageRequest::module("Billing", None, "en")));
        assert_eq!(view.content.title.as_deref(), Some("Billing"));

        let view = page(pages.show(&PageRequest::developer(None)));
        assert_eq!(view.content.title.as_deref(), Some("Developer Guide"));
    }

    #[test]
    fn test_cache_serves_until_mtime_changes() {
        let storage = storage();
        let cache = Arc::new(MemoryPageCache::new());
        let pages = pages(Arc::clone(&storage)).with_cache(Arc::clone(&cache) as Arc<dyn PageCache>);

        let first = page(pages.general(None));
        // Same mtime: the stale cached render is served.
        storage.set_content("Documentation/README.md", "# Changed");
        let second = page(pages.general(None));
        assert_eq!(first, second);

        storage.set_mtime("Documentation/README.md", 1.0);
        let third = page(pages.general(None));
        assert_eq!(third.content.title.as_deref(), Some("Changed"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cached_and_uncached_output_match() {
        let uncached = pages(storage());
        let cached = pages(storage()).with_cache(Arc::new(MemoryPageCache::new()));

        for _ in 0..2 {
            assert_eq!(
                cached.module(Some("Billing"), Some("Help/pricing"), "en"),
                uncached.module(Some("Billing"), Some("Help/pricing"), "en")
            );
        }
    }

    #[test]
    fn test_page_view_serialization() {
        let view = pages(storage()).general(None);

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["content"]["title"], "Help");
        assert!(json["navigation"]["html"].is_string());
        assert!(json.get("devNavigation").is_none());
    }

    #[test]
    fn test_module_view_serialization() {
        let pages = pages(storage());

        let json = serde_json::to_value(pages.module(Some("Billing"), None, "en")).unwrap();
        assert!(json["devNavigation"]["html"].is_string());

        let json = serde_json::to_value(pages.module_list()).unwrap();
        assert_eq!(json, serde_json::json!({ "modules": ["Admin", "Billing"] }));
    }
}
