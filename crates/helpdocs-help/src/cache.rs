//! Read-through cache for rendered markdown files.
//!
//! Entries are keyed by the resolved source path and validated by an etag
//! (the file's modification time). A hit requires both to match, so an
//! edited file is re-rendered on the next request.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use helpdocs_renderer::RenderedContent;

/// Cache of rendered markdown files.
pub trait PageCache: Send + Sync {
    /// Retrieve rendered content stored for `path` with the same `etag`.
    fn get(&self, path: &Path, etag: &str) -> Option<RenderedContent>;

    /// Store rendered content, replacing any entry for `path`.
    fn set(&self, path: &Path, etag: &str, content: &RenderedContent);
}

/// No-op [`PageCache`] that never stores or retrieves data.
///
/// Used when caching is disabled.
pub struct NullPageCache;

impl PageCache for NullPageCache {
    fn get(&self, _path: &Path, _etag: &str) -> Option<RenderedContent> {
        None
    }

    fn set(&self, _path: &Path, _etag: &str, _content: &RenderedContent) {}
}

/// In-memory [`PageCache`].
#[derive(Default)]
pub struct MemoryPageCache {
    entries: RwLock<HashMap<PathBuf, (String, RenderedContent)>>,
}

impl MemoryPageCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    /// Check whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PageCache for MemoryPageCache {
    fn get(&self, path: &Path, etag: &str) -> Option<RenderedContent> {
        let entries = self.entries.read().ok()?;
        let (stored_etag, content) = entries.get(path)?;
        (stored_etag == etag).then(|| content.clone())
    }

    fn set(&self, path: &Path, etag: &str, content: &RenderedContent) {
        // A poisoned lock only costs a cache miss.
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(path.to_path_buf(), (etag.to_owned(), content.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(html: &str) -> RenderedContent {
        RenderedContent {
            html: html.to_owned(),
            ..RenderedContent::default()
        }
    }

    #[test]
    fn test_null_cache_always_misses() {
        let cache = NullPageCache;
        let path = Path::new("/app/Documentation/README.md");

        cache.set(path, "1", &content("<p>hi</p>"));

        assert_eq!(cache.get(path, "1"), None);
    }

    #[test]
    fn test_memory_cache_hit() {
        let cache = MemoryPageCache::new();
        let path = Path::new("/app/Documentation/README.md");

        cache.set(path, "1", &content("<p>hi</p>"));

        assert_eq!(cache.get(path, "1"), Some(content("<p>hi</p>")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_memory_cache_etag_mismatch() {
        let cache = MemoryPageCache::new();
        let path = Path::new("/app/Documentation/README.md");

        cache.set(path, "1", &content("<p>old</p>"));

        assert_eq!(cache.get(path, "2"), None);
    }

    #[test]
    fn test_memory_cache_overwrite() {
        let cache = MemoryPageCache::new();
        let path = Path::new("/app/Documentation/README.md");

        cache.set(path, "1", &content("<p>old</p>"));
        cache.set(path, "2", &content("<p>new</p>"));

        assert_eq!(cache.get(path, "2"), Some(content("<p>new</p>")));
        assert_eq!(cache.get(path, "1"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_memory_cache_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryPageCache>();
    }
}
