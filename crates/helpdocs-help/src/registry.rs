//! Installed and active module lookup.

use std::path::Path;
use std::sync::Arc;

use helpdocs_storage::{Storage, StorageErrorKind};

use crate::category::ContentCategory;

/// Source of module identifiers for module help.
pub trait ModuleRegistry: Send + Sync {
    /// Installed module identifiers, sorted.
    fn installed(&self) -> Vec<String>;

    /// Active module identifiers, sorted.
    fn active(&self) -> Vec<String>;

    /// Check whether a module is active.
    fn is_active(&self, module_id: &str) -> bool {
        self.active().iter().any(|id| id == module_id)
    }
}

/// Registry backed by the `Modules/` directory.
///
/// Every subdirectory of `Modules/` is an installed module. Active modules
/// are the configured list restricted to installed ones, or every installed
/// module when no list is configured.
pub struct DirectoryRegistry {
    storage: Arc<dyn Storage>,
    active: Option<Vec<String>>,
}

impl DirectoryRegistry {
    /// Create a registry over `storage`.
    pub fn new(storage: Arc<dyn Storage>, active: Option<Vec<String>>) -> Self {
        Self { storage, active }
    }
}

impl ModuleRegistry for DirectoryRegistry {
    fn installed(&self) -> Vec<String> {
        let modules_dir = Path::new(ContentCategory::ModuleHelp.root_dir());
        match self.storage.list_dirs(modules_dir) {
            Ok(modules) => modules,
            Err(err) if err.kind == StorageErrorKind::NotFound => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "Cannot list installed modules");
                Vec::new()
            }
        }
    }

    fn active(&self) -> Vec<String> {
        let installed = self.installed();
        match &self.active {
            Some(active) => installed
                .into_iter()
                .filter(|id| active.contains(id))
                .collect(),
            None => installed,
        }
    }
}

/// Registry over fixed module lists.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    installed: Vec<String>,
    active: Vec<String>,
}

impl StaticRegistry {
    /// Create a registry with explicit installed and active lists.
    #[must_use]
    pub fn new(mut installed: Vec<String>, mut active: Vec<String>) -> Self {
        installed.sort();
        active.sort();
        Self { installed, active }
    }

    /// Create a registry where every installed module is active.
    #[must_use]
    pub fn all_active(installed: Vec<String>) -> Self {
        Self::new(installed.clone(), installed)
    }
}

impl ModuleRegistry for StaticRegistry {
    fn installed(&self) -> Vec<String> {
        self.installed.clone()
    }

    fn active(&self) -> Vec<String> {
        self.active.clone()
    }
}

#[cfg(test)]
mod tests {
    use helpdocs_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn storage() -> Arc<dyn Storage> {
        Arc::new(
            MockStorage::new()
                .with_file("Modules/Billing/Docs/Help/en/introduction.md", "# Billing")
                .with_file("Modules/Admin/Docs/Help/en/introduction.md", "# Admin")
                .with_file("Modules/Help/info.json", ""),
        )
    }

    #[test]
    fn test_directory_registry_installed() {
        let registry = DirectoryRegistry::new(storage(), None);

        assert_eq!(registry.installed(), vec!["Admin", "Billing", "Help"]);
        assert_eq!(registry.active(), registry.installed());
    }

    #[test]
    fn test_directory_registry_configured_active() {
        let registry = DirectoryRegistry::new(
            storage(),
            Some(vec!["Billing".to_owned(), "NotInstalled".to_owned()]),
        );

        assert_eq!(registry.active(), vec!["Billing"]);
        assert!(registry.is_active("Billing"));
        assert!(!registry.is_active("Admin"));
        assert!(!registry.is_active("NotInstalled"));
    }

    #[test]
    fn test_directory_registry_without_modules_dir() {
        let registry = DirectoryRegistry::new(Arc::new(MockStorage::new()), None);

        assert!(registry.installed().is_empty());
        assert!(!registry.is_active("Billing"));
    }

    #[test]
    fn test_static_registry() {
        let registry = StaticRegistry::new(
            vec!["Billing".to_owned(), "Admin".to_owned()],
            vec!["Billing".to_owned()],
        );

        assert_eq!(registry.installed(), vec!["Admin", "Billing"]);
        assert!(registry.is_active("Billing"));
        assert!(!registry.is_active("Admin"));
    }

    #[test]
    fn test_static_registry_all_active() {
        let registry = StaticRegistry::all_active(vec!["Billing".to_owned()]);

        assert!(registry.is_active("Billing"));
    }
}
