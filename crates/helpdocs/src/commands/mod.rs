//! CLI command implementations.

pub(crate) mod modules;
pub(crate) mod resolve;
pub(crate) mod show;

pub(crate) use modules::ModulesArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use show::ShowArgs;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use helpdocs_config::{CliSettings, Config};
use helpdocs_help::{ContentCategory, DirectoryRegistry, HelpPages, MemoryPageCache, PageRequest};
use helpdocs_renderer::HtmlRenderer;
use helpdocs_storage::{FsStorage, Storage};

use crate::error::CliError;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover helpdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Application root containing Documentation/, Developer-Guide/ and Modules/ (overrides config).
    #[arg(short, long, env = "HELPDOCS_ROOT")]
    root: Option<PathBuf>,

    /// Server language tried when a page is missing in the requested language (overrides config).
    #[arg(long)]
    fallback_language: Option<String>,

    /// Disable caching of rendered pages.
    #[arg(long)]
    no_cache: bool,

    /// Enable verbose output (log every fallback decision).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration with these arguments applied on top.
    pub(crate) fn load_config(&self, language: Option<String>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            root_dir: self.root.clone(),
            default_language: self.fallback_language.clone(),
            language,
            cache_enabled: self.no_cache.then_some(false),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Arguments addressing one help page.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Help category: general, module or developer.
    category: ContentCategory,

    /// Page to show (default: README, or the module introduction).
    #[arg(short, long)]
    page: Option<String>,

    /// Module identifier (module help only).
    #[arg(short, long)]
    module: Option<String>,

    /// Requested language (overrides config).
    #[arg(short, long)]
    lang: Option<String>,
}

impl PageArgs {
    /// Build the page request, with the requested language taken from `config`.
    pub(crate) fn request(&self, config: &Config) -> PageRequest {
        PageRequest {
            category: self.category,
            page: self.page.clone(),
            module_id: self.module.clone(),
            language: config.l11n.requested_language().to_owned(),
        }
    }

    /// Check that `--module` is only given for module help.
    pub(crate) fn check_module(&self) -> Result<(), CliError> {
        if self.module.is_some() && self.category != ContentCategory::ModuleHelp {
            return Err(CliError::Validation(format!(
                "--module only applies to module help, not {}",
                self.category
            )));
        }
        Ok(())
    }
}

/// Build the help page service for a loaded configuration.
pub(crate) fn help_pages(config: &Config) -> HelpPages {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.docs_resolved.root_dir.clone()));
    let registry = DirectoryRegistry::new(Arc::clone(&storage), config.modules.active.clone());
    let pages = HelpPages::new(
        storage,
        Arc::new(HtmlRenderer::new()),
        Arc::new(registry),
        config.l11n.default_language.clone(),
    );

    if config.docs_resolved.cache_enabled {
        pages.with_cache(Arc::new(MemoryPageCache::new()))
    } else {
        pages
    }
}
