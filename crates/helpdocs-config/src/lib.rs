//! Configuration management for helpdocs.
//!
//! Parses `helpdocs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.root_dir`
//! - `l11n.default_language`
//! - `l11n.language`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override application root directory.
    pub root_dir: Option<PathBuf>,
    /// Override server fallback language.
    pub default_language: Option<String>,
    /// Override requested language.
    pub language: Option<String>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "helpdocs.toml";

/// Language every module is expected to ship documentation in.
pub const BASE_LANGUAGE: &str = "en";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation tree configuration (paths are relative strings from TOML).
    #[serde(default)]
    docs: DocsConfigRaw,
    /// Localization configuration.
    pub l11n: L11nConfig,
    /// Module activation configuration.
    pub modules: ModulesConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    root_dir: Option<String>,
    cache_enabled: Option<bool>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Application root containing `Documentation/`, `Developer-Guide/` and `Modules/`.
    pub root_dir: PathBuf,
    /// Whether rendered pages are cached in memory.
    pub cache_enabled: bool,
}

/// Localization configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct L11nConfig {
    /// Server language, tried when a page is missing in the requested language.
    pub default_language: String,
    /// Language requested when none is given explicitly.
    pub language: Option<String>,
}

impl Default for L11nConfig {
    fn default() -> Self {
        Self {
            default_language: BASE_LANGUAGE.to_owned(),
            language: None,
        }
    }
}

impl L11nConfig {
    /// Requested language, defaulting to the server language.
    #[must_use]
    pub fn requested_language(&self) -> &str {
        self.language.as_deref().unwrap_or(&self.default_language)
    }
}

/// Module activation configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    /// Active module identifiers. All installed modules are active when unset.
    pub active: Option<Vec<String>>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.root_dir`").
        field: String,
        /// Error message (e.g., "${`HELP_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a single path segment: languages and module ids are joined into paths.
fn require_segment(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    let valid = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
    if !valid {
        return Err(ConfigError::Validation(format!(
            "{field} may only contain ASCII letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `helpdocs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the settings are invalid after CLI overrides.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root_dir) = &settings.root_dir {
            self.docs_resolved.root_dir.clone_from(root_dir);
        }
        if let Some(default_language) = &settings.default_language {
            self.l11n.default_language.clone_from(default_language);
        }
        if let Some(language) = &settings.language {
            self.l11n.language = Some(language.clone());
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.docs_resolved.cache_enabled = cache_enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            l11n: L11nConfig::default(),
            modules: ModulesConfig::default(),
            docs_resolved: DocsConfig {
                root_dir: base.to_path_buf(),
                cache_enabled: true,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_segment(&self.l11n.default_language, "l11n.default_language")?;
        if let Some(language) = &self.l11n.language {
            require_segment(language, "l11n.language")?;
        }
        for id in self.modules.active.iter().flatten() {
            require_non_empty(id, "modules.active")?;
            if id.contains(['/', '\\']) || id == "." || id == ".." {
                return Err(ConfigError::Validation(format!(
                    "modules.active entry '{id}' is not a module identifier"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root_dir) = self.docs.root_dir {
            self.docs.root_dir = Some(expand::expand_env(root_dir, "docs.root_dir")?);
        }

        self.l11n.default_language =
            expand::expand_env(&self.l11n.default_language, "l11n.default_language")?;
        if let Some(ref language) = self.l11n.language {
            self.l11n.language = Some(expand::expand_env(language, "l11n.language")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            root_dir: config_dir.join(self.docs.root_dir.as_deref().unwrap_or(".")),
            cache_enabled: self.docs.cache_enabled.unwrap_or(true),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.root_dir, PathBuf::from("/test"));
        assert!(config.docs_resolved.cache_enabled);
        assert_eq!(config.l11n.default_language, "en");
        assert_eq!(config.l11n.requested_language(), "en");
        assert!(config.modules.active.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.l11n.default_language, "en");
        assert!(config.l11n.language.is_none());
    }

    #[test]
    fn test_parse_l11n_config() {
        let toml = r#"
[l11n]
default_language = "de"
language = "fr"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.l11n.default_language, "de");
        assert_eq!(config.l11n.requested_language(), "fr");
    }

    #[test]
    fn test_parse_modules_config() {
        let toml = r#"
[modules]
active = ["Billing", "Admin"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.modules.active,
            Some(vec!["Billing".to_owned(), "Admin".to_owned()])
        );
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
root_dir = "backend"
cache_enabled = false
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.root_dir,
            PathBuf::from("/project/backend")
        );
        assert!(!config.docs_resolved.cache_enabled);
    }

    #[test]
    fn test_resolve_paths_defaults_to_config_dir() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.docs_resolved.root_dir, PathBuf::from("/project/."));
        assert!(config.docs_resolved.cache_enabled);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[docs]\nroot_dir = \"app\"\n\n[l11n]\ndefault_language = \"de\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.root_dir, dir.path().join("app"));
        assert_eq!(config.l11n.default_language, "de");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/helpdocs.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_rejects_invalid_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[l11n]\ndefault_language = \"../en\"\n").unwrap();

        let result = Config::load(Some(&path), None);

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default_with_base(Path::new("/test"));

        let overrides = CliSettings {
            root_dir: Some(PathBuf::from("/srv/app")),
            default_language: Some("de".to_owned()),
            language: Some("fr".to_owned()),
            cache_enabled: Some(false),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.root_dir, PathBuf::from("/srv/app"));
        assert_eq!(config.l11n.default_language, "de");
        assert_eq!(config.l11n.requested_language(), "fr");
        assert!(!config.docs_resolved.cache_enabled);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.docs_resolved.root_dir, PathBuf::from("/test"));
        assert_eq!(config.l11n.default_language, "en");
        assert!(config.l11n.language.is_none());
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_language() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.l11n.language = Some(String::new());

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("l11n.language cannot be empty"));
    }

    #[test]
    fn test_validate_module_id_with_separator() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.modules.active = Some(vec!["Billing/../Admin".to_owned()]);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_expand_env_vars_root_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("HELPDOCS_TEST_ROOT", "/srv/backend");
        }

        let toml = r#"
[docs]
root_dir = "${HELPDOCS_TEST_ROOT}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.docs.root_dir.as_deref(), Some("/srv/backend"));

        unsafe {
            std::env::remove_var("HELPDOCS_TEST_ROOT");
        }
    }
}
