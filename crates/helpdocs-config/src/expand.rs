//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use std::cell::RefCell;
use std::convert::Infallible;

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Only the braced `${VAR}` form is validated; a bare `$VAR` naming an unset
/// variable is left as-is.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    // shellexpand only applies `:-default` when the lookup yields `None`, so
    // unset variables are reported as `None` and checked afterwards.
    let unset = RefCell::new(Vec::new());
    let expanded = shellexpand::env_with_context(value, |var| -> Result<Option<String>, Infallible> {
        if let Ok(val) = std::env::var(var) {
            Ok(Some(val))
        } else {
            unset.borrow_mut().push(var.to_owned());
            Ok(None)
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} could not be expanded", e.var_name),
    })?;

    if let Some(var) = unset
        .into_inner()
        .into_iter()
        .find(|var| expanded.contains(&format!("${{{var}}}")))
    {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        });
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("HELPDOCS_TEST_SIMPLE", "/srv/app");
        }
        let result = expand_env("${HELPDOCS_TEST_SIMPLE}", "docs.root_dir").unwrap();
        assert_eq!(result, "/srv/app");
        unsafe {
            std::env::remove_var("HELPDOCS_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("HELPDOCS_TEST_UNSET_LANG");
        }
        let result = expand_env("${HELPDOCS_TEST_UNSET_LANG:-de}", "l11n.language").unwrap();
        assert_eq!(result, "de");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("HELPDOCS_TEST_MISSING");
        }
        let err = expand_env("${HELPDOCS_TEST_MISSING}", "docs.root_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("HELPDOCS_TEST_MISSING"));
        assert!(err.to_string().contains("docs.root_dir"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("HELPDOCS_TEST_BASE", "/opt");
        }
        let result = expand_env("${HELPDOCS_TEST_BASE}/backend", "docs.root_dir").unwrap();
        assert_eq!(result, "/opt/backend");
        unsafe {
            std::env::remove_var("HELPDOCS_TEST_BASE");
        }
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("$VAR/docs", "docs.root_dir").unwrap();
        assert_eq!(result, "$VAR/docs");
    }
}
