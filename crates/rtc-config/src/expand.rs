//! Environment variable expansion for configuration strings.
//!
//! Only the braced forms are recognized:
//! - `${VAR}` expands to the value of VAR and fails if it is unset
//! - `${VAR:-default}` falls back to `default` when VAR is unset

use crate::ConfigError;

/// Error returned from the lookup closure when a variable is unset.
struct LookupError {
    var_name: String,
}

/// Expand environment variable references in a single value.
///
/// `field` is the dotted config path used in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.var_name),
    })
}

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_value_unchanged() {
        assert_eq!(expand_env("DOCS", "confluence.space").unwrap(), "DOCS");
    }

    #[test]
    fn test_expand_set_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("RTC_EXPAND_TEST_USER", "jane@example.com");
        }
        let result = expand_env("${RTC_EXPAND_TEST_USER}", "confluence.username").unwrap();
        assert_eq!(result, "jane@example.com");
        unsafe {
            std::env::remove_var("RTC_EXPAND_TEST_USER");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("RTC_EXPAND_TEST_UNSET");
        }
        let result = expand_env("${RTC_EXPAND_TEST_UNSET:-ENG}", "confluence.space").unwrap();
        assert_eq!(result, "ENG");
    }

    #[test]
    fn test_expand_embedded_in_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("RTC_EXPAND_TEST_SITE", "acme");
        }
        let result =
            expand_env("https://${RTC_EXPAND_TEST_SITE}.atlassian.net/wiki", "url").unwrap();
        assert_eq!(result, "https://acme.atlassian.net/wiki");
        unsafe {
            std::env::remove_var("RTC_EXPAND_TEST_SITE");
        }
    }

    #[test]
    fn test_missing_variable_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("RTC_EXPAND_TEST_MISSING");
        }
        let err = expand_env("${RTC_EXPAND_TEST_MISSING}", "confluence.api_key").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("RTC_EXPAND_TEST_MISSING"));
        assert!(msg.contains("confluence.api_key"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        assert_eq!(expand_env("pa$$word", "confluence.api_key").unwrap(), "pa$$word");
    }

    #[test]
    fn test_expand_opt_none_stays_none() {
        let mut value = None;
        expand_opt(&mut value, "confluence.ancestor").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_expand_opt_some() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("RTC_EXPAND_TEST_PARENT", "98765");
        }
        let mut value = Some("${RTC_EXPAND_TEST_PARENT}".to_owned());
        expand_opt(&mut value, "confluence.ancestor").unwrap();
        assert_eq!(value.as_deref(), Some("98765"));
        unsafe {
            std::env::remove_var("RTC_EXPAND_TEST_PARENT");
        }
    }
}
