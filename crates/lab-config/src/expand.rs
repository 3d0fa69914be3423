//! Environment variable expansion for registry strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Only braced references are expanded. Bare `$VAR` and `$5` are left
/// untouched so titles containing dollar signs survive, and an unterminated
/// `${` is kept as literal text.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        expanded.push_str(&rest[..start]);
        let reference = &rest[start..];
        let Some(end) = reference.find('}') else {
            expanded.push_str(reference);
            return Ok(expanded);
        };
        expanded.push_str(&expand_reference(&reference[..=end], field)?);
        rest = &reference[end + 1..];
    }
    expanded.push_str(rest);

    Ok(expanded)
}

/// Expand a single `${...}` reference.
fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.0),
    })
}

/// Name of a referenced variable that has no value.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_title_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("LAB_EXPAND_TITLE", "Context Engineering");
        }
        let result = expand_env("Redis Workshop: ${LAB_EXPAND_TITLE}", "modes.default.title").unwrap();
        assert_eq!(result, "Redis Workshop: Context Engineering");
        unsafe {
            std::env::remove_var("LAB_EXPAND_TITLE");
        }
    }

    #[test]
    fn test_expand_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LAB_EXPAND_UNSET");
        }
        let result = expand_env("${LAB_EXPAND_UNSET:-/intro/welcome/}", "hero.home_link").unwrap();
        assert_eq!(result, "/intro/welcome/");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LAB_EXPAND_MISSING");
        }
        let err = expand_env("${LAB_EXPAND_MISSING}", "modes.workshop.title").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("LAB_EXPAND_MISSING"));
        assert!(msg.contains("modes.workshop.title"));
    }

    #[test]
    fn test_bare_dollar_with_braced_var_preserved() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LAB_EXPAND_EDITION");
            std::env::remove_var("LAB_EXPAND_DISCOUNT");
        }
        let result = expand_env("Save $5 on ${LAB_EXPAND_EDITION:-Lab}", "modes.default.title").unwrap();
        assert_eq!(result, "Save $5 on Lab");

        let result = expand_env(
            "Cost $LAB_EXPAND_DISCOUNT ${LAB_EXPAND_EDITION:-Lab} $",
            "modes.default.title",
        )
        .unwrap();
        assert_eq!(result, "Cost $LAB_EXPAND_DISCOUNT Lab $");
    }

    #[test]
    fn test_unterminated_reference_kept() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("LAB_EXPAND_NAME", "Redis");
        }
        let result = expand_env("${LAB_EXPAND_NAME} lab ${oops", "modes.default.title").unwrap();
        assert_eq!(result, "Redis lab ${oops");
        unsafe {
            std::env::remove_var("LAB_EXPAND_NAME");
        }
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("Save $5 with $DISCOUNT", "modes.default.title").unwrap();
        assert_eq!(result, "Save $5 with $DISCOUNT");
    }
}
