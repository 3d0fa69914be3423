//! Mode selector normalization and the environment adapter.

use std::fmt;

/// Environment variable selecting the site mode.
pub const MODE_ENV_VAR: &str = "LAB_MODE";

/// Mode key every registry must contain.
pub const DEFAULT_MODE: &str = "default";

/// Normalized mode selector (trimmed, lower-cased).
///
/// The only constructors normalize their input, so two keys compare equal
/// exactly when their raw selectors differ only in case or surrounding
/// whitespace.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModeKey(String);

impl ModeKey {
    /// Normalize a raw selector. `None` yields the empty key.
    #[must_use]
    pub fn normalize(raw: Option<&str>) -> Self {
        Self(raw.unwrap_or_default().trim().to_lowercase())
    }

    /// The `default` key.
    #[must_use]
    pub fn default_mode() -> Self {
        Self(DEFAULT_MODE.to_owned())
    }

    /// Read and normalize [`MODE_ENV_VAR`].
    ///
    /// Unset and non-unicode values both normalize to the empty key.
    #[must_use]
    pub fn from_env() -> Self {
        let raw = std::env::var(MODE_ENV_VAR).ok();
        Self::normalize(raw.as_deref())
    }

    /// Normalized selector text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty key produced by an absent or blank selector.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for the `default` key.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_MODE
    }
}

impl fmt::Display for ModeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(ModeKey::normalize(Some("  Workshop  ")).as_str(), "workshop");
        assert_eq!(ModeKey::normalize(Some("WORKSHOP")).as_str(), "workshop");
        assert_eq!(ModeKey::normalize(Some("\tdefault\n")).as_str(), "default");
    }

    #[test]
    fn test_normalize_absent_is_empty() {
        let key = ModeKey::normalize(None);
        assert!(key.is_empty());
        assert_eq!(key, ModeKey::normalize(Some("   ")));
    }

    #[test]
    fn test_variants_compare_equal() {
        let a = ModeKey::normalize(Some("workshop"));
        let b = ModeKey::normalize(Some(" WorkShop"));
        assert_eq!(a, b);
        assert!(!a.is_default());
    }

    #[test]
    fn test_default_mode() {
        let key = ModeKey::default_mode();
        assert!(key.is_default());
        assert_eq!(key, ModeKey::normalize(Some("Default ")));
        assert_eq!(key.to_string(), "default");
    }

    #[test]
    fn test_from_env() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var(MODE_ENV_VAR, " Workshop ");
        }
        assert_eq!(ModeKey::from_env().as_str(), "workshop");

        unsafe {
            std::env::remove_var(MODE_ENV_VAR);
        }
        assert!(ModeKey::from_env().is_empty());
    }
}
