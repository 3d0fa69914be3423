//! Mode registry and resolver.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{ConfigError, DEFAULT_MODE, ModeKey, SiteConfig};

/// Registry filename to search for.
pub const CONFIG_FILENAME: &str = "lab.toml";

/// Registry embedded in the binary.
const BUILTIN_REGISTRY: &str = include_str!("builtin.toml");

/// Registry file as parsed from TOML (keys not yet normalized).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RegistryFile {
    modes: BTreeMap<String, SiteConfig>,
}

/// Immutable mapping from mode key to site configuration.
///
/// Always holds a `default` entry, which makes [`resolve`](Self::resolve)
/// total: unknown, blank and absent selectors all resolve to it.
#[derive(Debug)]
pub struct ConfigRegistry {
    default: SiteConfig,
    variants: BTreeMap<ModeKey, SiteConfig>,
    source: Option<PathBuf>,
}

impl ConfigRegistry {
    /// Build a registry from `(mode, config)` pairs.
    ///
    /// Mode names are normalized; every entry is validated.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the `default` entry is missing,
    /// two names normalize to the same key, a name is blank, or any entry
    /// fails [`SiteConfig::validate`].
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, SiteConfig)>,
        S: AsRef<str>,
    {
        let mut normalized = BTreeMap::new();
        for (name, config) in entries {
            let name = name.as_ref();
            let key = ModeKey::normalize(Some(name));
            if key.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "mode name '{name}' cannot be empty"
                )));
            }
            if normalized.contains_key(&key) {
                return Err(ConfigError::Validation(format!(
                    "mode '{name}' is registered more than once (as '{key}')"
                )));
            }
            config.validate(&key)?;
            normalized.insert(key, config);
        }

        let default = normalized
            .remove(&ModeKey::default_mode())
            .ok_or_else(|| {
                ConfigError::Validation(format!("registry requires a '{DEFAULT_MODE}' mode"))
            })?;

        Ok(Self {
            default,
            variants: normalized,
            source: None,
        })
    }

    /// Registry embedded in the binary (`default` and `workshop` modes).
    ///
    /// # Errors
    ///
    /// Fails only if the embedded document is invalid.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(BUILTIN_REGISTRY)
    }

    /// Parse a registry from TOML content.
    ///
    /// String fields are expanded (`${VAR}`, `${VAR:-default}`) before
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut file: RegistryFile = toml::from_str(content)?;
        for (name, config) in &mut file.modes {
            config.expand_env_vars(name)?;
        }
        Self::from_entries(file.modes)
    }

    /// Load the registry.
    ///
    /// If `path` is provided, loads from that file. Otherwise searches for
    /// `lab.toml` in the current directory and parents, and falls back to
    /// [`builtin`](Self::builtin) when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `path` doesn't exist or loading fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd));
        Self::load_discovered(discovered)
    }

    /// Load a discovered registry file, or the built-in registry if none was found.
    fn load_discovered(discovered: Option<PathBuf>) -> Result<Self, ConfigError> {
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::info!("No {CONFIG_FILENAME} found, using built-in registry");
                Self::builtin()
            }
        }
    }

    /// Search for the registry file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load the registry from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut registry = Self::from_toml(&content)?;
        registry.source = Some(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            modes = registry.len(),
            "Loaded mode registry"
        );
        Ok(registry)
    }

    /// Resolve a raw selector, falling back to the `default` entry.
    #[must_use]
    pub fn resolve(&self, raw: Option<&str>) -> &SiteConfig {
        self.get(&ModeKey::normalize(raw))
    }

    /// Look up a normalized key, falling back to the `default` entry.
    #[must_use]
    pub fn get(&self, key: &ModeKey) -> &SiteConfig {
        if let Some(config) = self.variants.get(key) {
            tracing::debug!(mode = %key, "Resolved site configuration");
            return config;
        }
        if key.is_default() {
            tracing::debug!(mode = %key, "Resolved site configuration");
        } else {
            tracing::debug!(mode = %key, "Unknown mode, using default configuration");
        }
        &self.default
    }

    /// Check whether `key` has its own entry.
    #[must_use]
    pub fn is_registered(&self, key: &ModeKey) -> bool {
        key.is_default() || self.variants.contains_key(key)
    }

    /// Registered mode names, `default` first, then the rest in sorted order.
    pub fn modes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(DEFAULT_MODE).chain(self.variants.keys().map(ModeKey::as_str))
    }

    /// Registered entries in [`modes`](Self::modes) order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &SiteConfig)> {
        std::iter::once((DEFAULT_MODE, &self.default)).chain(
            self.variants
                .iter()
                .map(|(key, config)| (key.as_str(), config)),
        )
    }

    /// Number of registered modes, `default` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len() + 1
    }

    /// Always false: a registry holds at least the `default` entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Registry file this registry was loaded from (`None` for built-in and
    /// in-memory registries).
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
