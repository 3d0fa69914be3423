//! Lab mode site configuration.
//!
//! Maps a mode selector (the `LAB_MODE` environment variable) to the
//! [`SiteConfig`] handed to the documentation site generator: page title,
//! hero content and sidebar tree.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), lab_config::ConfigError> {
//! use lab_config::{ConfigRegistry, ModeKey};
//!
//! let registry = ConfigRegistry::builtin()?;
//!
//! let config = registry.resolve(Some("  Workshop "));
//! assert!(config.title.starts_with("Redis Workshop"));
//!
//! // Unknown modes fall back to the default entry.
//! let config = registry.get(&ModeKey::normalize(Some("staging")));
//! assert_eq!(config.hero.home_link, "/intro/welcome/");
//! # Ok(())
//! # }
//! ```
//!
//! ## Registry Files
//!
//! [`ConfigRegistry::load`] reads `lab.toml` (auto-discovered in the current
//! directory and its parents) and falls back to the built-in registry when
//! no file exists. Every registry is validated when it is constructed, so a
//! dangling home link or a duplicated slug fails at startup.
//!
//! ## Environment Variable Expansion
//!
//! String values in registry files support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `title`, `hero.tagline`, `hero.subtitle`, `hero.home_link`.

mod expand;
mod mode;
mod registry;
mod site;

use std::path::PathBuf;

pub use mode::{DEFAULT_MODE, MODE_ENV_VAR, ModeKey};
pub use registry::{CONFIG_FILENAME, ConfigRegistry};
pub use site::{HeroContent, SidebarNode, SiteConfig};

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Registry file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("{0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`modes.workshop.title`").
        field: String,
        /// Error message (e.g., "${`LAB_TITLE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
