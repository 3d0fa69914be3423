//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod modes;
pub(crate) mod resolve;

use std::path::PathBuf;

use clap::Args;
use lab_config::{ConfigError, ConfigRegistry};

pub(crate) use check::CheckArgs;
pub(crate) use modes::ModesArgs;
pub(crate) use resolve::ResolveArgs;

/// Registry location shared by all commands.
#[derive(Args)]
pub(crate) struct RegistryArgs {
    /// Path to the mode registry (default: auto-discover lab.toml, then built-in).
    #[arg(short, long, env = "LAB_REGISTRY")]
    registry: Option<PathBuf>,
}

impl RegistryArgs {
    /// Load and validate the registry.
    pub(crate) fn load(&self) -> Result<ConfigRegistry, ConfigError> {
        ConfigRegistry::load(self.registry.as_deref())
    }

    /// Human-readable registry origin.
    pub(crate) fn describe(registry: &ConfigRegistry) -> String {
        registry.source().map_or_else(
            || "built-in".to_owned(),
            |path| path.display().to_string(),
        )
    }
}
