//! `lab resolve` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use lab_config::{ConfigRegistry, DEFAULT_MODE, ModeKey, SiteConfig};

use super::RegistryArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Mode selector (default: value of LAB_MODE).
    #[arg(short, long)]
    mode: Option<String>,

    #[command(flatten)]
    registry: RegistryArgs,

    /// Write the JSON to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry fails to load or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let registry = self.registry.load()?;
        let key = self.mode_key();
        tracing::debug!(
            mode = %key,
            registry = %RegistryArgs::describe(&registry),
            "Resolving site configuration"
        );
        if !key.is_empty() && !registry.is_registered(&key) {
            output.warning(&format!("Unknown mode '{key}', using '{DEFAULT_MODE}'"));
        }

        let config = registry.get(&key);
        let json = render_json(config, self.pretty)?;

        match &self.output {
            Some(path) => {
                write_json(path, &json)?;
                output.success(&format!(
                    "Wrote '{}' configuration to {}",
                    effective_mode(&registry, &key),
                    path.display()
                ));
            }
            None => output.data(&json)?,
        }

        Ok(())
    }

    /// Mode from `--mode`, falling back to the environment.
    fn mode_key(&self) -> ModeKey {
        self.mode
            .as_deref()
            .map_or_else(ModeKey::from_env, |mode| ModeKey::normalize(Some(mode)))
    }
}

/// Name of the registry entry `key` resolves to.
fn effective_mode<'a>(registry: &ConfigRegistry, key: &'a ModeKey) -> &'a str {
    if registry.is_registered(key) {
        key.as_str()
    } else {
        DEFAULT_MODE
    }
}

/// Serialize the configuration for the site generator.
fn render_json(config: &SiteConfig, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(config)
    } else {
        serde_json::to_string(config)
    }
}

/// Write JSON to `path`, creating parent directories.
fn write_json(path: &Path, json: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format!("{json}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry() -> ConfigRegistry {
        ConfigRegistry::builtin().unwrap()
    }

    #[test]
    fn test_render_json_compact() {
        let registry = registry();
        let json = render_json(registry.resolve(Some("workshop")), false).unwrap();

        assert!(!json.contains('\n'));
        assert!(json.starts_with(
            r#"{"title":"Redis Workshop: Context Engineering with Redis & LangChain""#
        ));
        assert!(json.contains(r#""homeLink":"/intro-ws/welcome/""#));
    }

    #[test]
    fn test_render_json_pretty_round_trips() {
        let registry = registry();
        let config = registry.resolve(None);
        let json = render_json(config, true).unwrap();

        assert!(json.contains('\n'));
        let parsed: SiteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed, config);
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("src/generated/lab-config.json");

        write_json(&path, "{}").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn test_mode_flag_is_normalized() {
        let args = ResolveArgs {
            mode: Some(" Workshop ".to_owned()),
            registry: RegistryArgs { registry: None },
            output: None,
            pretty: false,
        };

        assert_eq!(args.mode_key().as_str(), "workshop");
    }

    #[test]
    fn test_effective_mode() {
        let registry = registry();
        let workshop = ModeKey::normalize(Some("workshop"));
        let staging = ModeKey::normalize(Some("staging"));
        let blank = ModeKey::normalize(None);

        assert_eq!(effective_mode(&registry, &workshop), "workshop");
        assert_eq!(effective_mode(&registry, &staging), "default");
        assert_eq!(effective_mode(&registry, &blank), "default");
    }
}
