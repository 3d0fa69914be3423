//! `lab check` command implementation.

use clap::Args;
use lab_config::SiteConfig;

use super::RegistryArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    registry: RegistryArgs,
}

impl CheckArgs {
    /// Load the registry (which validates every mode) and print a summary.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let registry = self.registry.load()?;
        output.highlight(&format!("Registry: {}", RegistryArgs::describe(&registry)));
        for (mode, config) in registry.entries() {
            output.info(&summary_line(mode, config));
        }
        output.success(&format!("Registry is valid: {} modes", registry.len()));

        Ok(())
    }
}

/// One-line summary of a mode.
fn summary_line(mode: &str, config: &SiteConfig) -> String {
    let pages = config.slugs().len();
    let noun = if pages == 1 { "page" } else { "pages" };
    format!(
        "  {mode:<12} {} ({pages} {noun}, home {})",
        config.title, config.hero.home_link
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_config::ConfigRegistry;

    #[test]
    fn test_summary_line() {
        let registry = ConfigRegistry::builtin().unwrap();
        let line = summary_line("default", registry.resolve(None));

        assert_eq!(
            line,
            "  default      Context Engineering with Redis & LangChain (3 pages, home /intro/welcome/)"
        );
    }
}
