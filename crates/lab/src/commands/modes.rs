//! `lab modes` command implementation.

use clap::Args;

use super::RegistryArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the modes command.
#[derive(Args)]
pub(crate) struct ModesArgs {
    #[command(flatten)]
    registry: RegistryArgs,
}

impl ModesArgs {
    /// Print one registered mode per line to stdout.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let registry = self.registry.load()?;
        for mode in registry.modes() {
            output.data(mode)?;
        }
        Ok(())
    }
}
