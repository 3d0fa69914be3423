//! Lab CLI - site configuration for the lab documentation site.
//!
//! Provides commands for:
//! - `resolve`: Resolve the configuration for a mode and emit it as JSON
//! - `check`: Validate the mode registry
//! - `modes`: List registered modes

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ModesArgs, ResolveArgs};
use output::Output;

/// Lab - site configuration resolver.
#[derive(Parser)]
#[command(name = "lab", version, about)]
struct Cli {
    /// Enable verbose output (registry source and resolution logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the site configuration for a mode and write it as JSON.
    Resolve(ResolveArgs),
    /// Load and validate the mode registry.
    Check(CheckArgs),
    /// List registered modes.
    Modes(ModesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Resolve(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Modes(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` enables DEBUG level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}
