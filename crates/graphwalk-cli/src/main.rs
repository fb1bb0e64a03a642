//! Graphwalk CLI - classical graph and grid algorithms from the command line.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use graphwalk_cli::Config;
use graphwalk_cli::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {cause}", "caused by".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}

fn try_main(args: &Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let config =
        Config::discover(args.config.as_deref(), &cwd).context("failed to load configuration")?;
    tracing::debug!(?config, "Resolved configuration");

    cli::run(args, &config)?;
    Ok(())
}
