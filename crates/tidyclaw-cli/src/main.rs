//! tidyclaw — tidies agent settings files.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::sync::Arc;
use tidyclaw::{Cli, run};
use tidyclaw_types::FsPathChecker;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let home = dirs_next::home_dir().context("could not determine home directory")?;
    let stdout = io::stdout();
    run(&cli, &home, Arc::new(FsPathChecker), &mut stdout.lock())
}
