//! barrelsmith CLI - generate and maintain TypeScript barrel files
//!
//! Usage: barrelsmith <COMMAND>
//!
//! Commands:
//!   generate  Write barrel files for every configured rule
//!   check     Fail when a barrel is missing or out of date
//!   init      Create a starter barrelsmith.toml
//!   watch     Regenerate on file changes
//!   doctor    Diagnose setup and lint barrel files

mod cli;
mod commands;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::ui::context::UiContext;

/// Overrides the verbosity flags, e.g. `BARRELSMITH_LOG=barrelsmith=debug`
const LOG_ENV: &str = "BARRELSMITH_LOG";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ui = UiContext::new(cli.json, cli.verbose, cli.color);
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Generate { dry_run, no_cache } => {
            commands::generate::cmd_generate(&cwd, config, dry_run, no_cache, &ui)
        }
        Commands::Check { diff } => commands::check::cmd_check(&cwd, config, diff, &ui),
        Commands::Init { force } => commands::init::cmd_init(&cwd, force, &ui),
        Commands::Watch { format, no_cache } => {
            commands::watch::cmd_watch(&cwd, config, format, no_cache, &ui)
        }
        Commands::Doctor { fix } => commands::doctor::cmd_doctor(&cwd, config, fix, &ui),
    }
}

fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "barrelsmith=info,warn",
        2 => "barrelsmith=debug,info",
        _ => "trace",
    }
}

/// Diagnostic logs on stderr; stdout carries command output
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
