//! CLI Argument Parsing
//!
//! Global flags (`--json`, `--color`, `--verbose`, `--config`) are inherited
//! by every subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// barrelsmith - generate and maintain TypeScript barrel files
#[derive(Parser, Debug)]
#[command(name = "barrelsmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output as NDJSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate barrel files from config rules
    Generate {
        /// Preview changes without writing
        #[arg(long)]
        dry_run: bool,

        /// Bypass the scan cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Check barrel files for drift (CI mode)
    Check {
        /// Show a unified diff for each stale barrel
        #[arg(long)]
        diff: bool,
    },

    /// Create a starter barrelsmith.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Watch for changes and regenerate barrel files
    Watch {
        /// Run the formatter after each pass
        #[arg(long)]
        format: bool,

        /// Bypass the scan cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Diagnose setup, validate config and lint barrel files
    Doctor {
        /// Regenerate stale barrels
        #[arg(long)]
        fix: bool,
    },
}
