//! cli
//!
//! Command-line interface layer for strsync.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments into a [`SyncConfig`]
//! - Delegate to [`crate::sync`]
//! - Render the report
//!
//! The CLI layer is thin. It never reads or writes resource files itself.

pub mod args;

pub use args::Cli;

use anyhow::Result;

use crate::core::config::SyncConfig;
use crate::sync;
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    run_with(Cli::parse_args())
}

/// Run with already-parsed arguments.
pub fn run_with(cli: Cli) -> Result<()> {
    let verbosity = cli.verbosity();
    let json = cli.json;
    let config = cli.into_config()?;

    describe(&config, verbosity);

    // In JSON mode stdout carries only the final document.
    let file_verbosity = if json { Verbosity::Quiet } else { verbosity };
    let report = sync::sync_each(&config, |file| output::file_report(file, file_verbosity))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if config.options().dry_run && report.total_added() > 0 {
        output::warn("dry run, no files were written", verbosity);
    }

    Ok(())
}

fn describe(config: &SyncConfig, verbosity: Verbosity) {
    let paths = config.paths();
    output::debug(format!("base dir: {}", paths.base_dir().display()), verbosity);
    output::debug(format!("locale dir: {}", paths.locale_dir().display()), verbosity);
    output::debug(format!("options: {:?}", config.options()), verbosity);
}
