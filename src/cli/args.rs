//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! `--root` and `--locale` are declared optional so that a missing flag is
//! reported through [`ConfigError::MissingFlag`] like every other
//! configuration problem, rather than as a clap usage error.

use clap::Parser;
use std::path::PathBuf;

use crate::core::config::{ConfigError, MergeOptions, SyncConfig};
use crate::ui::output::Verbosity;

/// strsync - copy newly added strings into a locale's resource files
#[derive(Parser, Debug)]
#[command(name = "strsync")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
LAYOUT:
    <ROOT>/res/values/<FILE>            base (source-language) file
    <ROOT>/res/values-<LOCALE>/<FILE>   locale file to update

EXAMPLES:
    # Add strings missing from the French translation
    strsync --root app/src/main --locale fr strings.xml

    # Preview what would be added to two files
    strsync --root . --locale pt-rBR --dry-run strings.xml arrays.xml")]
pub struct Cli {
    /// Root directory containing the `res` directory
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Locale to update, as in `res/values-<LOCALE>`
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<String>,

    /// Resource files to synchronize, e.g. strings.xml
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Show what would be added without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Do not mark appended entries with an "untranslated" comment
    #[arg(long)]
    pub no_mark: bool,

    /// Do not copy entries marked translatable="false"
    #[arg(long)]
    pub skip_untranslatable: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Merge options selected by the flags.
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            mark_untranslated: !self.no_mark,
            skip_untranslatable: self.skip_untranslatable,
            dry_run: self.dry_run,
        }
    }

    /// Output verbosity selected by the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Validate the flags into a run configuration.
    ///
    /// # Errors
    ///
    /// See [`SyncConfig::from_flags`].
    pub fn into_config(self) -> Result<SyncConfig, ConfigError> {
        let options = self.merge_options();
        Ok(SyncConfig::from_flags(self.root, self.locale, self.files)?.with_options(options))
    }
}
