//! sync
//!
//! Merge missing base entries into locale resource files.
//!
//! # Lifecycle
//!
//! For each file pair the syncer runs one linear sequence:
//!
//! ```text
//! read base -> read locale -> parse both -> plan -> render -> replace
//! ```
//!
//! Files are processed in command-line order and the run stops at the first
//! failure. Pairs already written stay written; later pairs are not touched.
//!
//! # Invariants
//!
//! - The base file is only ever read
//! - The locale file is only mutated by [`atomic::replace_file`]
//! - A pair that needs no additions is not rewritten at all
//!
//! # Example
//!
//! ```no_run
//! use strsync::core::config::SyncConfig;
//! use std::path::PathBuf;
//!
//! let config = SyncConfig::from_flags(
//!     Some(PathBuf::from("app")),
//!     Some("fr".into()),
//!     vec!["strings.xml".into()],
//! )?;
//! let report = strsync::sync::sync(&config)?;
//! println!("{} entries added", report.total_added());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod atomic;
pub mod plan;

pub use plan::MergePlan;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::core::config::{ConfigError, MergeOptions, SyncConfig};
use crate::core::paths::FilePair;
use crate::resource::{self, ParseError, RenderOptions, ResourceKey};

/// Errors from a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{}: file not found", .path.display())]
    NotFound { path: PathBuf },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }

    /// Map a read failure, turning "no such file" into `NotFound`.
    fn read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            SyncError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            SyncError::io(path, source)
        }
    }
}

/// Outcome for one file pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Base file that was read.
    pub base: PathBuf,
    /// Locale file that was (or would be) updated.
    pub locale: PathBuf,
    /// Keys appended to the locale file, in order.
    pub added: Vec<ResourceKey>,
    /// Missing keys not copied because they are not translatable.
    pub skipped: Vec<ResourceKey>,
    /// Locale entries carried over unchanged.
    pub preserved: usize,
    /// Whether the locale file was rewritten.
    pub written: bool,
}

impl FileReport {
    /// True when the locale already had every base key.
    pub fn is_up_to_date(&self) -> bool {
        self.added.is_empty()
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub files: Vec<FileReport>,
}

impl SyncReport {
    /// Number of entries added across all files.
    pub fn total_added(&self) -> usize {
        self.files.iter().map(|f| f.added.len()).sum()
    }
}

/// Synchronize every configured file.
///
/// # Errors
///
/// Returns the first error encountered; see [`merge_file`].
pub fn sync(config: &SyncConfig) -> Result<SyncReport, SyncError> {
    sync_each(config, |_| {})
}

/// Synchronize every configured file, handing each finished report to
/// `on_file` before moving on to the next file.
///
/// # Errors
///
/// - `Config` if the root is not a directory (checked before any file)
/// - otherwise the first error from [`merge_file`]
pub fn sync_each<F>(config: &SyncConfig, mut on_file: F) -> Result<SyncReport, SyncError>
where
    F: FnMut(&FileReport),
{
    config.check_root()?;

    let options = config.options();
    let mut report = SyncReport::default();
    for file in config.files() {
        let file_report = merge_pair(&config.paths().pair(file), &options)?;
        on_file(&file_report);
        report.files.push(file_report);
    }
    Ok(report)
}

/// Merge the entries `locale_path` is missing from `base_path` into it.
///
/// # Errors
///
/// - `NotFound` if either file does not exist
/// - `Parse` if either file is malformed or not UTF-8
/// - `Io` if reading, writing or renaming fails
pub fn merge_file(
    base_path: &Path,
    locale_path: &Path,
    options: &MergeOptions,
) -> Result<FileReport, SyncError> {
    let base_text = read_text(base_path)?;
    let locale_text = read_text(locale_path)?;
    let base = resource::parse(base_path, base_text)?;
    let locale = resource::parse(locale_path, locale_text)?;

    let plan = MergePlan::compute(&base, &locale, options);
    let write = !plan.is_empty() && !options.dry_run;

    if write {
        let rendered = resource::render_merged(
            &locale,
            plan.additions(),
            RenderOptions {
                mark_untranslated: options.mark_untranslated,
                fallback_indent: base.indent(),
                namespaces: base.namespaces(),
            },
        );
        atomic::replace_file(locale_path, rendered.as_bytes())?;
    }

    Ok(FileReport {
        base: base_path.to_path_buf(),
        locale: locale_path.to_path_buf(),
        added: plan.added_keys(),
        skipped: plan.skipped().to_vec(),
        preserved: plan.preserved(),
        written: write,
    })
}

/// Merge one file pair routed by [`crate::core::paths::ResourcePaths`].
pub fn merge_pair(pair: &FilePair, options: &MergeOptions) -> Result<FileReport, SyncError> {
    merge_file(&pair.base, &pair.locale, options)
}

/// Read a whole file; the handle is closed before this returns.
fn read_text(path: &Path) -> Result<String, SyncError> {
    let bytes = fs::read(path).map_err(|e| SyncError::read(path, e))?;
    String::from_utf8(bytes).map_err(|err| {
        let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
        let valid = std::str::from_utf8(valid).unwrap_or_default();
        ParseError::invalid_utf8(path, valid).into()
    })
}
