//! core::config
//!
//! Run configuration.
//!
//! # Overview
//!
//! A [`SyncConfig`] is built once at start-up from command-line flags and
//! passed explicitly into [`crate::sync`]. There is no ambient state: no
//! environment variables and no config files.
//!
//! Validation happens at construction and performs no file I/O, so a bad
//! invocation is rejected before anything on disk is touched. The only
//! check that needs the filesystem, [`SyncConfig::check_root`], runs at the
//! start of a sync.
//!
//! # Example
//!
//! ```
//! use strsync::core::config::{ConfigError, SyncConfig};
//! use std::path::PathBuf;
//!
//! let config = SyncConfig::from_flags(
//!     Some(PathBuf::from("/app")),
//!     Some("fr".to_string()),
//!     vec!["strings.xml".to_string()],
//! )
//! .unwrap();
//! assert_eq!(config.locale().as_str(), "fr");
//!
//! let err = SyncConfig::from_flags(None, Some("fr".into()), vec!["strings.xml".into()])
//!     .unwrap_err();
//! assert_eq!(err, ConfigError::MissingFlag("--root"));
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::paths::ResourcePaths;
use super::types::{LocaleCode, ResourceFileName, TypeError};

/// Errors from configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("must define {0}")]
    MissingFlag(&'static str),

    #[error(transparent)]
    InvalidValue(#[from] TypeError),

    #[error("no resource files given")]
    NoFiles,

    #[error("root '{}' is not a readable directory", .0.display())]
    RootNotDirectory(PathBuf),
}

/// How missing entries are merged into a locale file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Precede each appended entry with an `<!-- untranslated -->` comment.
    pub mark_untranslated: bool,
    /// Never copy base entries marked `translatable="false"`.
    pub skip_untranslatable: bool,
    /// Compute the merge but leave the locale file untouched.
    pub dry_run: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            mark_untranslated: true,
            skip_untranslatable: false,
            dry_run: false,
        }
    }
}

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    paths: ResourcePaths,
    files: Vec<ResourceFileName>,
    options: MergeOptions,
}

impl SyncConfig {
    /// Build a configuration from already-validated parts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoFiles` if `files` is empty.
    pub fn new(
        root: impl Into<PathBuf>,
        locale: LocaleCode,
        files: Vec<ResourceFileName>,
    ) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Err(ConfigError::NoFiles);
        }
        Ok(Self {
            paths: ResourcePaths::new(root, locale),
            files,
            options: MergeOptions::default(),
        })
    }

    /// Build a configuration from raw flag values.
    ///
    /// Empty strings count as missing, matching an unset flag.
    ///
    /// # Errors
    ///
    /// - `MissingFlag` if `--root` or `--locale` is absent or empty
    /// - `InvalidValue` if the locale or a file name fails validation
    /// - `NoFiles` if no file names were given
    pub fn from_flags(
        root: Option<PathBuf>,
        locale: Option<String>,
        files: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let root = root
            .filter(|r| !r.as_os_str().is_empty())
            .ok_or(ConfigError::MissingFlag("--root"))?;
        let locale = locale
            .filter(|l| !l.is_empty())
            .ok_or(ConfigError::MissingFlag("--locale"))?;
        let locale = LocaleCode::new(locale)?;

        let files = files
            .into_iter()
            .map(ResourceFileName::new)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(root, locale, files)
    }

    /// Replace the merge options.
    pub fn with_options(mut self, options: MergeOptions) -> Self {
        self.options = options;
        self
    }

    /// Root directory containing `res/`.
    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    /// Target locale.
    pub fn locale(&self) -> &LocaleCode {
        self.paths.locale()
    }

    /// Path routing for this run.
    pub fn paths(&self) -> &ResourcePaths {
        &self.paths
    }

    /// Resource files to synchronize, in command-line order.
    pub fn files(&self) -> &[ResourceFileName] {
        &self.files
    }

    /// Merge options.
    pub fn options(&self) -> MergeOptions {
        self.options
    }

    /// Check that the root is an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::RootNotDirectory` otherwise.
    pub fn check_root(&self) -> Result<(), ConfigError> {
        if self.root().is_dir() {
            Ok(())
        } else {
            Err(ConfigError::RootNotDirectory(self.root().to_path_buf()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn flags(
        root: Option<&str>,
        locale: Option<&str>,
        files: &[&str],
    ) -> Result<SyncConfig, ConfigError> {
        SyncConfig::from_flags(
            root.map(PathBuf::from),
            locale.map(String::from),
            files.iter().map(|f| f.to_string()).collect(),
        )
    }

    #[test]
    fn valid_flags() {
        let config = flags(Some("/app"), Some("fr"), &["strings.xml", "arrays.xml"]).unwrap();

        assert_eq!(config.root(), Path::new("/app"));
        assert_eq!(config.locale().as_str(), "fr");
        assert_eq!(config.files().len(), 2);
        assert_eq!(config.options(), MergeOptions::default());
    }

    #[test]
    fn missing_root() {
        let err = flags(None, Some("fr"), &["strings.xml"]).unwrap_err();
        assert_eq!(err, ConfigError::MissingFlag("--root"));
        assert_eq!(err.to_string(), "must define --root");
    }

    #[test]
    fn empty_root_is_missing() {
        let err = flags(Some(""), Some("fr"), &["strings.xml"]).unwrap_err();
        assert_eq!(err, ConfigError::MissingFlag("--root"));
    }

    #[test]
    fn missing_locale() {
        let err = flags(Some("/app"), None, &["strings.xml"]).unwrap_err();
        assert_eq!(err, ConfigError::MissingFlag("--locale"));

        let err = flags(Some("/app"), Some(""), &["strings.xml"]).unwrap_err();
        assert_eq!(err, ConfigError::MissingFlag("--locale"));
    }

    #[test]
    fn root_checked_before_locale() {
        let err = flags(None, None, &[]).unwrap_err();
        assert_eq!(err, ConfigError::MissingFlag("--root"));
    }

    #[test]
    fn invalid_locale() {
        let err = flags(Some("/app"), Some("../fr"), &["strings.xml"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn no_files() {
        let err = flags(Some("/app"), Some("fr"), &[]).unwrap_err();
        assert_eq!(err, ConfigError::NoFiles);
    }

    #[test]
    fn invalid_file_name() {
        let err = flags(Some("/app"), Some("fr"), &["strings.xml", "../x.xml"]).unwrap_err();
        assert!(err.to_string().contains("../x.xml"));
    }

    #[test]
    fn with_options_replaces() {
        let options = MergeOptions {
            mark_untranslated: false,
            skip_untranslatable: true,
            dry_run: true,
        };
        let config = flags(Some("/app"), Some("fr"), &["strings.xml"])
            .unwrap()
            .with_options(options);
        assert_eq!(config.options(), options);
    }

    #[test]
    fn check_root_existing_dir() {
        let temp = TempDir::new().unwrap();
        let config = SyncConfig::from_flags(
            Some(temp.path().to_path_buf()),
            Some("fr".into()),
            vec!["strings.xml".into()],
        )
        .unwrap();
        assert!(config.check_root().is_ok());
    }

    #[test]
    fn check_root_missing_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let config = SyncConfig::from_flags(
            Some(missing.clone()),
            Some("fr".into()),
            vec!["strings.xml".into()],
        )
        .unwrap();
        assert_eq!(
            config.check_root().unwrap_err(),
            ConfigError::RootNotDirectory(missing)
        );
    }
}
