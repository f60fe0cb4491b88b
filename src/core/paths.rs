//! core::paths
//!
//! Centralized path routing for the resource tree.
//!
//! # Layout
//!
//! The directory contract is fixed; only the root and locale vary:
//!
//! ```text
//! <root>/res/values/<file>            base (source-language) file
//! <root>/res/values-<locale>/<file>   target locale file
//! ```
//!
//! No code outside this module should join `res` or `values` onto a path.
//!
//! # Example
//!
//! ```
//! use strsync::core::paths::ResourcePaths;
//! use strsync::core::types::{LocaleCode, ResourceFileName};
//! use std::path::PathBuf;
//!
//! let paths = ResourcePaths::new("/app", LocaleCode::new("fr").unwrap());
//! let pair = paths.pair(&ResourceFileName::new("strings.xml").unwrap());
//!
//! assert_eq!(pair.base, PathBuf::from("/app/res/values/strings.xml"));
//! assert_eq!(pair.locale, PathBuf::from("/app/res/values-fr/strings.xml"));
//! ```

use std::path::{Path, PathBuf};

use super::types::{LocaleCode, ResourceFileName};

/// Name of the resource directory under the root.
const RES_DIR: &str = "res";

/// Name of the base (default-language) values directory.
const BASE_VALUES_DIR: &str = "values";

/// Path routing for one root/locale combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
    root: PathBuf,
    locale: LocaleCode,
}

/// The two files taking part in one merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    /// Authoritative base file; only ever read.
    pub base: PathBuf,
    /// Locale file that gets augmented.
    pub locale: PathBuf,
}

impl ResourcePaths {
    /// Create path routing for `root` and `locale`.
    pub fn new(root: impl Into<PathBuf>, locale: LocaleCode) -> Self {
        Self {
            root: root.into(),
            locale,
        }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The target locale.
    pub fn locale(&self) -> &LocaleCode {
        &self.locale
    }

    /// `<root>/res`
    pub fn res_dir(&self) -> PathBuf {
        self.root.join(RES_DIR)
    }

    /// `<root>/res/values`
    pub fn base_dir(&self) -> PathBuf {
        self.res_dir().join(BASE_VALUES_DIR)
    }

    /// `<root>/res/values-<locale>`
    pub fn locale_dir(&self) -> PathBuf {
        self.res_dir().join(self.locale.values_dir())
    }

    /// Base and locale paths for `file`.
    pub fn pair(&self, file: &ResourceFileName) -> FilePair {
        FilePair {
            base: self.base_dir().join(file.as_str()),
            locale: self.locale_dir().join(file.as_str()),
        }
    }
}
