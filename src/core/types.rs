//! core::types
//!
//! Strong types for the values that select files on disk.
//!
//! # Types
//!
//! - [`LocaleCode`] - Validated resource qualifier suffix (`fr`, `pt-rBR`)
//! - [`ResourceFileName`] - Validated bare resource file name (`strings.xml`)
//!
//! # Validation
//!
//! Both types end up joined onto the root directory. Validating them at
//! construction time means a path built from them can never escape the
//! `res/` tree.
//!
//! # Examples
//!
//! ```
//! use strsync::core::types::{LocaleCode, ResourceFileName};
//!
//! let locale = LocaleCode::new("pt-rBR").unwrap();
//! let file = ResourceFileName::new("strings.xml").unwrap();
//! assert_eq!(locale.values_dir(), "values-pt-rBR");
//! assert_eq!(file.as_str(), "strings.xml");
//!
//! assert!(LocaleCode::new("../fr").is_err());
//! assert!(ResourceFileName::new("../strings.xml").is_err());
//! ```

use std::fmt;

use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid locale '{value}': {reason}")]
    InvalidLocale { value: String, reason: &'static str },

    #[error("invalid resource file name '{value}': {reason}")]
    InvalidFileName { value: String, reason: &'static str },
}

/// A validated locale qualifier.
///
/// This is the part after `values-` in a resource directory name. Android
/// qualifiers use ASCII letters and digits separated by `-`, with `+` in
/// BCP 47 form (`b+sr+Latn`); `_` is tolerated for hand-made layouts.
///
/// # Example
///
/// ```
/// use strsync::core::types::LocaleCode;
///
/// assert!(LocaleCode::new("fr").is_ok());
/// assert!(LocaleCode::new("b+sr+Latn").is_ok());
/// assert!(LocaleCode::new("").is_err());
/// assert!(LocaleCode::new("fr/CA").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Create a new validated locale code.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidLocale` if the code is empty or contains
    /// characters outside `[A-Za-z0-9-_+]`.
    pub fn new(code: impl Into<String>) -> Result<Self, TypeError> {
        let code = code.into();
        let reason = if code.is_empty() {
            Some("locale cannot be empty")
        } else if code.starts_with('-') || code.ends_with('-') {
            Some("locale cannot start or end with '-'")
        } else if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
        {
            Some("locale may only contain ASCII letters, digits, '-', '_' and '+'")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(TypeError::InvalidLocale {
                value: code,
                reason,
            }),
            None => Ok(Self(code)),
        }
    }

    /// Get the locale code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the resource directory holding this locale's files.
    pub fn values_dir(&self) -> String {
        format!("values-{}", self.0)
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<LocaleCode> for String {
    fn from(code: LocaleCode) -> Self {
        code.0
    }
}

/// A validated resource file name.
///
/// Must be a single path component: no separators, not `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceFileName(String);

impl ResourceFileName {
    /// Create a new validated file name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidFileName` if the name is empty, is `.` or
    /// `..`, or contains a path separator or NUL.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("file name cannot be empty")
        } else if name == "." || name == ".." {
            Some("file name cannot be '.' or '..'")
        } else if name.contains(['/', '\\']) {
            Some("file name cannot contain a path separator")
        } else if name.contains('\0') {
            Some("file name cannot contain NUL")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(TypeError::InvalidFileName {
                value: name,
                reason,
            }),
            None => Ok(Self(name)),
        }
    }

    /// Get the file name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ResourceFileName> for String {
    fn from(name: ResourceFileName) -> Self {
        name.0
    }
}
