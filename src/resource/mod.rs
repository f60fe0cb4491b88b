//! resource
//!
//! In-memory model of a string-resource document.
//!
//! # Overview
//!
//! A [`ResourceFile`] is an ordered sequence of [`ResourceEntry`] values
//! together with the document text it was parsed from. Parsing lives in
//! [`parse`], serialization in [`write`]; the merge algorithm in
//! [`crate::sync`] only ever sees entries and keys.
//!
//! # Format
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <resources>
//!     <string name="greeting">Hello</string>
//!     <string-array name="colors"><item>Red</item></string-array>
//!     <plurals name="files"><item quantity="one">%d file</item></plurals>
//! </resources>
//! ```
//!
//! Entries are the `string`, `string-array` and `plurals` children of the
//! root. Everything else in the document is carried along untouched.
//!
//! # Identity
//!
//! Each resource type has its own namespace, so an entry is identified by
//! its [`ResourceKey`]: the kind plus the `name` attribute.

pub mod parse;
pub mod write;

pub use parse::{parse, ParseError};
pub use write::{render_merged, RenderOptions, UNTRANSLATED_MARKER};

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// Kind of a string resource element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// `<string>`
    String,
    /// `<string-array>`
    StringArray,
    /// `<plurals>`
    Plurals,
}

impl ResourceKind {
    /// Map an element tag to a kind, if it is a string resource.
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"string" => Some(Self::String),
            b"string-array" => Some(Self::StringArray),
            b"plurals" => Some(Self::Plurals),
            _ => None,
        }
    }

    /// Element tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::StringArray => "string-array",
            Self::Plurals => "plurals",
        }
    }

    /// Resource type used in `@type/name` references.
    pub fn reference_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::StringArray => "array",
            Self::Plurals => "plurals",
        }
    }
}

/// Identity of an entry within a file.
///
/// Displays as a resource reference, e.g. `@string/greeting`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    pub kind: ResourceKind,
    pub name: String,
}

impl ResourceKey {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Key of a plain `<string>` entry.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(ResourceKind::String, name)
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}/{}", self.kind.reference_type(), self.name)
    }
}

impl Serialize for ResourceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One string resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Kind and name.
    pub key: ResourceKey,
    /// Raw inner markup of the element, exactly as written.
    pub value: String,
    /// False when the element carries `translatable="false"`.
    pub translatable: bool,
    /// The complete element, from `<` of the start tag to `>` of the end tag.
    pub element: String,
}

impl ResourceEntry {
    /// The `name` attribute.
    pub fn name(&self) -> &str {
        &self.key.name
    }
}

/// An `xmlns:<prefix>` declaration on the root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    pub prefix: String,
    /// Attribute value as written, entities left escaped.
    pub uri: String,
}

impl fmt::Display for NamespaceDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = if self.uri.contains('"') { '\'' } else { '"' };
        write!(f, "xmlns:{}={}{}{}", self.prefix, quote, self.uri, quote)
    }
}

/// Where the document's root element closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RootClose {
    /// Byte offset of the `</resources>` end tag.
    EndTag(usize),
    /// Byte span of a self-closing `<resources/>` root.
    SelfClosing(Range<usize>),
}

/// A parsed resource document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    path: PathBuf,
    text: String,
    entries: Vec<ResourceEntry>,
    indent: Option<String>,
    root_open: Range<usize>,
    root_close: RootClose,
    namespaces: Vec<NamespaceDecl>,
}

impl ResourceFile {
    /// Path the document was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Original document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &ResourceKey) -> Option<&ResourceEntry> {
        self.entries.iter().find(|e| &e.key == key)
    }

    /// Set of all keys in the file.
    pub fn keys(&self) -> HashSet<&ResourceKey> {
        self.entries.iter().map(|e| &e.key).collect()
    }

    /// Leading whitespace of the first entry's line, if it has one.
    pub fn indent(&self) -> Option<&str> {
        self.indent.as_deref()
    }

    /// Namespace prefixes declared on the root element.
    pub fn namespaces(&self) -> &[NamespaceDecl] {
        &self.namespaces
    }

    /// Whether the root element binds `prefix`.
    pub fn declares(&self, prefix: &str) -> bool {
        self.namespaces.iter().any(|ns| ns.prefix == prefix)
    }

    /// Byte span of the root's start tag (or of a self-closing root).
    pub(crate) fn root_open(&self) -> &Range<usize> {
        &self.root_open
    }

    pub(crate) fn root_close(&self) -> &RootClose {
        &self.root_close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags() {
        for kind in [
            ResourceKind::String,
            ResourceKind::StringArray,
            ResourceKind::Plurals,
        ] {
            assert_eq!(ResourceKind::from_tag(kind.tag().as_bytes()), Some(kind));
        }
        assert_eq!(ResourceKind::from_tag(b"dimen"), None);
        assert_eq!(ResourceKind::from_tag(b"item"), None);
    }

    #[test]
    fn key_display() {
        assert_eq!(ResourceKey::string("app_name").to_string(), "@string/app_name");
        assert_eq!(
            ResourceKey::new(ResourceKind::StringArray, "colors").to_string(),
            "@array/colors"
        );
        assert_eq!(
            ResourceKey::new(ResourceKind::Plurals, "files").to_string(),
            "@plurals/files"
        );
    }

    #[test]
    fn key_serializes_as_reference() {
        let json = serde_json::to_string(&ResourceKey::string("greeting")).unwrap();
        assert_eq!(json, "\"@string/greeting\"");
    }

    #[test]
    fn namespace_decl_display() {
        let ns = NamespaceDecl {
            prefix: "xliff".to_string(),
            uri: "urn:oasis:names:tc:xliff:document:1.2".to_string(),
        };
        assert_eq!(
            ns.to_string(),
            r#"xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2""#
        );
    }

    #[test]
    fn kinds_are_separate_namespaces() {
        let a = ResourceKey::string("x");
        let b = ResourceKey::new(ResourceKind::Plurals, "x");
        assert_ne!(a, b);
    }
}
