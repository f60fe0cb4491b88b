//! resource::parse
//!
//! Parse a string-resource document into a [`ResourceFile`].
//!
//! The document is tokenized with `quick-xml`, which also enforces
//! well-formedness (matching end tags, quoted attributes, valid escapes).
//! Entries keep byte-exact slices of the source so an untouched document
//! can be written back identically.

use std::collections::HashSet;
use std::ops::Range;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::{NamespaceDecl, ResourceEntry, ResourceFile, ResourceKey, ResourceKind, RootClose};

/// Tag of the document root.
const ROOT_TAG: &[u8] = b"resources";

/// Attribute prefix of a namespace declaration.
const XMLNS_PREFIX: &[u8] = b"xmlns:";

/// A malformed resource document.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{}:{}:{}: {}", .path.display(), .line, .column, .message)]
pub struct ParseError {
    /// File being parsed.
    pub path: PathBuf,
    /// 1-based line of the offending token.
    pub line: usize,
    /// 1-based column (in characters) of the offending token.
    pub column: usize,
    /// What went wrong.
    pub message: String,
}

impl ParseError {
    /// Error for a file whose bytes are not valid UTF-8. `valid` is the
    /// decodable prefix; the error points just past it.
    pub fn invalid_utf8(path: impl Into<PathBuf>, valid: &str) -> Self {
        let (line, column) = location(valid, valid.len());
        ParseError {
            path: path.into(),
            line,
            column,
            message: "file is not valid UTF-8".to_string(),
        }
    }
}

/// Parse `text`, read from `path`, into a resource file.
///
/// # Errors
///
/// Returns `ParseError` if the document is not well-formed XML, has no
/// single `<resources>` root, has non-whitespace text outside the root, or
/// contains an entry without a `name` or with a duplicate key.
///
/// # Example
///
/// ```
/// use strsync::resource::{parse, ResourceKey};
///
/// let text = r#"<resources>
///     <string name="greeting">Hello</string>
/// </resources>
/// "#;
/// let file = parse("values/strings.xml", text.to_string()).unwrap();
///
/// let entry = file.get(&ResourceKey::string("greeting")).unwrap();
/// assert_eq!(entry.value, "Hello");
/// ```
pub fn parse(path: impl Into<PathBuf>, text: String) -> Result<ResourceFile, ParseError> {
    let path = path.into();
    let parsed = Parser::new(&path, &text).run()?;

    Ok(ResourceFile {
        path,
        text,
        entries: parsed.entries,
        indent: parsed.indent,
        root_open: parsed.root_open,
        root_close: parsed.root_close,
        namespaces: parsed.namespaces,
    })
}

/// Parse output that borrows nothing from the source.
struct Parsed {
    entries: Vec<ResourceEntry>,
    indent: Option<String>,
    root_open: Range<usize>,
    root_close: RootClose,
    namespaces: Vec<NamespaceDecl>,
}

/// An entry whose end tag has not been reached yet.
struct OpenEntry {
    key: ResourceKey,
    translatable: bool,
    start: usize,
    content_start: usize,
}

struct Parser<'a> {
    path: &'a Path,
    text: &'a str,
    entries: Vec<ResourceEntry>,
    seen: HashSet<ResourceKey>,
    indent: Option<String>,
    root_open: Option<Range<usize>>,
    namespaces: Vec<NamespaceDecl>,
}

impl<'a> Parser<'a> {
    fn new(path: &'a Path, text: &'a str) -> Self {
        Self {
            path,
            text,
            entries: Vec::new(),
            seen: HashSet::new(),
            indent: None,
            root_open: None,
            namespaces: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Parsed, ParseError> {
        let mut reader = Reader::from_str(self.text);
        let mut depth = 0usize;
        let mut root_close = None;
        let mut open: Option<OpenEntry> = None;

        loop {
            let start = reader.buffer_position() as usize;
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    return Err(self.error_at(reader.error_position() as usize, err.to_string()))
                }
            };
            let end = reader.buffer_position() as usize;

            match event {
                Event::Start(e) => {
                    match depth {
                        0 => self.open_root(&e, start..end)?,
                        1 => {
                            if let Some(kind) = ResourceKind::from_tag(e.name().as_ref()) {
                                let (key, translatable) = self.entry_key(kind, &e, start)?;
                                open = Some(OpenEntry {
                                    key,
                                    translatable,
                                    start,
                                    content_start: end,
                                });
                            }
                        }
                        _ => {}
                    }
                    depth += 1;
                }
                Event::Empty(e) => match depth {
                    0 => {
                        self.open_root(&e, start..end)?;
                        root_close = Some(RootClose::SelfClosing(start..end));
                    }
                    1 => {
                        if let Some(kind) = ResourceKind::from_tag(e.name().as_ref()) {
                            let (key, translatable) = self.entry_key(kind, &e, start)?;
                            self.push_entry(key, translatable, String::new(), start..end)?;
                        }
                    }
                    _ => {}
                },
                Event::End(_) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| self.error_at(start, "unexpected end tag"))?;
                    match depth {
                        0 => root_close = Some(RootClose::EndTag(start)),
                        1 => {
                            if let Some(entry) = open.take() {
                                let value = self.text[entry.content_start..start].to_string();
                                self.push_entry(
                                    entry.key,
                                    entry.translatable,
                                    value,
                                    entry.start..end,
                                )?;
                            }
                        }
                        _ => {}
                    }
                }
                Event::Text(_) | Event::CData(_) if depth == 0 => {
                    let content = self.text[start..end].trim_start_matches('\u{feff}');
                    if !content.trim().is_empty() {
                        return Err(self.error_at(start, "text outside the <resources> element"));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth > 0 {
            return Err(self.error_at(
                self.text.len(),
                "unexpected end of file, <resources> is not closed",
            ));
        }
        let (root_open, root_close) = match (self.root_open.take(), root_close) {
            (Some(open), Some(close)) => (open, close),
            _ => return Err(self.error_at(0, "missing <resources> root element")),
        };

        Ok(Parsed {
            entries: self.entries,
            indent: self.indent,
            root_open,
            root_close,
            namespaces: self.namespaces,
        })
    }

    /// Accept the root element exactly once and record its namespace
    /// declarations.
    fn open_root(&mut self, e: &BytesStart<'_>, span: Range<usize>) -> Result<(), ParseError> {
        let start = span.start;
        if self.root_open.is_some() {
            return Err(self.error_at(start, "more than one root element"));
        }
        if e.name().as_ref() != ROOT_TAG {
            return Err(self.error_at(
                start,
                format!(
                    "root element must be <resources>, found <{}>",
                    String::from_utf8_lossy(e.name().as_ref())
                ),
            ));
        }

        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.error_at(start, err.to_string()))?;
            if let Some(prefix) = attr.key.as_ref().strip_prefix(XMLNS_PREFIX) {
                self.namespaces.push(NamespaceDecl {
                    prefix: String::from_utf8_lossy(prefix).into_owned(),
                    uri: String::from_utf8_lossy(&attr.value).into_owned(),
                });
            }
        }
        self.root_open = Some(span);
        Ok(())
    }

    /// Read the `name` and `translatable` attributes of an entry element.
    fn entry_key(
        &self,
        kind: ResourceKind,
        e: &BytesStart<'_>,
        start: usize,
    ) -> Result<(ResourceKey, bool), ParseError> {
        let name = e
            .try_get_attribute("name")
            .map_err(|err| self.error_at(start, err.to_string()))?
            .ok_or_else(|| {
                self.error_at(start, format!("<{}> has no name attribute", kind.tag()))
            })?;
        let name = name
            .unescape_value()
            .map_err(|err| self.error_at(start, err.to_string()))?
            .into_owned();
        if name.is_empty() {
            return Err(self.error_at(start, format!("<{}> has an empty name", kind.tag())));
        }

        let translatable = match e
            .try_get_attribute("translatable")
            .map_err(|err| self.error_at(start, err.to_string()))?
        {
            Some(attr) => &*attr.value != b"false",
            None => true,
        };

        Ok((ResourceKey::new(kind, name), translatable))
    }

    fn push_entry(
        &mut self,
        key: ResourceKey,
        translatable: bool,
        value: String,
        span: Range<usize>,
    ) -> Result<(), ParseError> {
        if !self.seen.insert(key.clone()) {
            return Err(self.error_at(span.start, format!("duplicate resource {}", key)));
        }
        if self.indent.is_none() {
            self.indent = line_indent(self.text, span.start).map(str::to_string);
        }
        self.entries.push(ResourceEntry {
            key,
            value,
            translatable,
            element: self.text[span].to_string(),
        });
        Ok(())
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> ParseError {
        let (line, column) = location(self.text, offset);
        ParseError {
            path: self.path.to_path_buf(),
            line,
            column,
            message: message.into(),
        }
    }
}

/// The whitespace between the start of the line and `offset`, when the
/// element at `offset` is the first thing on its line.
fn line_indent(text: &str, offset: usize) -> Option<&str> {
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &text[line_start..offset];
    if !prefix.is_empty() && prefix.chars().all(|c| c == ' ' || c == '\t') {
        Some(prefix)
    } else {
        None
    }
}

/// 1-based line and column of a byte offset.
fn location(text: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let before = &text.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    let column = match text.get(line_start..offset) {
        Some(s) => s.chars().count(),
        None => offset - line_start,
    };
    (line, column + 1)
}
