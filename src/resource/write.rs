//! resource::write
//!
//! Serialize a locale document with appended entries.
//!
//! The locale text is never re-generated. Additions are spliced in just
//! before the root's end tag, so every byte that was already in the file
//! (declaration, comments, formatting, untouched entries) is preserved.
//!
//! The one exception is the root start tag: when an appended element uses a
//! namespace prefix the locale root does not bind, the base root's
//! declaration for it is added there.

use std::collections::BTreeSet;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{NamespaceDecl, ResourceEntry, ResourceFile, RootClose};

/// Comment written before each appended entry.
pub const UNTRANSLATED_MARKER: &str = "<!-- untranslated -->";

/// Indentation used when neither document shows one.
const DEFAULT_INDENT: &str = "    ";

/// Formatting for appended entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions<'a> {
    /// Precede each addition with [`UNTRANSLATED_MARKER`].
    pub mark_untranslated: bool,
    /// Indentation to use when the locale document has none of its own.
    pub fallback_indent: Option<&'a str>,
    /// Declarations available for prefixes the locale root lacks,
    /// normally the base root's.
    pub namespaces: &'a [NamespaceDecl],
}

/// Render `locale` with `additions` appended after its existing entries.
///
/// With no additions the locale text is returned unchanged.
///
/// # Example
///
/// ```
/// use strsync::resource::{parse, render_merged, RenderOptions};
///
/// let base = parse("values/strings.xml", r#"<resources>
///     <string name="greeting">Hello</string>
///     <string name="farewell">Bye</string>
/// </resources>
/// "#.to_string()).unwrap();
/// let locale = parse("values-fr/strings.xml", r#"<resources>
///     <string name="greeting">Bonjour</string>
/// </resources>
/// "#.to_string()).unwrap();
///
/// let out = render_merged(&locale, &base.entries()[1..], RenderOptions::default());
/// assert_eq!(out, r#"<resources>
///     <string name="greeting">Bonjour</string>
///     <string name="farewell">Bye</string>
/// </resources>
/// "#);
/// ```
pub fn render_merged(
    locale: &ResourceFile,
    additions: &[ResourceEntry],
    options: RenderOptions<'_>,
) -> String {
    let text = locale.text();
    if additions.is_empty() {
        return text.to_string();
    }

    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let indent = locale
        .indent()
        .or(options.fallback_indent)
        .unwrap_or(DEFAULT_INDENT);
    let extra: usize = additions.iter().map(|e| e.element.len() + 32).sum();
    let mut out = String::with_capacity(text.len() + extra);

    let open = locale.root_open().clone();
    let declarations = missing_declarations(locale, additions, options.namespaces);
    let root_tag = declare(&text[open.clone()], &declarations);

    match locale.root_close() {
        RootClose::EndTag(at) => {
            // Additions go on their own lines; the end tag keeps its indentation.
            let head = text[..*at].trim_end_matches([' ', '\t']);
            out.push_str(&text[..open.start]);
            out.push_str(&root_tag);
            out.push_str(&head[open.end..]);
            if !head.ends_with('\n') {
                out.push_str(newline);
            }
            push_additions(&mut out, additions, indent, newline, options.mark_untranslated);
            out.push_str(&text[head.len()..]);
        }
        RootClose::SelfClosing(span) => {
            out.push_str(&text[..span.start]);
            out.push_str(&open_tag(&root_tag));
            out.push_str(newline);
            push_additions(&mut out, additions, indent, newline, options.mark_untranslated);
            out.push_str("</resources>");
            out.push_str(&text[span.end..]);
        }
    }

    out
}

fn push_additions(
    out: &mut String,
    additions: &[ResourceEntry],
    indent: &str,
    newline: &str,
    mark: bool,
) {
    for entry in additions {
        if mark {
            out.push_str(indent);
            out.push_str(UNTRANSLATED_MARKER);
            out.push_str(newline);
        }
        out.push_str(indent);
        out.push_str(&entry.element);
        out.push_str(newline);
    }
}

/// Declarations from `available` for prefixes used by `additions` that the
/// locale root does not bind, in `available` order.
fn missing_declarations<'n>(
    locale: &ResourceFile,
    additions: &[ResourceEntry],
    available: &'n [NamespaceDecl],
) -> Vec<&'n NamespaceDecl> {
    let used: BTreeSet<String> = additions
        .iter()
        .flat_map(|e| used_prefixes(&e.element))
        .collect();
    available
        .iter()
        .filter(|ns| used.contains(&ns.prefix) && !locale.declares(&ns.prefix))
        .collect()
}

/// Prefixes an element relies on from its ancestors: those on element and
/// attribute names, minus `xml`, `xmlns` and any the element declares itself.
fn used_prefixes(element: &str) -> BTreeSet<String> {
    let mut used = BTreeSet::new();
    let mut local = BTreeSet::new();
    let mut reader = Reader::from_str(element);

    // The element was tokenized once already; a failure here just ends the scan.
    while let Ok(event) = reader.read_event() {
        match event {
            Event::Start(e) | Event::Empty(e) => collect_prefixes(&e, &mut used, &mut local),
            Event::Eof => break,
            _ => {}
        }
    }

    &used - &local
}

fn collect_prefixes(e: &BytesStart<'_>, used: &mut BTreeSet<String>, local: &mut BTreeSet<String>) {
    if let Some(prefix) = name_prefix(e.name().as_ref()) {
        used.insert(prefix);
    }
    for attr in e.attributes().flatten() {
        let key = attr.key.as_ref();
        if let Some(declared) = key.strip_prefix(b"xmlns:") {
            local.insert(String::from_utf8_lossy(declared).into_owned());
        } else if let Some(prefix) = name_prefix(key) {
            used.insert(prefix);
        }
    }
}

fn name_prefix(name: &[u8]) -> Option<String> {
    let colon = name.iter().position(|&b| b == b':')?;
    match &name[..colon] {
        b"xml" | b"xmlns" => None,
        prefix => Some(String::from_utf8_lossy(prefix).into_owned()),
    }
}

/// Add `declarations` to a root start tag (or self-closing root).
fn declare(tag: &str, declarations: &[&NamespaceDecl]) -> String {
    if declarations.is_empty() {
        return tag.to_string();
    }
    let (body, close) = match tag.strip_suffix("/>") {
        Some(body) => (body, "/>"),
        None => (tag.strip_suffix('>').unwrap_or(tag), ">"),
    };

    let mut out = body.trim_end().to_string();
    for ns in declarations {
        out.push(' ');
        out.push_str(&ns.to_string());
    }
    out.push_str(close);
    out
}

/// Turn `<resources ... />` into `<resources ...>`.
fn open_tag(self_closing: &str) -> String {
    let inner = self_closing
        .strip_suffix("/>")
        .unwrap_or(self_closing)
        .trim_end();
    format!("{}>", inner)
}
