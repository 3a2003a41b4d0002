//! Document loading and raw markup inspection.
//!
//! A `Document` pairs the raw text of a page with the tree produced by
//! `html5ever`. Both views are needed: the parser repairs markup (it always
//! synthesizes `<html>`, `<head>` and `<body>`), so rules that care about what
//! the author actually wrote look at the raw text.
//!
//! A document is read once and never mutated. Rules receive it by reference.

pub mod selector;
pub mod tree;

use crate::PageCheckError;
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::RcDom;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use selector::Selector;
pub use tree::Element;

/// Matches HTML space characters
macro_rules! space_chars {
    () => {
        b' ' | b'\n' | b'\r' | b'\t' | b'\x0C'
    };
}

/// A parsed HTML page.
pub struct Document {
    source: Option<PathBuf>,
    raw: String,
    dom: RcDom,
}

impl Document {
    /// Read and parse a document from disk.
    ///
    /// Fails when the file is missing or unreadable, or is not UTF-8.
    /// Malformed or empty markup is not an error; `html5ever` repairs it and
    /// the rules report what is wrong.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PageCheckError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                PageCheckError::Parse {
                    context: path.display().to_string(),
                    message: "document is not valid UTF-8".to_string(),
                }
            } else {
                PageCheckError::DocumentRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        debug!(path = %path.display(), bytes = raw.len(), "loaded document");

        let mut document = Self::parse_labeled(raw, &path.display().to_string())?;
        document.source = Some(path.to_path_buf());
        Ok(document)
    }

    /// Parse a document from text.
    pub fn parse(raw: impl Into<String>) -> Result<Self, PageCheckError> {
        Self::parse_labeled(raw.into(), "<memory>")
    }

    fn parse_labeled(raw: String, label: &str) -> Result<Self, PageCheckError> {
        let dom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut raw.as_bytes())
            .map_err(|e| PageCheckError::Parse {
                context: label.to_string(),
                message: e.to_string(),
            })?;

        Ok(Document {
            source: None,
            raw,
            dom,
        })
    }

    /// Raw text exactly as read
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Path the document was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Label used in reports
    pub fn label(&self) -> String {
        self.source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string())
    }

    /// Top-level elements of the tree, in document order
    pub fn root_elements(&self) -> Vec<Element> {
        self.dom
            .document
            .children
            .borrow()
            .iter()
            .filter_map(|handle| Element::from_handle(handle.clone()))
            .collect()
    }

    /// All elements matching a selector, in document order
    pub fn select_all(&self, selector: &Selector) -> Vec<Element> {
        let mut steps = selector.steps().iter();
        let first = match steps.next() {
            Some(step) => step,
            None => return Vec::new(),
        };

        let mut matched: Vec<Element> = self
            .root_elements()
            .into_iter()
            .filter(|e| first.matches(e))
            .collect();

        for step in steps {
            matched = matched
                .iter()
                .flat_map(|parent| parent.children())
                .filter(|child| step.matches(child))
                .collect();
            if matched.is_empty() {
                break;
            }
        }

        matched
    }

    /// First element matching a selector
    pub fn select(&self, selector: &Selector) -> Option<Element> {
        self.select_all(selector).into_iter().next()
    }

    /// Byte offset of the `<!DOCTYPE html>` declaration, if present
    pub fn doctype_position(&self) -> Option<usize> {
        find_doctype(&self.raw)
    }

    /// Byte offset of the first `<tag` opening tag in the raw text
    pub fn opening_tag_position(&self, tag: &str) -> Option<usize> {
        find_opening_tag(&self.raw, tag)
    }

    /// Whether the raw text contains an opening tag for `tag`
    pub fn has_opening_tag(&self, tag: &str) -> bool {
        self.opening_tag_position(tag).is_some()
    }

    /// Whether the raw text contains a closing tag for `tag`
    pub fn has_closing_tag(&self, tag: &str) -> bool {
        find_closing_tag(&self.raw, tag).is_some()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("source", &self.source)
            .field("bytes", &self.raw.len())
            .finish()
    }
}

/// Case-insensitive match of `needle` at `at`
fn matches_at(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes
        .get(at..at + needle.len())
        .map(|slice| slice.eq_ignore_ascii_case(needle))
        .unwrap_or(false)
}

fn skip_spaces(bytes: &[u8], mut at: usize) -> usize {
    while let Some(space_chars!()) = bytes.get(at) {
        at += 1;
    }
    at
}

/// `<tag` followed by `>`, `/` or a space character
pub(crate) fn find_opening_tag(raw: &str, tag: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    let tag = tag.as_bytes();

    (0..bytes.len()).find(|&i| {
        bytes[i] == b'<'
            && matches_at(bytes, i + 1, tag)
            && matches!(bytes.get(i + 1 + tag.len()), Some(b'>' | b'/' | space_chars!()))
    })
}

/// `</tag` followed by optional spaces and `>`
pub(crate) fn find_closing_tag(raw: &str, tag: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    let tag = tag.as_bytes();

    (0..bytes.len()).find(|&i| {
        matches_at(bytes, i, b"</")
            && matches_at(bytes, i + 2, tag)
            && bytes.get(skip_spaces(bytes, i + 2 + tag.len())) == Some(&b'>')
    })
}

/// `<!DOCTYPE html>` with any ASCII case and spacing
pub(crate) fn find_doctype(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();

    (0..bytes.len()).find(|&i| {
        if !matches_at(bytes, i, b"<!doctype") {
            return false;
        }
        let after_keyword = i + b"<!doctype".len();
        let name_start = skip_spaces(bytes, after_keyword);
        if name_start == after_keyword || !matches_at(bytes, name_start, b"html") {
            return false;
        }
        bytes.get(skip_spaces(bytes, name_start + 4)) == Some(&b'>')
    })
}
