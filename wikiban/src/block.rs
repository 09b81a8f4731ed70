//! Embedded-block codec
//!
//! A board's configuration lives inside a delimited block of a larger wiki
//! document. The codec locates that block line by line and extracts or
//! replaces its body without disturbing any surrounding content: every line
//! outside the body, the marker lines included, stays byte-identical.
//!
//! The delimiter convention depends on the hosting document format, so the
//! codec is a pair of line-matching patterns rather than one hardcoded
//! syntax. A line matching the start pattern opens the block; the next line
//! matching the end pattern closes it.

use regex::Regex;

use crate::error::{BoardError, Result};

/// Marker patterns delimiting an embedded block
#[derive(Debug, Clone)]
pub struct BlockSyntax {
    start: Regex,
    end: Regex,
}

impl BlockSyntax {
    /// Build a syntax from explicit start/end line patterns
    pub fn new(start: Regex, end: Regex) -> Self {
        Self { start, end }
    }

    /// Wiki processor blocks: `{{{#!KanbanBoard` ... `}}}`. The opening
    /// braces may also sit on the line before the `#!KanbanBoard` tag.
    pub fn wiki_macro() -> Self {
        Self {
            start: Regex::new(r"^\s*(\{\{\{)?#!KanbanBoard").unwrap(),
            end: Regex::new(r"^\s*\}\}\}").unwrap(),
        }
    }

    /// Markdown-style fenced blocks: ```` ```tag ```` ... ```` ``` ````
    pub fn fenced(tag: &str) -> Self {
        Self {
            start: Regex::new(&format!(r"^\s*```{}\s*$", regex::escape(tag))).unwrap(),
            end: Regex::new(r"^\s*```\s*$").unwrap(),
        }
    }

    /// HTML-like tagged blocks: `<element>` ... `</element>`, each marker on
    /// its own line
    pub fn tagged(element: &str) -> Self {
        let escaped = regex::escape(element);
        Self {
            start: Regex::new(&format!(r"^\s*<{escaped}>\s*$")).unwrap(),
            end: Regex::new(&format!(r"^\s*</{escaped}>\s*$")).unwrap(),
        }
    }

    /// Extract the block body from `document`.
    ///
    /// Body lines sit strictly between the marker lines and come back joined
    /// by newline. Fails with [`BoardError::BlockNotFound`] when there is no
    /// start marker, or a start marker with no end marker after it.
    pub fn extract(&self, document: &str) -> Result<String> {
        let mut body: Vec<&str> = Vec::new();
        let mut in_block = false;

        for line in document.split('\n') {
            if !in_block {
                if self.start.is_match(line) {
                    in_block = true;
                }
            } else if self.end.is_match(line) {
                return Ok(body.join("\n"));
            } else {
                body.push(line);
            }
        }

        Err(BoardError::BlockNotFound)
    }

    /// Replace the block body, leaving every other line byte-identical.
    ///
    /// Fails with [`BoardError::BlockNotFound`] under the same conditions as
    /// [`BlockSyntax::extract`]; the document is returned unmodified in
    /// spirit — the caller receives the error, not a half-edited text.
    pub fn replace(&self, document: &str, new_body: &str) -> Result<String> {
        let mut out: Vec<&str> = Vec::new();
        let mut in_block = false;
        let mut closed = false;

        for line in document.split('\n') {
            if closed {
                out.push(line);
            } else if !in_block {
                out.push(line);
                if self.start.is_match(line) {
                    in_block = true;
                    out.push(new_body);
                }
            } else if self.end.is_match(line) {
                out.push(line);
                closed = true;
            }
        }

        if !closed {
            return Err(BoardError::BlockNotFound);
        }

        Ok(out.join("\n"))
    }
}
