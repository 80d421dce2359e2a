//! Loading text into a [`Document`].
//!
//! Lines are classified one at a time and routed to a current section, which starts as the
//! default section. A header for a new name opens a section and carries along the comments
//! written just above it; a header for a name seen earlier reopens that section instead, so
//! duplicate headers merge into the first occurrence.

use crate::document::Document;
use crate::error::{IniError, Result};
use crate::node::{classify, fold, trim, Node};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Length of the leading run of bytes outside ASCII, such as a UTF-8 byte order mark.
///
/// Any non-ASCII lead counts, including the first character of a non-ASCII key.
fn prefix_len(bytes: &[u8]) -> usize {
    bytes.iter().position(u8::is_ascii).unwrap_or(bytes.len())
}

impl Document {
    /// Read a document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if the file cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut doc = Self::new();
        doc.load(path)?;
        Ok(doc)
    }

    /// Replace the contents of this document with a file.
    ///
    /// Prior contents are discarded before reading, so a failed load leaves the document empty
    /// but associated with `path`. On success the dirty flag is false.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if the file cannot be read.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.clear();
        self.path = Some(path.to_path_buf());
        let bytes = fs::read(path).map_err(|source| IniError::io(path, source))?;
        self.absorb_bytes(&bytes);
        self.dirty = false;
        info!(path = %path.display(), sections = self.sections.len(), "loaded");
        Ok(())
    }

    #[must_use]
    /// Build a document from text held in memory.
    pub fn parse(text: &str) -> Self {
        Self::parse_bytes(text.as_bytes())
    }

    #[must_use]
    /// Build a document from raw bytes, capturing any leading non-ASCII prefix.
    pub fn parse_bytes(bytes: &[u8]) -> Self {
        let mut doc = Self::new();
        doc.absorb_bytes(bytes);
        doc.dirty = false;
        doc
    }

    /// Append more text to this document, continuing from its last section.
    ///
    /// The last section is first given a trailing blank line. Headers naming existing sections
    /// reopen them. Marks the document dirty if anything was added.
    pub fn merge_str(&mut self, text: &str) {
        if self.absorb(text) {
            self.dirty = true;
        }
    }

    fn absorb_bytes(&mut self, bytes: &[u8]) {
        let split = prefix_len(bytes);
        self.prefix = bytes[..split].to_vec();
        let text = String::from_utf8_lossy(&bytes[split..]);
        if matches!(text, Cow::Owned(_)) {
            warn!("source is not valid UTF-8; invalid sequences were replaced");
        }
        self.absorb(&text);
    }

    /// Classify and merge every line of `text`. Returns true if any node or section was added.
    fn absorb(&mut self, text: &str) -> bool {
        let mut changed = false;
        let mut current = if let Some(last) = self.sections.len().checked_sub(1) {
            if !self.sections[last].is_empty() {
                changed |= self.sections[last].ensure_trailing_blank();
            }
            last
        } else {
            changed = true;
            self.push_section(String::new())
        };

        let mut lines = text.split('\n').peekable();
        while let Some(raw) = lines.next() {
            let line = trim(raw);
            if line.is_empty() && lines.peek().is_none() {
                break;
            }
            let Some(node) = classify(line) else {
                debug!(line, "dropped unrecognised line");
                continue;
            };
            if let Node::Header { name } = node {
                let (next, opened) = self.open_section(name, current);
                current = next;
                changed |= opened;
            } else if self.sections[current].push_node(node) {
                changed = true;
            } else {
                debug!(section = %self.sections[current].name, line, "dropped duplicate key");
            }
        }
        changed
    }

    /// Route a header to its section, returning the new current section and whether a section
    /// was created.
    fn open_section(&mut self, name: String, current: usize) -> (usize, bool) {
        let Some(found) = self.index.get(&fold(&name)).copied() else {
            let at = self.push_section(name);
            let moved = self.sections[current].pop_trailing_trivia();
            self.sections[at].prepend(moved);
            return (at, true);
        };
        if found != current {
            debug!(section = %self.sections[found].name, "reopened section");
            self.sections[found].ensure_trailing_blank();
            let moved = self.sections[current].pop_trailing_trivia();
            self.sections[found].append(moved);
            self.sections[found].ensure_trailing_blank();
        }
        (found, false)
    }
}

#[cfg(test)]
#[path = "tests/parse.rs"]
mod tests;
