//! Writing a [`Document`] back to text.
//!
//! Sections are written in document order, each as its leading comments, its `[name]` line
//! and the rest of its nodes. A default section without nodes is skipped. A blank line separates a
//! section from the next unless it already ends in one; nothing is added after the last.

use crate::document::Document;
use crate::error::{IniError, Result};
use crate::node::Node;
use crate::section::Section;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Comment { text } => f.write_str(text),
            Self::Header { name } => write!(f, "[{name}]"),
            Self::Entry(kv) => write!(f, "{}={}", kv.key, kv.value),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (at, node) in self.nodes.iter().enumerate() {
            if at == self.header_at && self.has_header() {
                writeln!(f, "[{}]", self.name)?;
            }
            writeln!(f, "{node}")?;
        }
        if self.header_at >= self.nodes.len() && self.has_header() {
            writeln!(f, "[{}]", self.name)?;
        }
        Ok(())
    }
}

/// Sections only; the byte prefix is not text and is left to [`Document::write_to`].
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.sections.iter().rposition(|section| !section.is_invisible());
        for (at, section) in self.sections.iter().enumerate() {
            if section.is_invisible() {
                continue;
            }
            write!(f, "{section}")?;
            if Some(at) != last && !section.has_trailing_blank() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Document {
    /// Write the byte prefix followed by every section.
    ///
    /// # Errors
    ///
    /// Propagates errors from the writer.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.prefix)?;
        write!(out, "{self}")
    }

    #[must_use]
    /// The full file contents [`Document::save`] would write.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.prefix.clone();
        out.extend_from_slice(self.to_string().as_bytes());
        out
    }

    /// Write the document to `path`, replacing any existing file, and reset the dirty flag.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if the file cannot be created or written.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| IniError::io(path, source))?;
        let mut out = BufWriter::new(file);
        self.write_to(&mut out)
            .and_then(|()| out.flush())
            .map_err(|source| IniError::io(path, source))?;
        self.dirty = false;
        info!(path = %path.display(), sections = self.sections.len(), "saved");
        Ok(())
    }

    /// Save to the file the document was loaded from, if there are unsaved changes.
    ///
    /// Returns whether anything was written. Dropping a document never writes it, so changes
    /// are lost unless this or [`Document::save`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::NoPath`] if the document is dirty but has no path, or
    /// [`IniError::Io`] if writing fails.
    pub fn flush(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        let path = self.path.clone().ok_or(IniError::NoPath)?;
        self.save(path)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "tests/write.rs"]
mod tests;
