//! Line-level building blocks of an INI document.
//!
//! Every line of source text is classified into at most one [`Node`]. Headers only steer the
//! loader to the section that receives the following lines; sections store blank lines,
//! comments and entries, and remember where their own header line sits among them.

use crate::error::{IniError, Result};
use serde::Serialize;

/// Characters stripped from both ends of every line, key and value.
pub const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\x0c', '\x0b'];

/// Characters a key may never contain.
const KEY_FORBIDDEN: &[char] = &[';', '#', '=', '\r', '\n'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One classified line of an INI document.
pub enum Node {
    /// An empty or whitespace-only line.
    Blank,
    /// A line starting with `;` or `#`, kept verbatim including the marker.
    Comment {
        /// Full comment text.
        text: String,
    },
    /// A `[name]` line. Only produced by [`classify`]; sections never store it as a child.
    Header {
        /// Text between the brackets, trimmed.
        name: String,
    },
    /// A `key=value` line.
    Entry(KeyValue),
}

impl Node {
    #[must_use]
    /// Whether this node may be moved along with the comments preceding a section header.
    pub fn is_trivia(&self) -> bool {
        matches!(self, Self::Blank | Self::Comment { .. })
    }

    #[must_use]
    /// The entry carried by this node, if it is one.
    pub fn as_entry(&self) -> Option<&KeyValue> {
        match self {
            Self::Entry(kv) => Some(kv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single `key=value` entry.
pub struct KeyValue {
    pub(crate) key: String,
    pub(crate) value: String,
}

impl KeyValue {
    /// Build a detached entry, validating the key and cutting the value to one trimmed line.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::InvalidKey`] if the key fails validation after trimming.
    pub fn new(key: &str, value: &str) -> Result<Self> {
        let key = normalize_key(key)?;
        Ok(Self {
            key,
            value: single_line(value).to_string(),
        })
    }

    #[must_use]
    /// Key as written.
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    /// Raw value text; never contains CR or LF.
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    /// Whether the value is the empty string.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Strip [`TRIM_CHARS`] from both ends.
#[must_use]
pub fn trim(text: &str) -> &str {
    text.trim_matches(TRIM_CHARS)
}

/// Cut at the first CR or LF, then trim.
#[must_use]
pub fn single_line(text: &str) -> &str {
    let end = text.find(['\r', '\n']).unwrap_or(text.len());
    trim(&text[..end])
}

/// Lookup form of a section or key name. Only ASCII letters are folded.
#[must_use]
pub fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}

fn looks_like_header(text: &str) -> bool {
    text.starts_with('[') && text[1..].contains(']')
}

/// Trim a key and check it can be written back as the left side of a `key=value` line.
///
/// # Errors
///
/// Returns [`IniError::InvalidKey`] if the trimmed key is empty, contains any of `;#=` or a
/// line break, or starts with `[` followed later by `]`.
pub fn normalize_key(key: &str) -> Result<String> {
    let key = trim(key);
    if key.is_empty() || key.contains(KEY_FORBIDDEN) || looks_like_header(key) {
        return Err(IniError::InvalidKey(key.to_string()));
    }
    Ok(key.to_string())
}

/// Trim brackets and whitespace from a section name and check it fits in a header line.
///
/// The empty name is accepted here because it addresses the default section.
///
/// # Errors
///
/// Returns [`IniError::InvalidSectionName`] if the name contains `]` or a line break.
pub fn normalize_section_name(name: &str) -> Result<String> {
    let name = name.trim_matches(|c| c == '[' || c == ']' || TRIM_CHARS.contains(&c));
    if name.contains([']', '\r', '\n']) {
        return Err(IniError::InvalidSectionName(name.to_string()));
    }
    Ok(name.to_string())
}

/// Classify one line of source text. Returns `None` for lines that match no rule.
///
/// The line is trimmed first. Rules are tried in order: blank, comment, header, entry.
#[must_use]
pub fn classify(line: &str) -> Option<Node> {
    let line = trim(line);
    if line.is_empty() {
        return Some(Node::Blank);
    }
    if line.contains(['\r', '\n']) {
        return None;
    }
    if line.starts_with([';', '#']) {
        return Some(Node::Comment {
            text: line.to_string(),
        });
    }
    if let Some(rest) = line.strip_prefix('[') {
        if let Some(close) = rest.find(']') {
            return Some(Node::Header {
                name: trim(&rest[..close]).to_string(),
            });
        }
    }
    match line.find('=') {
        Some(eq) if eq > 0 => {
            let key = normalize_key(&line[..eq]).ok()?;
            Some(Node::Entry(KeyValue {
                key,
                value: trim(&line[eq + 1..]).to_string(),
            }))
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/node.rs"]
mod tests;
