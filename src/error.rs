//! Failures surfaced by document I/O and structural mutation.
//!
//! Lines the classifier cannot place, and repeated keys within a section, are never errors:
//! the loader drops them and logs at debug level. Everything here is a refusal to act, and no
//! variant is ever returned after a partial mutation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Reasons a load, save or mutation was refused.
pub enum IniError {
    /// The file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Flush was requested on a document that was never associated with a file.
    #[error("document has no file path")]
    NoPath,
    /// Section names may not contain `]` or line breaks, and renames may not target the empty name.
    #[error("invalid section name: {0:?}")]
    InvalidSectionName(String),
    /// Keys must be non-empty, single-line, free of `;#=` and not look like a section header.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
    /// Another section already uses this name (compared case-insensitively).
    #[error("section already exists: {0:?}")]
    SectionExists(String),
    /// Another entry in the section already uses this key (compared case-insensitively).
    #[error("key already exists: {0:?}")]
    KeyExists(String),
    /// No section with this name.
    #[error("no such section: {0:?}")]
    SectionNotFound(String),
    /// No entry with this key in the addressed section.
    #[error("no such key: {0:?}")]
    KeyNotFound(String),
    /// An edit plan could not be read or decoded.
    #[error("edit plan: {0}")]
    Plan(String),
}

/// Shorthand for results carrying an [`IniError`].
pub type Result<T> = std::result::Result<T, IniError>;

impl IniError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<IniError> for io::Error {
    fn from(err: IniError) -> Self {
        let kind = match &err {
            IniError::Io { source, .. } => source.kind(),
            IniError::SectionNotFound(_) | IniError::KeyNotFound(_) => io::ErrorKind::NotFound,
            IniError::SectionExists(_) | IniError::KeyExists(_) => io::ErrorKind::AlreadyExists,
            IniError::NoPath
            | IniError::InvalidSectionName(_)
            | IniError::InvalidKey(_)
            | IniError::Plan(_) => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}
