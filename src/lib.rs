//! inidoc: round-trip faithful INI documents.
//!
//! A [`Document`] keeps every comment, blank line and ordering decision of the text it was
//! loaded from, while offering case-insensitive lookup of sections and keys, typed reads and
//! writes, and collision-safe renames and removals.
//!
//! ```
//! use inidoc::Document;
//!
//! let mut doc = Document::parse("; settings\n[server]\nport = 8080\n");
//! let port: u16 = doc.section("server").and_then(|s| s.get("port")).map_or(0, |kv| kv.get_or(0));
//! assert_eq!(port, 8080);
//!
//! doc.set("server", "host", "localhost").unwrap();
//! assert!(doc.is_dirty());
//! assert_eq!(doc.to_string(), "; settings\n[server]\nport=8080\nhost=localhost\n");
//! ```
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod document;
pub mod edit_plan;
pub mod error;
pub mod node;
mod parse;
pub mod section;
pub mod value;
mod write;

pub use document::{Document, EntryMut, SectionMut};
pub use error::{IniError, Result};
pub use node::{KeyValue, Node};
pub use section::Section;
pub use value::IniValue;
