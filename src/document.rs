//! The document tree and the handles used to mutate it.
//!
//! A [`Document`] owns its sections in output order, an index from case-folded section name to
//! position, and the only dirty flag in the tree. Mutation goes through [`SectionMut`] and
//! [`EntryMut`], which borrow a section together with that flag, so every change to a value,
//! key or name marks the document without any pointer back to it.
//!
//! Looking up a section or key through a handle creates it when absent. Creation alone does not
//! mark the document dirty, but the created node is part of the tree and is written on save.

use crate::error::{IniError, Result};
use crate::node::{fold, normalize_key, normalize_section_name, KeyValue, Node};
use crate::section::Section;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize)]
/// An INI document that writes back comments, blank lines and ordering as loaded.
pub struct Document {
    #[serde(skip)]
    pub(crate) path: Option<PathBuf>,
    #[serde(skip)]
    pub(crate) prefix: Vec<u8>,
    pub(crate) sections: Vec<Section>,
    #[serde(skip)]
    pub(crate) index: HashMap<String, usize>,
    #[serde(skip)]
    pub(crate) dirty: bool,
}

impl Document {
    #[must_use]
    /// An empty document with no path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all sections, the byte prefix and the path, and reset the dirty flag.
    ///
    /// Pending changes are discarded; call [`Document::flush`] first to keep them.
    pub fn clear(&mut self) {
        self.path = None;
        self.prefix.clear();
        self.sections.clear();
        self.index.clear();
        self.dirty = false;
    }

    #[must_use]
    /// File the document was last loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    /// Opaque leading bytes captured on load and written back unchanged.
    ///
    /// This is the whole leading run of non-ASCII bytes, not just a byte order mark, so a
    /// file starting with `é=1` keeps `é` here and drops the remaining `=1` line.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    #[must_use]
    /// Whether anything changed since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    /// Number of sections, including the default section once it exists.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Sections in output order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    #[must_use]
    /// Whether a section with this name exists, ignoring ASCII case.
    pub fn contains_section(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[must_use]
    /// Whether the named section exists and holds this key.
    pub fn contains_key(&self, section: &str, key: &str) -> bool {
        self.section(section)
            .is_some_and(|section| section.contains_key(key))
    }

    #[must_use]
    /// Look up a section without creating it.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.position(name).map(|at| &self.sections[at])
    }

    #[must_use]
    /// Raw value of `key` in `section`, if both exist.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key).map(KeyValue::value)
    }

    /// Set `key` in `section`, creating either if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the section name or key is invalid.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        self.section_mut(section)?.entry(key)?.set_value(value);
        Ok(())
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        let name = normalize_section_name(name).ok()?;
        self.index.get(&fold(&name)).copied()
    }

    /// Append a new section and index it. The caller guarantees the name is unused.
    pub(crate) fn push_section(&mut self, name: String) -> usize {
        let at = self.sections.len();
        self.index.insert(fold(&name), at);
        self.sections.push(Section::new(name));
        at
    }

    pub(crate) fn reindex(&mut self) {
        self.index = self
            .sections
            .iter()
            .enumerate()
            .map(|(at, section)| (fold(&section.name), at))
            .collect();
    }

    pub(crate) fn handle(&mut self, at: usize) -> SectionMut<'_> {
        SectionMut {
            section: &mut self.sections[at],
            dirty: &mut self.dirty,
        }
    }

    /// Borrow a section for mutation, appending an empty one if it does not exist yet.
    ///
    /// The empty name addresses the default section.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::InvalidSectionName`] if the name cannot be written as a header.
    pub fn section_mut(&mut self, name: &str) -> Result<SectionMut<'_>> {
        let name = normalize_section_name(name)?;
        let at = match self.index.get(&fold(&name)) {
            Some(&at) => at,
            None if name.is_empty() => self.insert_default_section(),
            None => self.push_section(name),
        };
        Ok(self.handle(at))
    }

    /// The default section holds the lines before any header, so it always goes first.
    fn insert_default_section(&mut self) -> usize {
        self.sections.insert(0, Section::new(String::new()));
        self.reindex();
        0
    }

    /// Rename a section. Renaming to its current name, in any case, succeeds without change.
    ///
    /// # Errors
    ///
    /// Fails without mutating anything if the section does not exist, the new name is invalid
    /// or empty, or another section already has that name.
    pub fn rename_section(&mut self, name: &str, new_name: &str) -> Result<()> {
        let at = self
            .position(name)
            .ok_or_else(|| IniError::SectionNotFound(name.to_string()))?;
        let new_name = normalize_section_name(new_name)?;
        if new_name.is_empty() {
            return Err(IniError::InvalidSectionName(new_name));
        }
        let old_folded = fold(&self.sections[at].name);
        let new_folded = fold(&new_name);
        if old_folded == new_folded {
            return Ok(());
        }
        if self.index.contains_key(&new_folded) {
            return Err(IniError::SectionExists(new_name));
        }
        debug!(from = %self.sections[at].name, to = %new_name, "renamed section");
        self.index.remove(&old_folded);
        self.index.insert(new_folded, at);
        self.sections[at].name = new_name;
        self.dirty = true;
        Ok(())
    }

    /// Remove a section and everything in it.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::SectionNotFound`] if there is no such section.
    pub fn remove_section(&mut self, name: &str) -> Result<Section> {
        let at = self
            .position(name)
            .ok_or_else(|| IniError::SectionNotFound(name.to_string()))?;
        let removed = self.sections.remove(at);
        self.reindex();
        self.dirty = true;
        debug!(section = %removed.name, "removed section");
        Ok(removed)
    }
}

/// Mutable view of one section, tied to its document's dirty flag.
pub struct SectionMut<'a> {
    section: &'a mut Section,
    dirty: &'a mut bool,
}

impl<'a> SectionMut<'a> {
    #[must_use]
    /// Read-only view of the section.
    pub fn section(&self) -> &Section {
        self.section
    }

    #[must_use]
    /// Section name as written.
    pub fn name(&self) -> &str {
        &self.section.name
    }

    /// Borrow an entry for mutation, appending one with an empty value if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::InvalidKey`] if the key is not a valid key.
    pub fn entry(&mut self, key: &str) -> Result<EntryMut<'_>> {
        let key = normalize_key(key)?;
        let at = match self.section.position(&key) {
            Some(at) => at,
            None => self.section.insert_entry(key),
        };
        Ok(EntryMut {
            section: &mut *self.section,
            at,
            dirty: &mut *self.dirty,
        })
    }

    /// Consume the handle, borrowing an entry for the rest of the document borrow.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::InvalidKey`] if the key is not a valid key.
    pub fn into_entry(self, key: &str) -> Result<EntryMut<'a>> {
        let key = normalize_key(key)?;
        let at = match self.section.position(&key) {
            Some(at) => at,
            None => self.section.insert_entry(key),
        };
        Ok(EntryMut {
            section: self.section,
            at,
            dirty: self.dirty,
        })
    }

    /// Rename an entry within this section.
    ///
    /// # Errors
    ///
    /// Fails without mutating anything if the key is absent, the new key is invalid, or
    /// another entry already uses it.
    pub fn rename_key(&mut self, key: &str, new_key: &str) -> Result<()> {
        let at = self
            .section
            .position(key)
            .ok_or_else(|| IniError::KeyNotFound(key.to_string()))?;
        if self.section.rename_entry(at, new_key)? {
            *self.dirty = true;
        }
        Ok(())
    }

    /// Remove an entry from this section.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::KeyNotFound`] if there is no such key.
    pub fn remove_key(&mut self, key: &str) -> Result<KeyValue> {
        let removed = self.section.remove_entry(key)?;
        *self.dirty = true;
        debug!(section = %self.section.name, key = %removed.key, "removed key");
        Ok(removed)
    }
}

/// Mutable view of one entry, tied to its document's dirty flag.
///
/// The typed accessors live in [`crate::value`].
pub struct EntryMut<'a> {
    pub(crate) section: &'a mut Section,
    pub(crate) at: usize,
    pub(crate) dirty: &'a mut bool,
}

impl EntryMut<'_> {
    pub(crate) fn kv(&self) -> &KeyValue {
        match &self.section.nodes[self.at] {
            Node::Entry(kv) => kv,
            _ => unreachable!("entry handle points at a non-entry node"),
        }
    }

    #[must_use]
    /// Key as written.
    pub fn key(&self) -> &str {
        &self.kv().key
    }

    #[must_use]
    /// Raw value text.
    pub fn value(&self) -> &str {
        &self.kv().value
    }

    /// Give this entry a new key. Renaming to its current key, in any case, changes nothing.
    ///
    /// # Errors
    ///
    /// Fails without mutating anything if the new key is invalid or already used in this
    /// section.
    pub fn set_key(&mut self, new_key: &str) -> Result<()> {
        if self.section.rename_entry(self.at, new_key)? {
            *self.dirty = true;
        }
        Ok(())
    }

    /// Store an already normalised value, marking the document only if it differs.
    pub(crate) fn store(&mut self, value: String) {
        let kv = self.section.entry_at_mut(self.at);
        if kv.value != value {
            kv.value = value;
            *self.dirty = true;
        }
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
