//! The edit plan batches document modifications across files.
//!
//! A plan is a JSON list of edits, each naming a file, a section and an operation. Edits are
//! grouped by file; each file is loaded once, its edits applied in order, and it is saved only
//! if every edit succeeded and something actually changed.

use crate::document::Document;
use crate::error::{IniError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
/// Serialisable collection of edits for atomic per-file application.
pub struct EditPlan {
    /// Edits in application order.
    pub edits: Vec<Edit>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
/// One change to one section of one file.
pub struct Edit {
    /// Target file path for this modification.
    pub file_name: String,
    /// Section the operation addresses; empty for the default section.
    #[serde(default)]
    pub section: String,
    /// What to do to the section.
    #[serde(flatten)]
    pub change: Change,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
/// Operation applied to a section.
pub enum Change {
    /// Set a key, creating the section and key if needed.
    Set {
        /// Key to set.
        key: String,
        /// New value text.
        value: String,
    },
    /// Rename the section.
    RenameSection {
        /// New section name.
        to: String,
    },
    /// Rename a key within the section.
    RenameKey {
        /// Existing key.
        key: String,
        /// New key.
        to: String,
    },
    /// Remove the section.
    RemoveSection,
    /// Remove a key from the section.
    RemoveKey {
        /// Key to remove.
        key: String,
    },
}

impl Edit {
    /// Apply this edit to a loaded document, ignoring `file_name`.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying document operation.
    pub fn apply_to(&self, doc: &mut Document) -> Result<()> {
        match &self.change {
            Change::Set { key, value } => doc.set(&self.section, key, value),
            Change::RenameSection { to } => doc.rename_section(&self.section, to),
            Change::RenameKey { key, to } => {
                if !doc.contains_section(&self.section) {
                    return Err(IniError::SectionNotFound(self.section.clone()));
                }
                doc.section_mut(&self.section)?.rename_key(key, to)
            }
            Change::RemoveSection => doc.remove_section(&self.section).map(drop),
            Change::RemoveKey { key } => {
                if !doc.contains_section(&self.section) {
                    return Err(IniError::SectionNotFound(self.section.clone()));
                }
                doc.section_mut(&self.section)?.remove_key(key).map(drop)
            }
        }
    }
}

impl EditPlan {
    /// Read a plan from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if the file cannot be read, or [`IniError::Plan`] if it is not a
    /// valid plan.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| IniError::io(path, source))?;
        serde_json::from_str(&contents).map_err(|e| IniError::Plan(e.to_string()))
    }

    /// Apply all edits in the plan, file by file.
    ///
    /// Files that do not exist yet start from an empty document. Returns the files written.
    ///
    /// # Errors
    ///
    /// Stops at the first failing edit; files processed before it have already been saved, the
    /// failing file is left untouched.
    pub fn apply(&self) -> Result<Vec<PathBuf>> {
        let mut file_groups: BTreeMap<&str, Vec<&Edit>> = BTreeMap::new();
        for edit in &self.edits {
            file_groups.entry(edit.file_name.as_str()).or_default().push(edit);
        }

        let mut written = Vec::new();
        for (file_name, edits) in file_groups {
            let path = PathBuf::from(file_name);
            let mut doc = if path.exists() {
                Document::open(&path)?
            } else {
                debug!(path = %path.display(), "starting new document");
                Document::new()
            };
            for edit in edits {
                edit.apply_to(&mut doc)?;
            }
            if doc.is_dirty() {
                doc.save(&path)?;
                written.push(path);
            }
        }
        info!(files = written.len(), "applied edit plan");
        Ok(written)
    }
}

#[cfg(test)]
#[path = "tests/edit_plan.rs"]
mod tests;
