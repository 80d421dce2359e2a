//! Section representation for INI documents.
//!
//! A section is the run of lines between one `[name]` header and the next, plus the comments
//! the loader attached in front of its header. Nodes keep their source order; an index from
//! case-folded key to node position gives constant-time lookup. The header line itself is not
//! a child node: `header_at` records how many children are written before it.

use crate::error::{IniError, Result};
use crate::node::{fold, normalize_key, trim, KeyValue, Node};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize)]
/// Named, ordered group of blank, comment and entry lines.
pub struct Section {
    pub(crate) name: String,
    pub(crate) nodes: Vec<Node>,
    pub(crate) header_at: usize,
    #[serde(skip)]
    pub(crate) keys: HashMap<String, usize>,
}

impl Section {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    #[must_use]
    /// Section name as written; empty for the default section.
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    /// Whether a `[name]` line is written for this section.
    pub fn has_header(&self) -> bool {
        !self.name.is_empty()
    }

    #[must_use]
    /// Number of child nodes written before the header line.
    pub fn header_position(&self) -> usize {
        self.header_at
    }

    #[must_use]
    /// Child nodes in output order, never including the header.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Entries in output order.
    pub fn entries(&self) -> impl Iterator<Item = &KeyValue> {
        self.nodes.iter().filter_map(Node::as_entry)
    }

    #[must_use]
    /// Number of child nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// Whether the section has no child nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nothing is written for a default section without children. A named section always
    /// writes at least its header line.
    pub(crate) fn is_invisible(&self) -> bool {
        !self.has_header() && self.is_empty()
    }

    #[must_use]
    /// Number of entries.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    /// Whether the last child is a blank line.
    pub fn has_trailing_blank(&self) -> bool {
        matches!(self.nodes.last(), Some(Node::Blank))
    }

    #[must_use]
    /// Whether an entry with this key exists, ignoring ASCII case.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    #[must_use]
    /// Look up an entry by key, ignoring ASCII case.
    pub fn get(&self, key: &str) -> Option<&KeyValue> {
        self.position(key).and_then(|at| self.nodes[at].as_entry())
    }

    pub(crate) fn position(&self, key: &str) -> Option<usize> {
        self.keys.get(&fold(trim(key))).copied()
    }

    pub(crate) fn entry_at_mut(&mut self, at: usize) -> &mut KeyValue {
        match &mut self.nodes[at] {
            Node::Entry(kv) => kv,
            _ => unreachable!("key index points at a non-entry node"),
        }
    }

    /// Append a node. Returns false if the node was refused: headers are never children,
    /// and an entry whose key is already present loses to the earlier one.
    pub(crate) fn push_node(&mut self, node: Node) -> bool {
        match node {
            Node::Blank | Node::Comment { .. } => {
                self.nodes.push(node);
                true
            }
            Node::Entry(kv) => {
                let folded = fold(&kv.key);
                if self.keys.contains_key(&folded) {
                    return false;
                }
                self.keys.insert(folded, self.nodes.len());
                self.nodes.push(Node::Entry(kv));
                true
            }
            Node::Header { .. } => false,
        }
    }

    /// Append an entry with an empty value, returning its position.
    pub(crate) fn insert_entry(&mut self, key: String) -> usize {
        let at = self.nodes.len();
        self.keys.insert(fold(&key), at);
        self.nodes.push(Node::Entry(KeyValue {
            key,
            value: String::new(),
        }));
        at
    }

    /// Make sure the section ends with a blank line. Returns true if one was added.
    pub(crate) fn ensure_trailing_blank(&mut self) -> bool {
        if self.has_trailing_blank() {
            return false;
        }
        self.nodes.push(Node::Blank);
        true
    }

    /// Detach the comments that belong to whatever header follows this section.
    ///
    /// Walking back from the tail, a single blank line is taken only if it is the very last
    /// node; comments are taken until a blank line ends the run. Running into an entry or this
    /// section's own header means the comments describe this section, and nothing is taken.
    pub(crate) fn pop_trailing_trivia(&mut self) -> Vec<Node> {
        let floor = if self.has_header() { self.header_at } else { 0 };
        let len = self.nodes.len();
        let mut taken = 0;
        loop {
            if taken == len - floor {
                if self.has_header() {
                    return Vec::new();
                }
                break;
            }
            match &self.nodes[len - 1 - taken] {
                Node::Blank if taken > 0 => break,
                node if node.is_trivia() => taken += 1,
                _ => return Vec::new(),
            }
        }
        self.nodes.split_off(len - taken)
    }

    /// Insert nodes in front of everything else, ahead of the header line.
    pub(crate) fn prepend(&mut self, mut front: Vec<Node>) {
        if front.is_empty() {
            return;
        }
        self.header_at += front.len();
        front.append(&mut self.nodes);
        self.nodes = front;
        self.reindex();
    }

    pub(crate) fn append(&mut self, tail: Vec<Node>) {
        for node in tail {
            self.push_node(node);
        }
    }

    pub(crate) fn reindex(&mut self) {
        self.keys = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(at, node)| node.as_entry().map(|kv| (fold(&kv.key), at)))
            .collect();
    }

    /// Give the entry at `at` a new key. Returns true if the stored key changed.
    pub(crate) fn rename_entry(&mut self, at: usize, new_key: &str) -> Result<bool> {
        let new_key = normalize_key(new_key)?;
        let old_folded = fold(&self.entry_at_mut(at).key);
        let new_folded = fold(&new_key);
        if old_folded == new_folded {
            return Ok(false);
        }
        if self.keys.contains_key(&new_folded) {
            return Err(IniError::KeyExists(new_key));
        }
        self.keys.remove(&old_folded);
        self.keys.insert(new_folded, at);
        self.entry_at_mut(at).key = new_key;
        Ok(true)
    }

    /// Unlink an entry by key.
    pub(crate) fn remove_entry(&mut self, key: &str) -> Result<KeyValue> {
        let at = self
            .position(key)
            .ok_or_else(|| IniError::KeyNotFound(trim(key).to_string()))?;
        let Node::Entry(kv) = self.nodes.remove(at) else {
            unreachable!("key index points at a non-entry node");
        };
        if at < self.header_at {
            self.header_at -= 1;
        }
        self.reindex();
        Ok(kv)
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
