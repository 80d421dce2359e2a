use super::Section;
use crate::error::IniError;
use crate::node::{KeyValue, Node};

fn comment(text: &str) -> Node {
    Node::Comment {
        text: text.to_string(),
    }
}

fn entry(key: &str, value: &str) -> Node {
    Node::Entry(KeyValue::new(key, value).unwrap())
}

fn named(nodes: Vec<Node>) -> Section {
    let mut section = Section::new("s".to_string());
    for node in nodes {
        section.push_node(node);
    }
    section
}

#[test]
fn test_first_key_wins_case_insensitively() {
    let mut section = named(vec![entry("Key", "1")]);
    assert!(!section.push_node(entry("KEY", "2")));
    assert_eq!(section.len(), 1);
    assert_eq!(section.get("key").unwrap().value(), "1");
    assert_eq!(section.get(" kEy ").unwrap().key(), "Key");
}

#[test]
fn test_headers_are_never_children() {
    let mut section = named(vec![]);
    assert!(!section.push_node(Node::Header {
        name: "other".to_string()
    }));
    assert!(section.is_empty());
}

#[test]
fn test_pop_takes_comments_after_blank() {
    let mut section = named(vec![
        entry("x", "1"),
        Node::Blank,
        comment("; about next"),
    ]);
    let moved = section.pop_trailing_trivia();
    assert_eq!(moved, vec![comment("; about next")]);
    assert_eq!(section.nodes(), &[entry("x", "1"), Node::Blank]);
}

#[test]
fn test_pop_takes_only_a_final_blank() {
    let mut section = named(vec![
        entry("x", "1"),
        Node::Blank,
        comment("; c"),
        Node::Blank,
    ]);
    let moved = section.pop_trailing_trivia();
    assert_eq!(moved, vec![comment("; c"), Node::Blank]);
    assert_eq!(section.len(), 2);
}

#[test]
fn test_pop_leaves_comments_attached_to_an_entry() {
    let mut section = named(vec![entry("x", "1"), comment("; trailing")]);
    assert!(section.pop_trailing_trivia().is_empty());
    assert_eq!(section.len(), 2);
}

#[test]
fn test_pop_stops_at_own_header() {
    let mut section = named(vec![comment("; only")]);
    assert!(section.pop_trailing_trivia().is_empty());
    assert_eq!(section.len(), 1);
}

#[test]
fn test_pop_drains_default_section() {
    let mut section = Section::new(String::new());
    section.push_node(comment("; top"));
    section.push_node(comment("; more"));
    let moved = section.pop_trailing_trivia();
    assert_eq!(moved.len(), 2);
    assert!(section.is_empty());
}

#[test]
fn test_prepend_shifts_header_and_index() {
    let mut section = named(vec![entry("x", "1")]);
    section.prepend(vec![comment("; lead"), Node::Blank]);
    assert_eq!(section.header_position(), 2);
    assert_eq!(section.get("x").unwrap().value(), "1");
    assert_eq!(section.position("x"), Some(2));
}

#[test]
fn test_ensure_trailing_blank_is_idempotent() {
    let mut section = named(vec![entry("x", "1")]);
    assert!(section.ensure_trailing_blank());
    assert!(!section.ensure_trailing_blank());
    assert!(section.has_trailing_blank());
}

#[test]
fn test_rename_entry_collision_leaves_both_keys() {
    let mut section = named(vec![entry("a", "1"), entry("b", "2")]);
    let at = section.position("a").unwrap();
    assert!(matches!(
        section.rename_entry(at, "B"),
        Err(IniError::KeyExists(_))
    ));
    assert_eq!(section.get("a").unwrap().value(), "1");
    assert_eq!(section.get("b").unwrap().value(), "2");
}

#[test]
fn test_rename_entry_same_name_is_noop() {
    let mut section = named(vec![entry("a", "1")]);
    assert!(!section.rename_entry(0, " A ").unwrap());
    assert_eq!(section.get("a").unwrap().key(), "a");
}

#[test]
fn test_remove_entry_reindexes() {
    let mut section = named(vec![entry("a", "1"), comment("; c"), entry("b", "2")]);
    let removed = section.remove_entry("A").unwrap();
    assert_eq!(removed.value(), "1");
    assert_eq!(section.position("b"), Some(1));
    assert_eq!(section.key_count(), 1);
    assert!(matches!(
        section.remove_entry("a"),
        Err(IniError::KeyNotFound(_))
    ));
}
