//! Shared fixtures for the integration tests
#![allow(dead_code)]

use std::fmt::Display;

use datatree::tree::{ChildStore, Node, TreeNode};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Pre-order values of the example tree
pub const REFERENCE: [&str; 17] = [
    "Tree",
    "Child 1",
    "Child 1.1",
    "Child 1.2",
    "Child 2",
    "Child 2.1",
    "Child 2.2",
    "Child 2.2.1",
    "Child 2.2.2",
    "Child 2.3",
    "Child 2.4",
    "Child 3",
    "Child 3.1",
    "Child 3.2",
    "Child 4",
    "Child 4.1",
    "Child 4.2",
];

fn value_child<S>(parent: &Node<S>, value: &str) -> Node<S>
where
    S: ChildStore<Value = String>,
{
    parent.add_value(value.to_string()).unwrap().unwrap()
}

fn entry_child<S>(parent: &Node<S>, key: &str, value: &str) -> Node<S>
where
    S: ChildStore<Key = String, Value = String>,
{
    parent
        .add_entry(key.to_string(), value.to_string())
        .unwrap()
        .unwrap()
}

/// Build the example tree below `head` using values only
pub fn build_value_tree<S>(head: &Node<S>)
where
    S: ChildStore<Value = String>,
{
    let child1 = value_child(head, "Child 1");
    value_child(&child1, "Child 1.1");
    value_child(&child1, "Child 1.2");

    let child2 = value_child(head, "Child 2");
    value_child(&child2, "Child 2.1");
    let child22 = value_child(&child2, "Child 2.2");
    value_child(&child22, "Child 2.2.1");
    value_child(&child22, "Child 2.2.2");
    value_child(&child2, "Child 2.3");
    value_child(&child2, "Child 2.4");

    let child3 = value_child(head, "Child 3");
    value_child(&child3, "Child 3.1");
    value_child(&child3, "Child 3.2");

    let child4 = value_child(head, "Child 4");
    let child41 = value_child(&child4, "Child 4.1");
    value_child(&child41, "Child 4.2");
}

/// Build the example tree below `head` with keys
pub fn build_key_value_tree<S>(head: &Node<S>)
where
    S: ChildStore<Key = String, Value = String>,
{
    let child1 = entry_child(head, "child_1", "Child 1");
    entry_child(&child1, "child_11", "Child 1.1");
    entry_child(&child1, "child_12", "Child 1.2");

    let child2 = entry_child(head, "child_2", "Child 2");
    entry_child(&child2, "child_21", "Child 2.1");
    let child22 = entry_child(&child2, "child_22", "Child 2.2");
    entry_child(&child22, "child_221", "Child 2.2.1");
    entry_child(&child22, "child_222", "Child 2.2.2");
    entry_child(&child2, "child_23", "Child 2.3");
    entry_child(&child2, "child_24", "Child 2.4");

    let child3 = entry_child(head, "child_3", "Child 3");
    entry_child(&child3, "child_31", "Child 3.1");
    entry_child(&child3, "child_32", "Child 3.2");

    let child4 = entry_child(head, "child_4", "Child 4");
    let child41 = entry_child(&child4, "child_41", "Child 4.1");
    entry_child(&child41, "child_42", "Child 4.2");
}

/// Pre-order values as strings
pub fn preorder<N>(root: &N) -> Vec<String>
where
    N: TreeNode,
    N::Value: Display,
{
    root.iter()
        .map(|node| node.with_value(|value| value.to_string()))
        .collect()
}

/// Render a tree with box-drawing connectors, one node per line
pub fn render<N>(root: &N) -> String
where
    N: TreeNode,
    N::Value: Display,
{
    let mut lines = Vec::new();
    for node in root.iter() {
        let mut line = String::new();
        let mut ancestors = node.ancestors();
        ancestors.pop();
        for ancestor in ancestors.iter().rev() {
            line.push_str(if ancestor.is_last() { "   " } else { "│  " });
        }
        if !node.is_root() {
            line.push_str(if node.is_last() { "└─ " } else { "├─ " });
        }
        node.with_value(|value| line.push_str(&value.to_string()));
        lines.push(line);
    }
    lines.join("\n")
}
