//! CLI example that builds a small key/value tree and prints it as an outline
//!
//! Usage:
//!   cargo run --example outline [needle]
//!
//! With a needle, only the branches whose values contain it are kept
//! (an intersection against a filtered copy of the tree).

use std::env;

use datatree::prelude::*;
use datatree::tree::{KeyListChildren, TreeEvent};

type Outline = KeyListTreeNode<String, String>;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let needle = env::args().nth(1);

    let tree = Outline::new("tree".into(), "Tree".into());
    tree.add_listener(std::rc::Rc::new(
        |event: &TreeEvent<KeyListChildren<String, String>>| -> anyhow::Result<()> {
            log::info!("{} at index {}", event.kind(), event.index());
            Ok(())
        },
    ));
    build(&tree)?;

    println!("Outline:");
    println!("═══════════════════════════════");
    print!("{}", render(&tree));
    println!("═══════════════════════════════");
    println!("  Nodes: {}", tree.iter().count());
    println!("  Leaves: {}", tree.leaves().len());
    println!("  Deepest level: {}", tree.highest_level());

    println!();
    println!("Backwards:");
    let mut cursor = tree.last_leaf().list_iter()?;
    let mut backwards = Vec::new();
    while let Some(node) = cursor.previous() {
        backwards.push(node.value().clone());
    }
    println!("  {}", backwards.join(" <- "));

    if let Some(needle) = needle {
        let filtered = copy(&tree)?;
        for node in filtered.iter().collect::<Vec<_>>().into_iter().rev() {
            if node.is_leaf() && !node.is_root() && !node.value().contains(needle.as_str()) {
                node.remove_self()?;
            }
        }

        println!();
        println!("Matching '{}':", needle);
        match intersect(&tree, &filtered, |a, b| *a.value() == *b.value())? {
            Some(result) => print!("{}", render(&result)),
            None => println!("  (nothing)"),
        }
    }

    Ok(())
}

fn build(tree: &Outline) -> anyhow::Result<()> {
    let branches: &[(&str, &[&str])] = &[
        ("1", &["1.1", "1.2"]),
        ("2", &["2.1", "2.2", "2.3", "2.4"]),
        ("3", &["3.1", "3.2"]),
    ];
    for (name, leaves) in branches {
        let branch = append(tree, name)?;
        for leaf in leaves.iter() {
            append(&branch, leaf)?;
        }
    }

    if let Some(node) = tree.find_by_value(&label("2.2")) {
        append(&node, "2.2.1")?;
        append(&node, "2.2.2")?;
    }

    let four = append(tree, "4")?;
    let four_one = append(&four, "4.1")?;
    append(&four_one, "4.2")?;
    Ok(())
}

/// Append a keyed child; key lists never reject one
fn append(parent: &Outline, name: &str) -> anyhow::Result<Outline> {
    parent
        .add_entry(key(name), label(name))?
        .ok_or_else(|| anyhow::anyhow!("key list rejected {}", name))
}

fn key(name: &str) -> String {
    format!("child_{}", name.replace('.', ""))
}

fn label(name: &str) -> String {
    format!("Child {}", name)
}

/// Render a tree with box-drawing connectors
fn render(root: &Outline) -> String {
    let mut out = String::new();
    for node in root.iter() {
        let mut prefix = String::new();
        let mut ancestors = node.ancestors();
        ancestors.pop();
        for ancestor in ancestors.iter().rev() {
            prefix.push_str(if ancestor.is_last() { "   " } else { "│  " });
        }
        if !node.is_root() {
            prefix.push_str(if node.is_last() { "└─ " } else { "├─ " });
        }
        out.push_str(&format!("{}{}\n", prefix, node));
    }
    out
}
