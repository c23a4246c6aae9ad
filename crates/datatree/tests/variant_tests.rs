mod common;

use common::{build_key_value_tree, build_value_tree, init_logging, preorder, render, REFERENCE};
use datatree::tree::{KeyListTreeNode, KeySetTreeNode, ListTreeNode, SetTreeNode, TreeNode};
use pretty_assertions::assert_eq;

#[test]
fn test_all_variants_iterate_alike() {
    init_logging();

    let list = ListTreeNode::new("Tree".to_string());
    let set = SetTreeNode::new("Tree".to_string());
    let key_list = KeyListTreeNode::new("tree".to_string(), "Tree".to_string());
    let key_set = KeySetTreeNode::new("tree".to_string(), "Tree".to_string());

    build_value_tree(&list);
    build_value_tree(&set);
    build_key_value_tree(&key_list);
    build_key_value_tree(&key_set);

    assert_eq!(preorder(&list), REFERENCE);
    assert_eq!(preorder(&set), REFERENCE);
    assert_eq!(preorder(&key_list), REFERENCE);
    assert_eq!(preorder(&key_set), REFERENCE);
}

#[test]
fn test_all_variants_render_alike() {
    let list = ListTreeNode::new("Tree".to_string());
    let set = SetTreeNode::new("Tree".to_string());
    let key_list = KeyListTreeNode::new(String::new(), "Tree".to_string());
    let key_set = KeySetTreeNode::new(String::new(), "Tree".to_string());

    build_value_tree(&list);
    build_value_tree(&set);
    build_key_value_tree(&key_list);
    build_key_value_tree(&key_set);

    let reference = render(&list);
    insta::assert_snapshot!(reference, @r###"
    Tree
    ├─ Child 1
    │  ├─ Child 1.1
    │  └─ Child 1.2
    ├─ Child 2
    │  ├─ Child 2.1
    │  ├─ Child 2.2
    │  │  ├─ Child 2.2.1
    │  │  └─ Child 2.2.2
    │  ├─ Child 2.3
    │  └─ Child 2.4
    ├─ Child 3
    │  ├─ Child 3.1
    │  └─ Child 3.2
    └─ Child 4
       └─ Child 4.1
          └─ Child 4.2
    "###);

    assert_eq!(render(&set), reference);
    assert_eq!(render(&key_list), reference);
    assert_eq!(render(&key_set), reference);
}

#[test]
fn test_list_variants_iterate_backwards() {
    let list = ListTreeNode::new("Tree".to_string());
    let key_list = KeyListTreeNode::new("tree".to_string(), "Tree".to_string());
    build_value_tree(&list);
    build_key_value_tree(&key_list);

    let mut expected: Vec<String> = REFERENCE.iter().map(|v| v.to_string()).collect();
    expected.reverse();

    let mut iter = list.last_leaf().list_iter().unwrap();
    let mut values = Vec::new();
    while iter.has_previous() {
        values.push(iter.previous().unwrap().value().clone());
    }
    assert_eq!(values, expected);

    let mut iter = key_list.last_leaf().list_iter().unwrap();
    let mut values = Vec::new();
    while let Some(node) = iter.previous() {
        values.push(node.value().clone());
    }
    assert_eq!(values, expected);
}

#[test]
fn test_list_iterator_forward_matches_tree_iterator() {
    let list = ListTreeNode::new("Tree".to_string());
    build_value_tree(&list);

    let values: Vec<String> = list
        .list_iter()
        .unwrap()
        .map(|node| node.value().clone())
        .collect();
    assert_eq!(values, REFERENCE);
}

#[test]
fn test_set_variants_refuse_list_iteration() {
    let set = SetTreeNode::new("Tree".to_string());
    let key_set = KeySetTreeNode::new("tree".to_string(), "Tree".to_string());
    build_value_tree(&set);
    build_key_value_tree(&key_set);

    assert!(set.list_iter().is_err());
    assert!(set.subtree_iter().is_err());
    assert!(key_set.list_iter().is_err());
    let err = key_set.subtree_iter().err().unwrap();
    assert_eq!(
        err.to_string(),
        "key set nodes do not support subtree-only traversal"
    );
}

#[test]
fn test_multi_key() {
    let key_list = KeyListTreeNode::new("", "Tree");
    let key_set = KeySetTreeNode::new("", "Tree");

    key_list.add_entry("key1", "Value1").unwrap();
    key_list.add_entry("key2", "Value2").unwrap();
    // backed by a list, so the same pair is added twice
    key_list.add_entry("key2", "Value2").unwrap();

    key_set.add_entry("key1", "Value1").unwrap();
    key_set.add_entry("key2", "Value2").unwrap();
    assert!(key_set.add_entry("key2", "Value2").unwrap().is_none());

    insta::assert_snapshot!(render(&key_list), @r###"
    Tree
    ├─ Value1
    ├─ Value2
    └─ Value2
    "###);
    insta::assert_snapshot!(render(&key_set), @r###"
    Tree
    ├─ Value1
    └─ Value2
    "###);

    assert_eq!(key_list.children_with_key(&"key2").len(), 2);
    assert_eq!(key_set.children_with_key(&"key2").len(), 1);
}

#[test]
fn test_navigation_on_example_tree() {
    let tree = ListTreeNode::new("Tree".to_string());
    build_value_tree(&tree);

    let child22 = tree.iter().find(|n| *n.value() == "Child 2.2").unwrap();
    assert_eq!(child22.depth(), 2);
    assert_eq!(child22.index(), 1);
    assert_eq!(*child22.parent().unwrap().value(), "Child 2");
    assert_eq!(*child22.root().value(), "Tree");
    assert_eq!(*child22.first_sibling().value(), "Child 2.1");
    assert_eq!(*child22.last_sibling().value(), "Child 2.4");
    assert_eq!(*child22.last_leaf().value(), "Child 2.2.2");
    assert_eq!(child22.highest_level(), 3);
    assert_eq!(tree.highest_level(), 3);
    assert_eq!(tree.child_count(), 4);
    assert_eq!(*tree.last_leaf().value(), "Child 4.2");
}
