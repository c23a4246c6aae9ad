use log::debug;

use crate::error::Result;
use crate::tree::{ChildStore, Node, TreeNode};

/// Deep copy of the subtree rooted at `node`
///
/// Every node is rebuilt through [`Node::duplicate`], so the copy shares no
/// node with the source and carries no listeners. Ordered variants keep the
/// child order; set variants re-derive it from their comparators.
pub fn copy<S>(node: &Node<S>) -> Result<Node<S>>
where
    S: ChildStore,
    S::Key: Clone,
    S::Value: Clone,
{
    copy_with(node, &mut |source: &Node<S>| source.duplicate())
}

/// Deep copy of the subtree rooted at `node`, building each node with `build`
///
/// `build` receives the source node and returns a detached node, which may
/// be of a different variant. If the target variant rejects a built node
/// (an equal sibling already exists) that node and its descendants are
/// left out of the copy.
pub fn copy_with<S, T, F>(node: &Node<S>, build: &mut F) -> Result<Node<T>>
where
    S: ChildStore,
    T: ChildStore,
    F: FnMut(&Node<S>) -> Node<T>,
{
    let target = build(node);
    copy_children(&target, node, build)?;
    Ok(target)
}

fn copy_children<S, T, F>(target: &Node<T>, source: &Node<S>, build: &mut F) -> Result<()>
where
    S: ChildStore,
    T: ChildStore,
    F: FnMut(&Node<S>) -> Node<T>,
{
    for child in source.children() {
        match target.add_child(build(&child))? {
            Some(copied) => copy_children(&copied, &child, build)?,
            None => debug!("copy target rejected a duplicate child, skipping its subtree"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ListTreeNode, SetTreeNode, TreeTraversal};

    #[test]
    fn test_copy_leaf() {
        let leaf = ListTreeNode::new("leaf");
        let copied = copy(&leaf).unwrap();
        assert_ne!(copied, leaf);
        assert_eq!(copied.values(), vec!["leaf"]);
    }

    #[test]
    fn test_copy_with_into_set_drops_duplicates() {
        let root = ListTreeNode::new("root");
        let a = root.add_value("a").unwrap().unwrap();
        a.add_value("a.1").unwrap();
        root.add_value("a").unwrap();
        root.add_value("b").unwrap();

        let set = copy_with(&root, &mut |n: &ListTreeNode<&'static str>| {
            SetTreeNode::new(*n.value())
        })
        .unwrap();

        assert_eq!(set.values(), vec!["root", "a", "a.1", "b"]);
    }
}
