//! Tree intersection
//!
//! Both flavours walk the master and the slave tree in lock step. The heads
//! have to match for anything to happen; below that, every master child is
//! compared with every slave child of the matching parent (so the cost per
//! level is `master children * slave children`) and only matching pairs are
//! descended into.

use log::{debug, trace};

use crate::error::Result;
use crate::options::IntersectOptions;
use crate::tree::{ChildStore, Node, TreeNode};

/// Decides how nodes of two trees match and what the result tree is made of
///
/// `M` is the master store, `L` the slave store and `R` the result store;
/// all three may differ.
pub trait IntersectProcessor<M: ChildStore, L: ChildStore, R: ChildStore> {
    /// Whether `master` and `slave` are considered the same node
    fn equals(&mut self, master: &Node<M>, slave: &Node<L>) -> bool;

    /// Build the result node for a matching pair
    ///
    /// Returning `None` builds no result at that point; the walk still
    /// continues below the pair, which suits processors that only annotate
    /// or modify the input trees.
    fn build_result_node(&mut self, master: &Node<M>, slave: &Node<L>) -> Option<Node<R>>;
}

/// Intersect two trees of the same type
///
/// The result is made of duplicates of master nodes. A master child that is
/// equivalent to a result child already present is not added a second time.
/// Returns `None` when the heads are not equivalent.
pub fn intersect<S, F>(
    master: &Node<S>,
    slave: &Node<S>,
    mut equivalent: F,
) -> Result<Option<Node<S>>>
where
    S: ChildStore,
    S::Key: Clone,
    S::Value: Clone,
    F: FnMut(&Node<S>, &Node<S>) -> bool,
{
    if !equivalent(master, slave) {
        debug!("intersection heads differ");
        return Ok(None);
    }

    let result = master.duplicate();
    intersect_children(master, slave, &result, &mut equivalent)?;
    Ok(Some(result))
}

fn intersect_children<S, F>(
    master: &Node<S>,
    slave: &Node<S>,
    result: &Node<S>,
    equivalent: &mut F,
) -> Result<()>
where
    S: ChildStore,
    S::Key: Clone,
    S::Value: Clone,
    F: FnMut(&Node<S>, &Node<S>) -> bool,
{
    let slave_children = slave.children();
    for master_child in master.children() {
        for slave_child in &slave_children {
            if !equivalent(&master_child, slave_child) {
                continue;
            }
            let present = result
                .children()
                .iter()
                .any(|existing| equivalent(existing, &master_child));
            if present {
                trace!("skipping master child already in the result");
                continue;
            }
            if let Some(added) = result.add_copy(&master_child)? {
                intersect_children(&master_child, slave_child, &added, equivalent)?;
            }
        }
    }
    Ok(())
}

/// Intersect two trees through a processor, possibly across node types
///
/// With `options.prevent_duplicates` set, a slave child that matched once is
/// not offered to later master children of the same level. Returns `None`
/// when the heads do not match or the processor built no result head.
pub fn intersect_with<M, L, R, P>(
    master: &Node<M>,
    slave: &Node<L>,
    processor: &mut P,
    options: &IntersectOptions,
) -> Result<Option<Node<R>>>
where
    M: ChildStore,
    L: ChildStore,
    R: ChildStore,
    P: IntersectProcessor<M, L, R>,
{
    if !processor.equals(master, slave) {
        debug!("intersection heads differ");
        return Ok(None);
    }

    let result = processor.build_result_node(master, slave);
    process_children(master, slave, processor, result.as_ref(), options)?;
    Ok(result)
}

fn process_children<M, L, R, P>(
    master: &Node<M>,
    slave: &Node<L>,
    processor: &mut P,
    result: Option<&Node<R>>,
    options: &IntersectOptions,
) -> Result<()>
where
    M: ChildStore,
    L: ChildStore,
    R: ChildStore,
    P: IntersectProcessor<M, L, R>,
{
    let slave_children = slave.children();
    let mut consumed = vec![false; slave_children.len()];
    let mut matched = 0;

    for master_child in master.children() {
        for (index, slave_child) in slave_children.iter().enumerate() {
            if consumed[index] || !processor.equals(&master_child, slave_child) {
                continue;
            }
            if options.prevent_duplicates {
                consumed[index] = true;
            }
            matched += 1;

            let built = processor.build_result_node(&master_child, slave_child);
            let child_result = match (result, built) {
                (Some(parent), Some(node)) => parent.add_child(node)?,
                _ => None,
            };
            process_children(
                &master_child,
                slave_child,
                processor,
                child_result.as_ref(),
                options,
            )?;
        }
    }

    if matched == 0 && !master.is_leaf() {
        debug!("no matching children below an intersected pair");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ListChildren, ListTreeNode, TreeTraversal};

    fn same_value(a: &ListTreeNode<&'static str>, b: &ListTreeNode<&'static str>) -> bool {
        *a.value() == *b.value()
    }

    #[test]
    fn test_heads_must_match() {
        let master = ListTreeNode::new("a");
        let slave = ListTreeNode::new("b");
        assert!(intersect(&master, &slave, same_value).unwrap().is_none());
    }

    #[test]
    fn test_equivalent_master_children_are_added_once() {
        let master = ListTreeNode::new("root");
        master.add_value("x").unwrap();
        master.add_value("x").unwrap();
        let slave = ListTreeNode::new("root");
        slave.add_value("x").unwrap();

        let result = intersect(&master, &slave, same_value).unwrap().unwrap();
        assert_eq!(result.values(), vec!["root", "x"]);
    }

    struct Counting {
        built: usize,
    }

    impl
        IntersectProcessor<
            ListChildren<&'static str>,
            ListChildren<&'static str>,
            ListChildren<String>,
        > for Counting
    {
        fn equals(
            &mut self,
            master: &ListTreeNode<&'static str>,
            slave: &ListTreeNode<&'static str>,
        ) -> bool {
            same_value(master, slave)
        }

        fn build_result_node(
            &mut self,
            master: &ListTreeNode<&'static str>,
            _slave: &ListTreeNode<&'static str>,
        ) -> Option<ListTreeNode<String>> {
            self.built += 1;
            Some(ListTreeNode::new(master.value().to_uppercase()))
        }
    }

    #[test]
    fn test_prevent_duplicates_consumes_slave_children() {
        let master = ListTreeNode::new("root");
        master.add_value("x").unwrap();
        master.add_value("x").unwrap();
        let slave = ListTreeNode::new("root");
        slave.add_value("x").unwrap();

        let mut processor = Counting { built: 0 };
        let options = IntersectOptions::new();
        let result: ListTreeNode<String> =
            intersect_with(&master, &slave, &mut processor, &options)
                .unwrap()
                .unwrap();
        assert_eq!(result.values(), vec!["ROOT", "X"]);
        assert_eq!(processor.built, 2);

        let mut processor = Counting { built: 0 };
        let options = IntersectOptions::new().prevent_duplicates(false);
        let result: ListTreeNode<String> =
            intersect_with(&master, &slave, &mut processor, &options)
                .unwrap()
                .unwrap();
        assert_eq!(result.values(), vec!["ROOT", "X", "X"]);
        assert_eq!(processor.built, 3);
    }
}
