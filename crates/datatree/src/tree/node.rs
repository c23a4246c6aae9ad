//! The node handle and its structural operations

use std::cell::{Ref, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use log::{debug, trace, warn};

use crate::error::{OwnershipReason, Result, TreeError};
use crate::tree::event::{deliver, SharedListener, TreeEvent, TreeEventKind};
use crate::tree::{ChildStore, KeyedStore, ListTreeIter, OrderedStore, TreeNode};

/// A handle to a node in a tree
///
/// Cloning a `Node` clones the handle, not the node: both handles refer to
/// the same node, and `==` compares identity. A node owns its children
/// (through its store `S`) and its value; the link back to the parent is
/// weak, so a subtree lives as long as somebody holds a handle to its root
/// (or to any node inside it).
///
/// All mutation goes through the methods here so that parent links and
/// listeners stay consistent. Nodes are single-threaded (`!Send`).
pub struct Node<S: ChildStore> {
    inner: Rc<RefCell<NodeInner<S>>>,
}

struct NodeInner<S: ChildStore> {
    key: Option<S::Key>,
    value: S::Value,
    parent: Weak<RefCell<NodeInner<S>>>,
    children: S,
    listeners: Vec<SharedListener<S>>,
}

impl<S: ChildStore> Node<S> {
    /// Create a new detached node with the given child store
    pub fn with_store(key: Option<S::Key>, value: S::Value, children: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NodeInner {
                key,
                value,
                parent: Weak::new(),
                children,
                listeners: Vec::new(),
            })),
        }
    }

    /// The node's key, if it has one
    pub fn key(&self) -> Option<Ref<'_, S::Key>> {
        Ref::filter_map(self.inner.borrow(), |inner| inner.key.as_ref()).ok()
    }

    /// The node's value
    pub fn value(&self) -> Ref<'_, S::Value> {
        Ref::map(self.inner.borrow(), |inner| &inner.value)
    }

    pub(crate) fn store(&self) -> Ref<'_, S> {
        Ref::map(self.inner.borrow(), |inner| &inner.children)
    }

    /// Replace the value and notify `ValueChanged` with the previous one
    ///
    /// Under a set-backed parent the node moves to the comparator position
    /// of its new value.
    ///
    /// # Errors
    ///
    /// `DuplicateEntry` if a set-backed parent already holds a sibling equal
    /// to the node with its new value; the value is left unchanged.
    /// `Listener` if a listener fails after the change.
    pub fn set_value(&self, value: S::Value) -> Result<()> {
        let previous = match self.parent().filter(|_| !S::ORDERED) {
            Some(parent) => parent.resort_child(self, value)?,
            None => std::mem::replace(&mut self.inner.borrow_mut().value, value),
        };
        let event = TreeEvent::new(
            TreeEventKind::ValueChanged,
            self.clone(),
            self.clone(),
            self.parent(),
            self.index(),
        )
        .with_previous_value(previous);
        self.dispatch(&event)
    }

    /// Build a detached node of the same variant from a value
    ///
    /// The new node's store is configured like this node's (same
    /// comparators for set variants).
    pub fn node_from_value(&self, value: S::Value) -> Self {
        Self::with_store(None, value, self.store().fresh())
    }

    /// Build a detached node of the same variant from a key and a value
    pub fn node_from_entry(&self, key: S::Key, value: S::Value) -> Self {
        Self::with_store(Some(key), value, self.store().fresh())
    }

    /// Build a detached copy of this node: key and value, no children,
    /// no parent, no listeners
    pub fn duplicate(&self) -> Self
    where
        S::Key: Clone,
        S::Value: Clone,
    {
        let inner = self.inner.borrow();
        Self::with_store(
            inner.key.clone(),
            inner.value.clone(),
            inner.children.fresh(),
        )
    }

    /// Register a listener on this node
    ///
    /// Registering the same listener twice has no effect.
    pub fn add_listener(&self, listener: SharedListener<S>) {
        let mut inner = self.inner.borrow_mut();
        if !inner.listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            inner.listeners.push(listener);
        }
    }

    /// Unregister a listener, returning whether it was registered
    pub fn remove_listener(&self, listener: &SharedListener<S>) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|l| !Rc::ptr_eq(l, listener));
        inner.listeners.len() != before
    }

    /// Number of listeners registered on this node
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Attach `child` to this node
    ///
    /// List variants append; set variants insert in comparator order and
    /// return `Ok(None)` without changing anything if an equal child is
    /// already present.
    ///
    /// # Errors
    ///
    /// `OwnershipConflict` if `child` already has a parent (or is this node,
    /// or the root of this node's tree). `Listener` if a listener fails after
    /// the child was attached.
    pub fn add_child(&self, child: Self) -> Result<Option<Self>> {
        self.check_attachable(&child)?;

        let inserted = self.inner.borrow_mut().children.insert(child.clone());
        let Some(index) = inserted else {
            debug!("{} store rejected an equal child", S::VARIANT);
            return Ok(None);
        };

        self.attach(&child);
        trace!("attached child at index {}", index);
        self.notify_added(&child, index)?;
        Ok(Some(child))
    }

    /// Build a child from `value` through this node's factory and attach it
    pub fn add_value(&self, value: S::Value) -> Result<Option<Self>> {
        self.add_child(self.node_from_value(value))
    }

    /// Build a child from `key` and `value` and attach it
    pub fn add_entry(&self, key: S::Key, value: S::Value) -> Result<Option<Self>> {
        self.add_child(self.node_from_entry(key, value))
    }

    /// Attach a duplicate (key and value only) of `node`
    pub fn add_copy(&self, node: &Self) -> Result<Option<Self>>
    where
        S::Key: Clone,
        S::Value: Clone,
    {
        self.add_child(node.duplicate())
    }

    /// Attach several nodes, returning how many were actually inserted
    pub fn add_children<I>(&self, nodes: I) -> Result<usize>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut added = 0;
        for node in nodes {
            if self.add_child(node)?.is_some() {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Detach `child`, returning whether it was a child of this node
    pub fn remove_child(&self, child: &Self) -> Result<bool> {
        let position = self.store().position(child);
        match position {
            Some(index) => self.remove_child_at(index).map(|_| true),
            None => Ok(false),
        }
    }

    /// Detach and return the child at `index`
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if there is no child at `index`.
    pub fn remove_child_at(&self, index: usize) -> Result<Self> {
        let removed = self.inner.borrow_mut().children.remove_at(index);
        let Some(child) = removed else {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: self.child_count(),
            });
        };

        child.detach();
        trace!("detached child at index {}", index);
        self.notify_removed(&child, index)?;
        Ok(child)
    }

    /// Detach every child, last one first
    pub fn remove_children(&self) -> Result<()> {
        for child in self.children().iter().rev() {
            self.remove_child(child)?;
        }
        Ok(())
    }

    /// Detach this node from its parent
    ///
    /// Returns `Ok(false)` for a root.
    pub fn remove_self(&self) -> Result<bool> {
        match self.parent() {
            Some(parent) => parent.remove_child(self),
            None => Ok(false),
        }
    }

    /// Put `replacement` where this node is
    ///
    /// All children of this node are moved to `replacement` (with the usual
    /// removal and insertion events), then `replacement` takes this node's
    /// slot in the parent. Ordered parents keep the sibling position; set
    /// parents place it in comparator order. This node ends up detached and
    /// childless. Returns the replacement.
    ///
    /// # Errors
    ///
    /// `OwnershipConflict` if this node is a root or `replacement` already
    /// has a parent. `DuplicateEntry` if a set-backed parent already holds a
    /// sibling equal to `replacement`; nothing is changed in that case.
    pub fn replace_self(&self, replacement: Self) -> Result<Self> {
        let parent = self
            .parent()
            .ok_or(TreeError::ownership(OwnershipReason::ReplaceRoot))?;
        if replacement.parent().is_some() {
            return Err(TreeError::ownership(OwnershipReason::AlreadyAttached));
        }
        if replacement == self.root() {
            return Err(TreeError::ownership(OwnershipReason::AncestorInsertion));
        }
        let index = self.index();
        if !parent.store().admits(&replacement, Some(index)) {
            return Err(TreeError::DuplicateEntry);
        }

        let children = self.children();
        self.remove_children()?;
        for child in children {
            if replacement.add_child(child)?.is_none() {
                warn!("replacement node rejected a transferred child");
            }
        }

        let index = self.index();
        let swapped = parent
            .inner
            .borrow_mut()
            .children
            .swap_at(index, replacement.clone());
        let Some((old, new_index)) = swapped else {
            return Err(TreeError::DuplicateEntry);
        };

        old.detach();
        parent.attach(&replacement);
        trace!("swapped child at index {} (now at {})", index, new_index);
        parent.notify_removed(&old, index)?;
        parent.notify_added(&replacement, new_index)?;
        Ok(replacement)
    }

    /// Replace this node with a node built from `value`
    pub fn replace_with_value(&self, value: S::Value) -> Result<Self> {
        self.replace_self(self.node_from_value(value))
    }

    /// Bidirectional iterator over the whole tree, positioned at this node
    ///
    /// # Errors
    ///
    /// `UnsupportedTraversalMode` for unordered (set-backed) variants.
    pub fn list_iter(&self) -> Result<ListTreeIter<Self>> {
        ListTreeIter::new(self.clone(), false)
    }

    /// Bidirectional iterator confined to this node's subtree
    ///
    /// # Errors
    ///
    /// `UnsupportedTraversalMode` for unordered (set-backed) variants.
    pub fn subtree_iter(&self) -> Result<ListTreeIter<Self>> {
        ListTreeIter::new(self.clone(), true)
    }

    /// Give `child` a new value and re-insert it where the store wants it
    ///
    /// The child is taken out of the store first, so the store stays sorted
    /// for every search. On a clash the old value goes back in at its old
    /// position.
    fn resort_child(&self, child: &Self, value: S::Value) -> Result<S::Value> {
        let mut inner = self.inner.borrow_mut();
        let index = inner.children.position(child);
        let Some((index, taken)) =
            index.and_then(|index| inner.children.remove_at(index).map(|node| (index, node)))
        else {
            return Err(TreeError::ownership(OwnershipReason::AlreadyAttached));
        };

        let previous = std::mem::replace(&mut taken.inner.borrow_mut().value, value);
        if let Some(position) = inner.children.insert(taken.clone()) {
            trace!("moved child from index {} to {}", index, position);
            return Ok(previous);
        }

        taken.inner.borrow_mut().value = previous;
        inner.children.insert(taken);
        debug!("{} store rejected a value change", S::VARIANT);
        Err(TreeError::DuplicateEntry)
    }

    fn check_attachable(&self, child: &Self) -> Result<()> {
        if child == self {
            return Err(TreeError::ownership(OwnershipReason::SelfInsertion));
        }
        if child.parent().is_some() {
            return Err(TreeError::ownership(OwnershipReason::AlreadyAttached));
        }
        if *child == self.root() {
            return Err(TreeError::ownership(OwnershipReason::AncestorInsertion));
        }
        Ok(())
    }

    fn attach(&self, child: &Self) {
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
    }

    fn detach(&self) {
        self.inner.borrow_mut().parent = Weak::new();
    }

    fn notify_added(&self, child: &Self, index: usize) -> Result<()> {
        let event = TreeEvent::new(
            TreeEventKind::ChildAdded,
            self.clone(),
            child.clone(),
            Some(self.clone()),
            index,
        );
        self.dispatch(&event)?;

        let event = TreeEvent::new(
            TreeEventKind::AddedToTree,
            child.clone(),
            child.clone(),
            Some(self.clone()),
            index,
        );
        child.dispatch(&event)
    }

    fn notify_removed(&self, child: &Self, index: usize) -> Result<()> {
        let event = TreeEvent::new(
            TreeEventKind::ChildRemoved,
            self.clone(),
            child.clone(),
            Some(self.clone()),
            index,
        );
        self.dispatch(&event)?;

        let event = TreeEvent::new(
            TreeEventKind::RemovedFromTree,
            child.clone(),
            child.clone(),
            Some(self.clone()),
            index,
        );
        child.dispatch(&event)
    }

    fn dispatch(&self, event: &TreeEvent<S>) -> Result<()> {
        let listeners = self.inner.borrow().listeners.clone();
        for listener in listeners {
            deliver(listener.as_ref(), event).map_err(TreeError::Listener)?;
        }
        Ok(())
    }
}

impl<S: OrderedStore> Node<S> {
    /// Attach `child` at `index` (`0..=child_count()`)
    ///
    /// Key-indexed list variants rebuild their key index, which costs O(n).
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `index > child_count()`, `OwnershipConflict` as
    /// for [`add_child`](Node::add_child).
    pub fn add_child_at(&self, index: usize, child: Self) -> Result<Self> {
        let len = self.child_count();
        if index > len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }
        self.check_attachable(&child)?;

        self.inner.borrow_mut().children.insert_at(index, child.clone());
        self.attach(&child);
        trace!("attached child at requested index {}", index);
        self.notify_added(&child, index)?;
        Ok(child)
    }

    /// Build a child from `value` and attach it at `index`
    pub fn add_value_at(&self, index: usize, value: S::Value) -> Result<Self> {
        self.add_child_at(index, self.node_from_value(value))
    }

    /// Build a child from `key` and `value` and attach it at `index`
    pub fn add_entry_at(&self, index: usize, key: S::Key, value: S::Value) -> Result<Self> {
        self.add_child_at(index, self.node_from_entry(key, value))
    }

    /// Attach a duplicate of `node` at `index`
    pub fn add_copy_at(&self, index: usize, node: &Self) -> Result<Self>
    where
        S::Key: Clone,
        S::Value: Clone,
    {
        self.add_child_at(index, node.duplicate())
    }
}

impl<S: KeyedStore> Node<S> {
    /// All children with the given key, in iteration order
    pub fn children_with_key(&self, key: &S::Key) -> Vec<Self> {
        self.store().keyed(key)
    }

    /// The `index`-th child with the given key
    pub fn child_with_key(&self, key: &S::Key, index: usize) -> Option<Self> {
        self.children_with_key(key).into_iter().nth(index)
    }
}

impl<S: ChildStore> TreeNode for Node<S> {
    type Key = S::Key;
    type Value = S::Value;

    const ORDERED: bool = S::ORDERED;
    const VARIANT: &'static str = S::VARIANT;

    fn parent(&self) -> Option<Self> {
        let parent = self.inner.borrow().parent.upgrade()?;
        Some(Self { inner: parent })
    }

    fn children(&self) -> Vec<Self> {
        self.store().nodes().to_vec()
    }

    fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn with_value<R, F: FnOnce(&Self::Value) -> R>(&self, f: F) -> R {
        f(&self.value())
    }

    fn child_count(&self) -> usize {
        self.store().len()
    }

    fn child_at(&self, index: usize) -> Option<Self> {
        self.store().get(index).cloned()
    }

    fn child_index(&self, child: &Self) -> Option<usize> {
        self.store().position(child)
    }
}

impl<S: ChildStore> Clone for Node<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: ChildStore> PartialEq for Node<S> {
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other)
    }
}

impl<S: ChildStore> Eq for Node<S> {}

impl<S: ChildStore> Hash for Node<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.inner).hash(state);
    }
}

impl<S> fmt::Debug for Node<S>
where
    S: ChildStore,
    S::Key: fmt::Debug,
    S::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("Node")
                .field("variant", &S::VARIANT)
                .field("key", &inner.key)
                .field("value", &inner.value)
                .field("children", &inner.children.len())
                .finish(),
            Err(_) => f.write_str("Node { <borrowed> }"),
        }
    }
}

impl<S> fmt::Display for Node<S>
where
    S: ChildStore,
    S::Value: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{KeyListTreeNode, ListTreeNode, SetTreeNode};

    #[test]
    fn test_add_child_sets_parent() {
        let root = ListTreeNode::new("root");
        let child = root.add_value("child").unwrap().unwrap();

        assert_eq!(child.parent().unwrap(), root);
        assert_eq!(root.child_count(), 1);
        assert_eq!(root.child_index(&child), Some(0));
    }

    #[test]
    fn test_attached_node_is_rejected() {
        let a = ListTreeNode::new("a");
        let b = ListTreeNode::new("b");
        let child = a.add_value("child").unwrap().unwrap();

        let err = b.add_child(child.clone()).unwrap_err();
        assert!(matches!(
            err,
            TreeError::OwnershipConflict {
                reason: OwnershipReason::AlreadyAttached
            }
        ));
        assert_eq!(a.child_count(), 1);
        assert_eq!(b.child_count(), 0);
        assert_eq!(child.parent().unwrap(), a);
    }

    #[test]
    fn test_self_and_ancestor_insertion_rejected() {
        let root = ListTreeNode::new("root");
        let child = root.add_value("child").unwrap().unwrap();

        assert!(root.add_child(root.clone()).unwrap_err().is_ownership_conflict());
        assert!(child.add_child(root.clone()).unwrap_err().is_ownership_conflict());
        assert_eq!(child.child_count(), 0);
    }

    #[test]
    fn test_remove_clears_parent() {
        let root = ListTreeNode::new("root");
        let child = root.add_value("child").unwrap().unwrap();

        assert!(child.remove_self().unwrap());
        assert!(child.parent().is_none());
        assert_eq!(root.child_count(), 0);
        assert!(!root.remove_self().unwrap());
        assert!(!root.remove_child(&child).unwrap());

        // a detached node can be attached elsewhere
        let other = ListTreeNode::new("other");
        assert!(other.add_child(child).unwrap().is_some());
    }

    #[test]
    fn test_remove_child_at_out_of_range() {
        let root = ListTreeNode::new("root");
        root.add_value("a").unwrap();

        let err = root.remove_child_at(3).unwrap_err();
        assert!(matches!(err, TreeError::IndexOutOfRange { index: 3, len: 1 }));
    }

    #[test]
    fn test_add_child_at() {
        let root = ListTreeNode::new("root");
        root.add_value("a").unwrap();
        root.add_value("c").unwrap();
        root.add_value_at(1, "b").unwrap();
        root.add_value_at(3, "d").unwrap();

        let values: Vec<_> = root.children().iter().map(|n| *n.value()).collect();
        assert_eq!(values, vec!["a", "b", "c", "d"]);

        let err = root.add_value_at(9, "z").unwrap_err();
        assert!(err.is_index_out_of_range());
        assert_eq!(root.child_count(), 4);
    }

    #[test]
    fn test_replace_self_moves_children_and_keeps_position() {
        let root = ListTreeNode::new("root");
        root.add_value("first").unwrap();
        let middle = root.add_value("middle").unwrap().unwrap();
        root.add_value("last").unwrap();
        middle.add_value("x").unwrap();
        middle.add_value("y").unwrap();

        let replacement = middle.replace_with_value("new").unwrap();

        let values: Vec<_> = root.children().iter().map(|n| *n.value()).collect();
        assert_eq!(values, vec!["first", "new", "last"]);
        assert_eq!(replacement.parent().unwrap(), root);
        assert_eq!(replacement.child_count(), 2);
        assert_eq!(*replacement.first_child().unwrap().value(), "x");
        assert!(middle.parent().is_none());
        assert!(middle.is_leaf());
    }

    #[test]
    fn test_replace_root_fails() {
        let root = ListTreeNode::new("root");
        let err = root.replace_self(ListTreeNode::new("other")).unwrap_err();
        assert!(matches!(
            err,
            TreeError::OwnershipConflict {
                reason: OwnershipReason::ReplaceRoot
            }
        ));
    }

    #[test]
    fn test_replace_with_attached_node_fails() {
        let root = ListTreeNode::new("root");
        let a = root.add_value("a").unwrap().unwrap();
        let b = root.add_value("b").unwrap().unwrap();

        assert!(a.replace_self(b).unwrap_err().is_ownership_conflict());
        assert_eq!(root.child_count(), 2);
    }

    #[test]
    fn test_replace_in_set_reorders_and_rejects_duplicates() {
        let root = SetTreeNode::new("root");
        let a = root.add_value("a").unwrap().unwrap();
        root.add_value("b").unwrap();

        let err = a.replace_with_value("b").unwrap_err();
        assert!(matches!(err, TreeError::DuplicateEntry));
        assert_eq!(a.parent().unwrap(), root);

        let c = a.replace_with_value("c").unwrap();
        assert_eq!(c.index(), 1);
        let values: Vec<_> = root.children().iter().map(|n| *n.value()).collect();
        assert_eq!(values, vec!["b", "c"]);
    }

    #[test]
    fn test_duplicate_copies_key_and_value_only() {
        let root = KeyListTreeNode::new("k", "v");
        root.add_entry("child", "c").unwrap();

        let copy = root.duplicate();
        assert_ne!(copy, root);
        assert_eq!(*copy.key().unwrap(), "k");
        assert_eq!(*copy.value(), "v");
        assert!(copy.is_leaf());
        assert!(copy.is_root());
    }

    #[test]
    fn test_listener_registration_is_a_set() {
        let root = ListTreeNode::new("root");
        let listener: SharedListener<crate::tree::ListChildren<&'static str>> = Rc::new(
            |_: &TreeEvent<crate::tree::ListChildren<&'static str>>| -> anyhow::Result<()> {
                Ok(())
            },
        );

        root.add_listener(listener.clone());
        root.add_listener(listener.clone());
        assert_eq!(root.listener_count(), 1);

        assert!(root.remove_listener(&listener));
        assert!(!root.remove_listener(&listener));
        assert_eq!(root.listener_count(), 0);
    }

    #[test]
    fn test_display_and_debug() {
        let root = KeyListTreeNode::new("k", "Tree");
        root.add_value("child").unwrap();
        assert_eq!(root.to_string(), "Tree");
        assert!(format!("{:?}", root).contains("children: 1"));
    }
}
