//! The child container abstraction behind every node variant
//!
//! A [`Node`] owns its children through a store. The store decides where a
//! new child goes (append, sorted position) and whether it is accepted at
//! all. Everything else (parent links, events, ownership checks) is handled
//! by the node, so a store only ever sees detached nodes coming in and hands
//! back nodes going out.

use crate::tree::Node;

/// Storage strategy for the children of a node
///
/// All stores keep their children in a sequence so that every child has a
/// well-defined index, even for unordered variants where that index is the
/// position in comparator order.
pub trait ChildStore: Sized + 'static {
    /// Key attached to nodes of this variant (`()` for unkeyed variants)
    type Key: 'static;

    /// Value held by nodes of this variant
    type Value: 'static;

    /// Whether children keep the order in which the caller placed them
    const ORDERED: bool;

    /// Human readable variant name, used in error messages
    const VARIANT: &'static str;

    /// Create an empty store configured like this one (same comparators)
    fn fresh(&self) -> Self;

    /// The children, in iteration order
    fn nodes(&self) -> &[Node<Self>];

    /// Insert a detached node
    ///
    /// Returns the index the node ended up at, or `None` if the store
    /// rejected it (set semantics).
    fn insert(&mut self, node: Node<Self>) -> Option<usize>;

    /// Remove and return the child at `index`
    fn remove_at(&mut self, index: usize) -> Option<Node<Self>>;

    /// Exchange the child at `index` for `node`
    ///
    /// Returns the previous child and the index `node` ended up at. Ordered
    /// stores keep `node` at `index`. Returns `None` and leaves the store
    /// untouched if the store rejects `node`.
    fn swap_at(&mut self, index: usize, node: Node<Self>) -> Option<(Node<Self>, usize)>;

    /// Number of children
    fn len(&self) -> usize {
        self.nodes().len()
    }

    /// Returns true if there are no children
    fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }

    /// The child at `index`
    fn get(&self, index: usize) -> Option<&Node<Self>> {
        self.nodes().get(index)
    }

    /// Index of `node` among the children (linear scan by identity)
    fn position(&self, node: &Node<Self>) -> Option<usize> {
        self.nodes().iter().position(|child| child == node)
    }

    /// Whether `insert` would accept `node`
    ///
    /// The child at `ignore` (if any) is left out of the comparison, which
    /// is what a swap needs.
    fn admits(&self, _node: &Node<Self>, _ignore: Option<usize>) -> bool {
        true
    }
}

/// Stores that accept children at caller-chosen positions
pub trait OrderedStore: ChildStore {
    /// Insert a detached node at `index` (`index <= len`)
    fn insert_at(&mut self, index: usize, node: Node<Self>);
}

/// Stores that can look children up by key
pub trait KeyedStore: ChildStore {
    /// All children whose key equals `key`, in iteration order
    fn keyed(&self, key: &Self::Key) -> Vec<Node<Self>>;
}
