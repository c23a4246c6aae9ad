//! Set-backed child stores: value sets and key/value sets
//!
//! Both stores keep their children sorted by comparator and reject a new
//! child when an existing one compares equal. Rejection is not an error: the
//! insertion simply does not happen and the caller gets `None` back.

use std::cmp::Ordering;

use crate::tree::compare::{compare_keys, natural_order, Comparator};
use crate::tree::{ChildStore, KeyedStore, Node};

/// Children sorted and deduplicated by a value comparator
pub struct SetChildren<V: 'static> {
    items: Vec<Node<SetChildren<V>>>,
    compare: Comparator<V>,
}

impl<V: 'static> SetChildren<V> {
    /// Create an empty store ordered by `compare`
    pub fn new(compare: Comparator<V>) -> Self {
        Self {
            items: Vec::new(),
            compare,
        }
    }

    /// The comparator ordering this store
    pub fn comparator(&self) -> Comparator<V> {
        self.compare.clone()
    }

    fn search(&self, node: &Node<Self>) -> Result<usize, usize> {
        let value = node.value();
        self.items.binary_search_by(|probe| {
            if probe == node {
                return Ordering::Equal;
            }
            (self.compare)(&*probe.value(), &*value)
        })
    }
}

impl<V: Ord + 'static> Default for SetChildren<V> {
    fn default() -> Self {
        Self::new(natural_order())
    }
}

impl<V: 'static> ChildStore for SetChildren<V> {
    type Key = ();
    type Value = V;

    const ORDERED: bool = false;
    const VARIANT: &'static str = "set";

    fn fresh(&self) -> Self {
        Self::new(self.compare.clone())
    }

    fn nodes(&self) -> &[Node<Self>] {
        &self.items
    }

    fn insert(&mut self, node: Node<Self>) -> Option<usize> {
        let index = self.search(&node).err()?;
        self.items.insert(index, node);
        Some(index)
    }

    fn remove_at(&mut self, index: usize) -> Option<Node<Self>> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    fn swap_at(&mut self, index: usize, node: Node<Self>) -> Option<(Node<Self>, usize)> {
        if index >= self.items.len() || !self.admits(&node, Some(index)) {
            return None;
        }
        let old = self.items.remove(index);
        let position = self.search(&node).unwrap_or_else(|position| position);
        self.items.insert(position, node);
        Some((old, position))
    }

    fn admits(&self, node: &Node<Self>, ignore: Option<usize>) -> bool {
        match self.search(node) {
            Ok(found) => Some(found) == ignore,
            Err(_) => true,
        }
    }
}

/// A tree node whose children form a sorted set of values
pub type SetTreeNode<V> = Node<SetChildren<V>>;

impl<V: Ord + 'static> Node<SetChildren<V>> {
    /// Create a new detached set node ordering its children by `V: Ord`
    pub fn new(value: V) -> Self {
        Node::with_store(None, value, SetChildren::default())
    }
}

impl<V: 'static> Node<SetChildren<V>> {
    /// Create a new detached set node ordering its children by `compare`
    pub fn with_comparator(compare: Comparator<V>, value: V) -> Self {
        Node::with_store(None, value, SetChildren::new(compare))
    }

    /// The comparator ordering this node's children
    pub fn comparator(&self) -> Comparator<V> {
        self.store().comparator()
    }
}

/// Children sorted by key, then by value
///
/// Equality is double-keyed: a child is only rejected when an existing one
/// has an equal key AND an equal value. Children without a key sort after
/// all keyed children.
pub struct KeySetChildren<K: 'static, V: 'static> {
    items: Vec<Node<KeySetChildren<K, V>>>,
    key_compare: Comparator<K>,
    value_compare: Comparator<V>,
}

impl<K: 'static, V: 'static> KeySetChildren<K, V> {
    /// Create an empty store ordered by the given comparators
    pub fn new(key_compare: Comparator<K>, value_compare: Comparator<V>) -> Self {
        Self {
            items: Vec::new(),
            key_compare,
            value_compare,
        }
    }

    /// The comparator applied to keys
    pub fn key_comparator(&self) -> Comparator<K> {
        self.key_compare.clone()
    }

    /// The comparator applied to values of equal keys
    pub fn value_comparator(&self) -> Comparator<V> {
        self.value_compare.clone()
    }

    fn compare(&self, a: &Node<Self>, b: &Node<Self>) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let by_key = compare_keys(&self.key_compare, a.key().as_deref(), b.key().as_deref());
        by_key.then_with(|| (self.value_compare)(&*a.value(), &*b.value()))
    }

    fn search(&self, node: &Node<Self>) -> Result<usize, usize> {
        self.items
            .binary_search_by(|probe| self.compare(probe, node))
    }
}

impl<K: Ord + 'static, V: Ord + 'static> Default for KeySetChildren<K, V> {
    fn default() -> Self {
        Self::new(natural_order(), natural_order())
    }
}

impl<K: 'static, V: 'static> ChildStore for KeySetChildren<K, V> {
    type Key = K;
    type Value = V;

    const ORDERED: bool = false;
    const VARIANT: &'static str = "key set";

    fn fresh(&self) -> Self {
        Self::new(self.key_compare.clone(), self.value_compare.clone())
    }

    fn nodes(&self) -> &[Node<Self>] {
        &self.items
    }

    fn insert(&mut self, node: Node<Self>) -> Option<usize> {
        let index = self.search(&node).err()?;
        self.items.insert(index, node);
        Some(index)
    }

    fn remove_at(&mut self, index: usize) -> Option<Node<Self>> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    fn swap_at(&mut self, index: usize, node: Node<Self>) -> Option<(Node<Self>, usize)> {
        if index >= self.items.len() || !self.admits(&node, Some(index)) {
            return None;
        }
        let old = self.items.remove(index);
        let position = self.search(&node).unwrap_or_else(|position| position);
        self.items.insert(position, node);
        Some((old, position))
    }

    fn admits(&self, node: &Node<Self>, ignore: Option<usize>) -> bool {
        match self.search(node) {
            Ok(found) => Some(found) == ignore,
            Err(_) => true,
        }
    }
}

impl<K: 'static, V: 'static> KeyedStore for KeySetChildren<K, V> {
    fn keyed(&self, key: &K) -> Vec<Node<Self>> {
        let order = |node: &Node<Self>| {
            compare_keys(&self.key_compare, node.key().as_deref(), Some(key))
        };
        let start = self.items.partition_point(|node| order(node) == Ordering::Less);
        let end = self.items.partition_point(|node| order(node) != Ordering::Greater);
        self.items[start..end].to_vec()
    }
}

/// A tree node whose children form a sorted set of key/value entries
pub type KeySetTreeNode<K, V> = Node<KeySetChildren<K, V>>;

impl<K: Ord + 'static, V: Ord + 'static> Node<KeySetChildren<K, V>> {
    /// Create a new detached key set node using the natural orderings
    pub fn new(key: K, value: V) -> Self {
        Node::with_store(Some(key), value, KeySetChildren::default())
    }
}

impl<K: 'static, V: 'static> Node<KeySetChildren<K, V>> {
    /// Create a new detached key set node with explicit comparators
    pub fn with_comparators(
        key_compare: Comparator<K>,
        value_compare: Comparator<V>,
        key: Option<K>,
        value: V,
    ) -> Self {
        Node::with_store(key, value, KeySetChildren::new(key_compare, value_compare))
    }

    /// The comparators ordering this node's children, keys first
    pub fn comparators(&self) -> (Comparator<K>, Comparator<V>) {
        let store = self.store();
        (store.key_comparator(), store.value_comparator())
    }
}
