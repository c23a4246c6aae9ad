//! List-backed child stores: plain ordered lists and key-indexed lists

use std::collections::HashMap;
use std::hash::Hash;

use log::trace;
use smallvec::SmallVec;

use crate::tree::{ChildStore, KeyedStore, Node, OrderedStore};

/// Children kept in caller order, duplicates allowed
pub struct ListChildren<V: 'static> {
    items: Vec<Node<ListChildren<V>>>,
}

impl<V: 'static> Default for ListChildren<V> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<V: 'static> ChildStore for ListChildren<V> {
    type Key = ();
    type Value = V;

    const ORDERED: bool = true;
    const VARIANT: &'static str = "list";

    fn fresh(&self) -> Self {
        Self::default()
    }

    fn nodes(&self) -> &[Node<Self>] {
        &self.items
    }

    fn insert(&mut self, node: Node<Self>) -> Option<usize> {
        self.items.push(node);
        Some(self.items.len() - 1)
    }

    fn remove_at(&mut self, index: usize) -> Option<Node<Self>> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    fn swap_at(&mut self, index: usize, node: Node<Self>) -> Option<(Node<Self>, usize)> {
        let slot = self.items.get_mut(index)?;
        Some((std::mem::replace(slot, node), index))
    }
}

impl<V: 'static> OrderedStore for ListChildren<V> {
    fn insert_at(&mut self, index: usize, node: Node<Self>) {
        self.items.insert(index, node);
    }
}

/// A tree node whose children form an ordered list
pub type ListTreeNode<V> = Node<ListChildren<V>>;

impl<V: 'static> Node<ListChildren<V>> {
    /// Create a new detached list node
    pub fn new(value: V) -> Self {
        Node::with_store(None, value, ListChildren::default())
    }
}

type KeyBucket<K, V> = SmallVec<[Node<KeyListChildren<K, V>>; 2]>;

/// Children kept in caller order with an index by key
///
/// The same key (and even the same key/value pair) may appear any number of
/// times. Appending and removing keep the index up to date incrementally;
/// positional insertion and swapping rebuild it, which costs O(n).
pub struct KeyListChildren<K: Eq + Hash + Clone + 'static, V: 'static> {
    items: Vec<Node<KeyListChildren<K, V>>>,
    index: HashMap<K, KeyBucket<K, V>>,
}

impl<K: Eq + Hash + Clone + 'static, V: 'static> Default for KeyListChildren<K, V> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone + 'static, V: 'static> KeyListChildren<K, V> {
    fn key_of(node: &Node<Self>) -> Option<K> {
        node.key().map(|key| (*key).clone())
    }

    fn rebuild_index(&mut self) {
        trace!("rebuilding key index over {} children", self.items.len());
        self.index.clear();
        for node in &self.items {
            if let Some(key) = Self::key_of(node) {
                self.index.entry(key).or_default().push(node.clone());
            }
        }
    }
}

impl<K: Eq + Hash + Clone + 'static, V: 'static> ChildStore for KeyListChildren<K, V> {
    type Key = K;
    type Value = V;

    const ORDERED: bool = true;
    const VARIANT: &'static str = "key list";

    fn fresh(&self) -> Self {
        Self::default()
    }

    fn nodes(&self) -> &[Node<Self>] {
        &self.items
    }

    fn insert(&mut self, node: Node<Self>) -> Option<usize> {
        if let Some(key) = Self::key_of(&node) {
            self.index.entry(key).or_default().push(node.clone());
        }
        self.items.push(node);
        Some(self.items.len() - 1)
    }

    fn remove_at(&mut self, index: usize) -> Option<Node<Self>> {
        if index >= self.items.len() {
            return None;
        }

        let node = self.items.remove(index);
        if let Some(key) = Self::key_of(&node) {
            if let Some(bucket) = self.index.get_mut(&key) {
                bucket.retain(|entry| *entry != node);
                if bucket.is_empty() {
                    self.index.remove(&key);
                }
            }
        }
        Some(node)
    }

    fn swap_at(&mut self, index: usize, node: Node<Self>) -> Option<(Node<Self>, usize)> {
        let slot = self.items.get_mut(index)?;
        let old = std::mem::replace(slot, node);
        self.rebuild_index();
        Some((old, index))
    }
}

impl<K: Eq + Hash + Clone + 'static, V: 'static> OrderedStore for KeyListChildren<K, V> {
    fn insert_at(&mut self, index: usize, node: Node<Self>) {
        self.items.insert(index, node);
        self.rebuild_index();
    }
}

impl<K: Eq + Hash + Clone + 'static, V: 'static> KeyedStore for KeyListChildren<K, V> {
    fn keyed(&self, key: &K) -> Vec<Node<Self>> {
        self.index
            .get(key)
            .map(|bucket| bucket.to_vec())
            .unwrap_or_default()
    }
}

/// A tree node whose children form an ordered list indexed by key
pub type KeyListTreeNode<K, V> = Node<KeyListChildren<K, V>>;

impl<K: Eq + Hash + Clone + 'static, V: 'static> Node<KeyListChildren<K, V>> {
    /// Create a new detached key list node
    pub fn new(key: K, value: V) -> Self {
        Node::with_store(Some(key), value, KeyListChildren::default())
    }

    /// Create a new detached key list node without a key
    pub fn unkeyed(value: V) -> Self {
        Node::with_store(None, value, KeyListChildren::default())
    }
}
