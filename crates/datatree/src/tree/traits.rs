//! Core tree traits for hierarchical data structures

use derive_more::Display;

/// The read-only contract every tree node offers
///
/// Implementations provide the basic links (parent, children, identity,
/// value access); everything else is derived from them. This is the only
/// thing external collaborators such as printers or serializers need, and it
/// is what the traversal and comparison algorithms are written against.
///
/// # Example
///
/// ```ignore
/// fn print_tree<N: TreeNode>(node: &N)
/// where
///     N::Value: std::fmt::Display,
/// {
///     for n in node.iter() {
///         n.with_value(|v| println!("{:indent$}{}", "", v, indent = n.depth() * 2));
///     }
/// }
/// ```
pub trait TreeNode: Clone {
    /// Key attached to the node (`()` for unkeyed variants)
    type Key;

    /// Value held by the node
    type Value;

    /// Whether children keep the order the caller gave them
    const ORDERED: bool;

    /// Human readable variant name
    const VARIANT: &'static str;

    /// Get the parent of a node
    ///
    /// Returns `None` for a root node.
    fn parent(&self) -> Option<Self>;

    /// Snapshot of the children, in iteration order
    ///
    /// The returned vector is a copy: changing it does not change the tree.
    fn children(&self) -> Vec<Self>;

    /// Returns true if both handles refer to the same node
    fn same_node(&self, other: &Self) -> bool;

    /// Run `f` against the node's value
    fn with_value<R, F: FnOnce(&Self::Value) -> R>(&self, f: F) -> R;

    /// Count children of a node
    fn child_count(&self) -> usize {
        self.children().len()
    }

    /// The child at `index`
    fn child_at(&self, index: usize) -> Option<Self> {
        self.children().into_iter().nth(index)
    }

    /// Index of `child` among this node's children
    fn child_index(&self, child: &Self) -> Option<usize> {
        self.children().iter().position(|c| c.same_node(child))
    }

    /// Check if this node has no parent
    fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Check if this node has no children
    fn is_leaf(&self) -> bool {
        self.child_count() == 0
    }

    /// The top-most ancestor (the node itself for a root)
    fn root(&self) -> Self {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Get the depth of a node (root = 0)
    fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(parent) = current {
            depth += 1;
            current = parent.parent();
        }
        depth
    }

    /// Get all ancestors of a node, from parent to root
    fn ancestors(&self) -> Vec<Self> {
        let mut ancestors = Vec::new();
        let mut current = self.parent();
        while let Some(parent) = current {
            current = parent.parent();
            ancestors.push(parent);
        }
        ancestors
    }

    /// Check if this node is an ancestor of another
    fn is_ancestor_of(&self, descendant: &Self) -> bool {
        let mut current = descendant.parent();
        while let Some(parent) = current {
            if parent.same_node(self) {
                return true;
            }
            current = parent.parent();
        }
        false
    }

    /// Index of this node among its siblings (0 for a root)
    fn index(&self) -> usize {
        self.parent()
            .and_then(|parent| parent.child_index(self))
            .unwrap_or(0)
    }

    fn first_child(&self) -> Option<Self> {
        self.child_at(0)
    }

    fn last_child(&self) -> Option<Self> {
        self.child_count()
            .checked_sub(1)
            .and_then(|last| self.child_at(last))
    }

    /// The following sibling, `None` for the last child or a root
    fn next_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let index = parent.child_index(self)?;
        parent.child_at(index + 1)
    }

    /// The preceding sibling, `None` for the first child or a root
    fn previous_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let index = parent.child_index(self)?;
        index.checked_sub(1).and_then(|prev| parent.child_at(prev))
    }

    /// The first child of this node's parent (the node itself for a root)
    fn first_sibling(&self) -> Self {
        self.parent()
            .and_then(|parent| parent.first_child())
            .unwrap_or_else(|| self.clone())
    }

    /// The last child of this node's parent (the node itself for a root)
    fn last_sibling(&self) -> Self {
        self.parent()
            .and_then(|parent| parent.last_child())
            .unwrap_or_else(|| self.clone())
    }

    fn is_first(&self) -> bool {
        self.index() == 0
    }

    fn is_last(&self) -> bool {
        match self.parent() {
            Some(parent) => self.index() + 1 == parent.child_count(),
            None => true,
        }
    }

    /// The greatest depth reached by any leaf below this node
    ///
    /// Depths are absolute (measured from the root of the whole tree).
    fn highest_level(&self) -> usize {
        let children = self.children();
        if children.is_empty() {
            return self.depth();
        }
        children
            .iter()
            .map(|child| child.highest_level())
            .max()
            .unwrap_or(0)
    }

    /// The last node of this subtree in pre-order
    fn last_leaf(&self) -> Self {
        let mut current = self.clone();
        while let Some(last) = current.last_child() {
            current = last;
        }
        current
    }

    /// Walk this node's subtree in pre-order
    fn iter(&self) -> TreeIter<Self> {
        TreeIter::new(self.clone())
    }
}

/// How a bidirectional traversal is confined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TraversalMode {
    /// Move in both directions through the whole tree
    #[display(fmt = "bidirectional")]
    Bidirectional,
    /// Move in both directions without leaving the start node's subtree
    #[display(fmt = "subtree-only")]
    SubtreeOnly,
}

/// Extension trait providing search utilities
///
/// This trait is automatically implemented for all types that implement
/// `TreeNode`.
pub trait TreeTraversal: TreeNode {
    /// Get all leaf nodes of this subtree, in pre-order
    fn leaves(&self) -> Vec<Self> {
        self.iter().filter(|node| node.is_leaf()).collect()
    }

    /// Find nodes matching a predicate
    fn find<F>(&self, mut predicate: F) -> Vec<Self>
    where
        F: FnMut(&Self) -> bool,
    {
        self.iter().filter(|node| predicate(node)).collect()
    }

    /// Find the first node (in pre-order) holding `value`
    fn find_by_value(&self, value: &Self::Value) -> Option<Self>
    where
        Self::Value: PartialEq,
    {
        self.iter().find(|node| node.with_value(|v| v == value))
    }

    /// Values of this subtree in pre-order
    fn values(&self) -> Vec<Self::Value>
    where
        Self::Value: Clone,
    {
        self.iter().map(|node| node.with_value(Clone::clone)).collect()
    }
}

// Blanket implementation for all TreeNode types
impl<N: TreeNode> TreeTraversal for N {}

/// A pre-order move computed by [`Trail`] before it is taken
pub(crate) enum Step<N> {
    /// Into the first child
    Down(N),
    /// Up `up` levels, then to the next sibling at that level
    Across { up: usize, node: N },
    /// Back to the previous sibling, then down to its last leaf
    Back(N),
    /// Back to the parent
    Up(N),
}

impl<N: TreeNode> Step<N> {
    /// The node the walk lands on
    pub(crate) fn target(&self) -> N {
        match self {
            Step::Down(node) | Step::Across { node, .. } | Step::Up(node) => node.clone(),
            Step::Back(sibling) => sibling.last_leaf(),
        }
    }
}

/// A position in a pre-order walk
///
/// Besides the current node it keeps the child index taken at every level
/// between the top of the walk and the node. Sibling moves read the index
/// off the path instead of searching the parent's children, so a full walk
/// costs O(1) per step, amortized. The top of the walk is never left.
#[derive(Clone)]
pub(crate) struct Trail<N> {
    node: N,
    path: Vec<usize>,
}

impl<N: TreeNode> Trail<N> {
    /// A walk whose top is `node` itself
    pub(crate) fn within(node: N) -> Self {
        Self {
            node,
            path: Vec::new(),
        }
    }

    /// A walk whose top is the root of `node`'s tree
    ///
    /// Finding the path searches each ancestor's children once.
    pub(crate) fn from_root(node: N) -> Self {
        let mut path = Vec::new();
        let mut current = node.clone();
        while let Some(parent) = current.parent() {
            path.push(parent.child_index(&current).unwrap_or(0));
            current = parent;
        }
        path.reverse();
        Self { node, path }
    }

    pub(crate) fn node(&self) -> &N {
        &self.node
    }

    /// The move to the pre-order successor, `None` at the end of the walk
    pub(crate) fn forward(&self) -> Option<Step<N>> {
        if let Some(child) = self.node.first_child() {
            return Some(Step::Down(child));
        }

        let mut current = self.node.clone();
        for (up, &index) in self.path.iter().rev().enumerate() {
            let parent = current.parent()?;
            if let Some(node) = parent.child_at(index + 1) {
                return Some(Step::Across { up, node });
            }
            current = parent;
        }
        None
    }

    /// The move to the pre-order predecessor, `None` at the top of the walk
    pub(crate) fn backward(&self) -> Option<Step<N>> {
        let &index = self.path.last()?;
        let parent = self.node.parent()?;
        match index.checked_sub(1) {
            Some(previous) => parent.child_at(previous).map(Step::Back),
            None => Some(Step::Up(parent)),
        }
    }

    /// Take a move returned by [`forward`](Self::forward) or
    /// [`backward`](Self::backward) and return the node landed on
    pub(crate) fn take(&mut self, step: Step<N>) -> N {
        match step {
            Step::Down(child) => {
                self.path.push(0);
                self.node = child;
            }
            Step::Across { up, node } => {
                self.path.truncate(self.path.len() - up);
                if let Some(index) = self.path.last_mut() {
                    *index += 1;
                }
                self.node = node;
            }
            Step::Back(sibling) => {
                if let Some(index) = self.path.last_mut() {
                    *index -= 1;
                }
                self.node = sibling;
                while let Some(last) = self.node.last_child() {
                    self.path.push(self.node.child_count() - 1);
                    self.node = last;
                }
            }
            Step::Up(parent) => {
                self.path.pop();
                self.node = parent;
            }
        }
        self.node.clone()
    }
}

/// Forward pre-order iterator over a subtree
///
/// Nothing is materialised up front: each step either descends into the
/// first child or backtracks to the next unvisited sibling. The iterator
/// keeps the current node and the child index taken at each level below the
/// start, so backtracking never searches a parent's children. The sequence
/// is finite and cannot be restarted; create a new iterator to walk again.
pub struct TreeIter<N: TreeNode> {
    trail: Option<Trail<N>>,
    started: bool,
}

impl<N: TreeNode> TreeIter<N> {
    /// Create a new iterator starting at (and confined to) `start`
    pub fn new(start: N) -> Self {
        Self {
            trail: Some(Trail::within(start)),
            started: false,
        }
    }
}

impl<N: TreeNode> Iterator for TreeIter<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        let trail = self.trail.as_mut()?;
        if !self.started {
            self.started = true;
            return Some(trail.node().clone());
        }
        match trail.forward() {
            Some(step) => Some(trail.take(step)),
            None => {
                self.trail = None;
                None
            }
        }
    }
}
