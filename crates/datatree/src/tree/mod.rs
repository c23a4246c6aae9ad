//! Core tree abstraction for hierarchical data structures
//!
//! A tree is made of [`Node`] handles. What kind of tree it is depends on the
//! child store the nodes use:
//!
//! | alias               | children                     | duplicates        |
//! |---------------------|------------------------------|-------------------|
//! | [`ListTreeNode`]    | caller order                 | allowed           |
//! | [`KeyListTreeNode`] | caller order, indexed by key | allowed           |
//! | [`SetTreeNode`]     | comparator order             | rejected          |
//! | [`KeySetTreeNode`]  | key order, then value order  | rejected if both equal |
//!
//! Read-only access for printers and other collaborators goes through the
//! [`TreeNode`] trait.

pub mod compare;
mod event;
mod list;
mod list_iter;
mod node;
mod set;
mod store;
mod traits;

pub use compare::Comparator;
pub use event::{SharedListener, TreeEvent, TreeEventKind, TreeListener};
pub use list::{KeyListChildren, KeyListTreeNode, ListChildren, ListTreeNode};
pub use list_iter::ListTreeIter;
pub use node::Node;
pub use set::{KeySetChildren, KeySetTreeNode, SetChildren, SetTreeNode};
pub use store::{ChildStore, KeyedStore, OrderedStore};
pub use traits::{TraversalMode, TreeIter, TreeNode, TreeTraversal};

/// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        KeyListTreeNode, KeySetTreeNode, ListTreeNode, Node, SetTreeNode, TreeEvent,
        TreeEventKind, TreeListener, TreeNode, TreeTraversal,
    };
}
