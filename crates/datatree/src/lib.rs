//! Datatree Library
//!
//! Generic in-memory trees with interchangeable child storage, change
//! notification and a few whole-tree algorithms.
//!
//! # Core Concepts
//!
//! - **Node**: a shared handle to a node; the child store `S` decides how
//!   children are kept (ordered list, key-indexed list, sorted set, sorted
//!   key/value set)
//! - **TreeNode**: read-only navigation, implemented by every node variant
//! - **TreeListener**: synchronous notification of structural and value
//!   changes, registered per node
//! - **algo**: deep copy and tree intersection
//!
//! # Example
//!
//! ```
//! use datatree::prelude::*;
//!
//! let root = ListTreeNode::new("Tree");
//! let child = root.add_value("Child 1")?.expect("lists accept every child");
//! child.add_value("Child 1.1")?;
//! root.add_value("Child 2")?;
//!
//! for node in root.iter() {
//!     println!("{:indent$}{}", "", node, indent = node.depth() * 2);
//! }
//! assert_eq!(root.values(), vec!["Tree", "Child 1", "Child 1.1", "Child 2"]);
//! # Ok::<(), datatree::TreeError>(())
//! ```

pub mod algo;
pub mod error;
pub mod options;
pub mod tree;

pub use error::{OwnershipReason, Result, TreeError};
pub use options::IntersectOptions;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::algo::{copy, intersect, intersect_with, IntersectProcessor};
    pub use crate::options::IntersectOptions;
    pub use crate::tree::prelude::*;
    pub use crate::{Result, TreeError};
}
