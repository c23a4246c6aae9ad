//! Whole-tree algorithms built on the node contract
//!
//! Both algorithms recurse once per tree level, so their stack use grows with
//! the depth of the input, not with its size.

mod copy;
mod intersect;

pub use copy::{copy, copy_with};
pub use intersect::{intersect, intersect_with, IntersectProcessor};
