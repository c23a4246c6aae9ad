//! Bidirectional pre-order cursor for ordered trees

use crate::error::{Result, TreeError};
use crate::tree::traits::Trail;
use crate::tree::{TraversalMode, TreeNode};

/// Where the cursor sits relative to the trail's node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Freshly created: both directions return the start node first
    At,
    /// `next` just returned the node
    After,
    /// `previous` just returned the node
    Before,
}

/// A cursor over the pre-order sequence of an ordered tree
///
/// The cursor sits between two nodes of the sequence. Each move returns the
/// node it crossed, so turning around returns the same node again:
///
/// ```text
/// next() -> x, previous() -> x, previous() -> predecessor of x
/// ```
///
/// A new cursor sits on its start node, so the first move in either
/// direction returns the start node itself.
///
/// In subtree-only mode the cursor never leaves the subtree of the start
/// node; otherwise it walks the whole tree the start node belongs to.
/// Only ordered (list-backed) variants can be walked this way.
///
/// Each move costs O(1) amortized over a full walk. Creating a whole-tree
/// cursor looks up the start node's position once per ancestor.
pub struct ListTreeIter<N: TreeNode> {
    trail: Trail<N>,
    cursor: Cursor,
    subtree_only: bool,
}

impl<N: TreeNode> ListTreeIter<N> {
    /// Create a cursor positioned on `start`
    ///
    /// # Errors
    ///
    /// `UnsupportedTraversalMode` if `N` keeps its children unordered.
    pub fn new(start: N, subtree_only: bool) -> Result<Self> {
        let mode = if subtree_only {
            TraversalMode::SubtreeOnly
        } else {
            TraversalMode::Bidirectional
        };
        if !N::ORDERED {
            return Err(TreeError::UnsupportedTraversalMode {
                variant: N::VARIANT,
                mode,
            });
        }

        let trail = if subtree_only {
            Trail::within(start)
        } else {
            Trail::from_root(start)
        };
        Ok(Self {
            trail,
            cursor: Cursor::At,
            subtree_only,
        })
    }

    /// Whether the cursor is confined to the start node's subtree
    pub fn is_subtree_only(&self) -> bool {
        self.subtree_only
    }

    /// The node `next` would return, without moving
    pub fn peek_next(&self) -> Option<N> {
        match self.cursor {
            Cursor::At | Cursor::Before => Some(self.trail.node().clone()),
            Cursor::After => self.trail.forward().map(|step| step.target()),
        }
    }

    /// The node `previous` would return, without moving
    pub fn peek_previous(&self) -> Option<N> {
        match self.cursor {
            Cursor::At | Cursor::After => Some(self.trail.node().clone()),
            Cursor::Before => self.trail.backward().map(|step| step.target()),
        }
    }

    pub fn has_next(&self) -> bool {
        self.peek_next().is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.peek_previous().is_some()
    }

    /// Move backwards and return the node crossed
    ///
    /// Returns `None` at the start of the sequence; the cursor stays put.
    pub fn previous(&mut self) -> Option<N> {
        let node = match self.cursor {
            Cursor::At | Cursor::After => self.trail.node().clone(),
            Cursor::Before => {
                let step = self.trail.backward()?;
                self.trail.take(step)
            }
        };
        self.cursor = Cursor::Before;
        Some(node)
    }
}

impl<N: TreeNode> Iterator for ListTreeIter<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        let node = match self.cursor {
            Cursor::At | Cursor::Before => self.trail.node().clone(),
            Cursor::After => {
                let step = self.trail.forward()?;
                self.trail.take(step)
            }
        };
        self.cursor = Cursor::After;
        Some(node)
    }
}
