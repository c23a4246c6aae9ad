//! Error type shared by every fallible tree operation

use derive_more::Display;

use crate::tree::TraversalMode;

/// Why a node could not be attached (or replaced) where it was asked to go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OwnershipReason {
    /// The node already has a parent in some tree
    #[display(fmt = "node already has a parent")]
    AlreadyAttached,
    /// `replace_self` was called on a root node
    #[display(fmt = "a root node cannot be replaced")]
    ReplaceRoot,
    /// A node was offered to itself as a child
    #[display(fmt = "node cannot be its own child")]
    SelfInsertion,
    /// The node is the root of the receiver's tree
    #[display(fmt = "node is an ancestor of the receiver")]
    AncestorInsertion,
}

/// Errors reported synchronously by node operations
///
/// None of these are retried internally. `Listener` is special: the
/// mutation that fired the event has already been applied, and every
/// listener that ran before the failing one has already observed it.
#[derive(Debug, Display)]
pub enum TreeError {
    /// Inserting or replacing would give a node two owners
    #[display(fmt = "ownership conflict: {}", reason)]
    OwnershipConflict { reason: OwnershipReason },

    /// Positional insert or access outside of the valid bounds
    #[display(fmt = "index {} is out of range for {} children", index, len)]
    IndexOutOfRange { index: usize, len: usize },

    /// The child storage of this variant cannot be traversed this way
    #[display(fmt = "{} nodes do not support {} traversal", variant, mode)]
    UnsupportedTraversalMode {
        variant: &'static str,
        mode: TraversalMode,
    },

    /// A set-backed parent already holds an entry equal to the replacement
    #[display(fmt = "an equal entry already exists among the siblings")]
    DuplicateEntry,

    /// A listener callback failed during dispatch
    #[display(fmt = "tree listener failed: {}", _0)]
    Listener(anyhow::Error),
}

impl TreeError {
    pub(crate) fn ownership(reason: OwnershipReason) -> Self {
        TreeError::OwnershipConflict { reason }
    }

    /// Returns true if this is an ownership conflict
    pub fn is_ownership_conflict(&self) -> bool {
        matches!(self, TreeError::OwnershipConflict { .. })
    }

    /// Returns true if this is an out-of-range index
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, TreeError::IndexOutOfRange { .. })
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeError::Listener(err) => Some(&**err),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TreeError>;
