//! Configuration options for tree algorithms.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`intersect_with`](crate::algo::intersect_with).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IntersectOptions {
    /// Whether a slave child, once matched, is excluded from matching
    /// further master children on the same level.
    pub prevent_duplicates: bool,
}

impl Default for IntersectOptions {
    fn default() -> Self {
        Self {
            prevent_duplicates: true,
        }
    }
}

impl IntersectOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether matched slave children are consumed.
    pub fn prevent_duplicates(mut self, prevent: bool) -> Self {
        self.prevent_duplicates = prevent;
        self
    }
}
