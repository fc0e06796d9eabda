//! Abstract Tree interface.

use crate::Container;

/// Interface that all trees implement.
pub trait Tree<T>: Container<T> {
    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    fn height(&self) -> usize;
}
