//! Self-balancing search trees and a binary heap for dataviz.
//!
//! [`AvlTree`] and [`RedBlackTree`] share one node arena: nodes refer to their
//! children and parent by index, and balancing bookkeeping (a skew or a color)
//! rides along in each node. Both trees are ordered by a
//! [`Comparator`](dataviz_utils::Comparator) chosen at construction.
//!
//! ```
//! use dataviz_trees::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for k in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.put(k, k.to_string());
//! }
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
//! assert_eq!(tree.floor(&6).map(|n| *n.key()), Some(5));
//! ```

mod arena;
pub mod avltree;
pub mod binaryheap;
mod node;
pub mod redblacktree;

pub use arena::Direction;
pub use avltree::{AvlNode, AvlTree};
pub use binaryheap::BinaryHeap;
pub use node::{Iter, NodeRef};
pub use redblacktree::{Color, RedBlackNode, RedBlackTree};
