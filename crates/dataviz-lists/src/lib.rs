//! List implementations for dataviz.
//!
//! - [`ArrayList`]: contiguous storage, O(1) indexing.
//! - [`SinglyLinkedList`]: forward-linked boxed nodes.
//! - [`DoublyLinkedList`]: O(1) access at both ends.
//!
//! All three implement [`List`](dataviz_containers::List), serialize to JSON
//! arrays and export a left-to-right dot chain.

use dataviz_containers::ListError;
use std::fmt;

pub mod arraylist;
pub mod doublylinkedlist;
pub mod singlylinkedlist;

pub use arraylist::ArrayList;
pub use doublylinkedlist::DoublyLinkedList;
pub use singlylinkedlist::SinglyLinkedList;

/// Fill color of list nodes in the dot export.
pub const LIST_NODE_COLOR: &str = "mediumseagreen";

pub(crate) fn check_index(index: usize, len: usize) -> Result<(), ListError> {
    if index < len {
        Ok(())
    } else {
        Err(ListError::IndexOutOfBounds { index, len })
    }
}

/// `header` on its own line, then the values separated by `", "`.
pub(crate) fn write_values<'a, T, I>(f: &mut fmt::Formatter<'_>, header: &str, values: I) -> fmt::Result
where
    T: fmt::Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    writeln!(f, "{header}")?;
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_index_bounds() {
        assert!(check_index(0, 1).is_ok());
        assert_eq!(
            check_index(1, 1),
            Err(ListError::IndexOutOfBounds { index: 1, len: 1 })
        );
    }
}
