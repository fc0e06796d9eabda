//! Abstract List interface.
//!
//! A list is an ordered sequence of values where the same value may occur
//! more than once; each occurrence is a distinct item.

use crate::Container;
use dataviz_utils::Comparator;
use std::fmt;

/// Interface that all lists implement.
pub trait List<T>: Container<T> {
    /// Element at `index`, if within bounds.
    fn get(&self, index: usize) -> Option<&T>;

    /// Removes and returns the element at `index`, if within bounds.
    fn remove(&mut self, index: usize) -> Option<T>;

    /// Appends values at the end of the list.
    fn add<I: IntoIterator<Item = T>>(&mut self, values: I);

    /// True when every one of `values` is present. An empty query is
    /// trivially contained.
    fn contains(&self, values: &[T]) -> bool
    where
        T: PartialEq;

    fn sort<C: Comparator<T> + ?Sized>(&mut self, comparator: &C);

    /// Swaps the elements at `i` and `j`.
    fn swap(&mut self, i: usize, j: usize) -> Result<(), ListError>;

    /// Inserts values starting at `index`, shifting later elements right.
    /// Inserting at `len()` appends.
    fn insert<I: IntoIterator<Item = T>>(&mut self, index: usize, values: I) -> Result<(), ListError>;
}

/// List errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    IndexOutOfBounds { index: usize, len: usize },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for list of length {len}")
            }
        }
    }
}

impl std::error::Error for ListError {}
