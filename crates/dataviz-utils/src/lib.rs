//! Comparator contract and sorting helpers for dataviz.
//!
//! Every ordered container in the workspace is parameterized by a
//! [`Comparator`]. Containers never inspect key structure themselves; they only
//! ask the comparator how two keys rank.

use std::cmp::Ordering;

/// A total order over `T`.
///
/// Implemented for every `Fn(&T, &T) -> Ordering`, so plain functions and
/// closures can be handed to a container directly.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The key type's own [`Ord`] implementation.
///
/// This is the default comparator of every container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts the wrapped comparator.
///
/// A min-heap built with `Reverse(NaturalOrder)` behaves as a max-heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reverse<C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Compares integers numerically.
pub fn int_comparator(a: &i64, b: &i64) -> Ordering {
    a.cmp(b)
}

/// Compares strings byte-wise (lexicographic over UTF-8).
pub fn string_comparator<S: AsRef<str> + ?Sized>(a: &S, b: &S) -> Ordering {
    a.as_ref().as_bytes().cmp(b.as_ref().as_bytes())
}

/// Sorts `values` in place with `comparator`. The sort is stable.
pub fn sort<T, C: Comparator<T> + ?Sized>(values: &mut [T], comparator: &C) {
    values.sort_by(|a, b| comparator.compare(a, b));
}
