//! Abstract Stack interface (LIFO).

use crate::Container;

/// Interface that all stacks implement. `values()` is ordered from the top of
/// the stack down.
pub trait Stack<T>: Container<T> {
    fn push(&mut self, value: T);
    fn pop(&mut self) -> Option<T>;
    fn peek(&self) -> Option<&T>;
}
