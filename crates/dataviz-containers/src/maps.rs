//! Abstract Map interface.
//!
//! An associative array of (key, value) pairs where each key appears at most
//! once. Supports adding, removing, overwriting and looking up pairs by key.

use crate::Container;

/// Interface that all maps implement. `values()` follows key order for
/// ordered maps.
pub trait Map<K, V>: Container<V> {
    /// Inserts or overwrites the pair, returning the previous value.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    fn get(&self, key: &K) -> Option<&V>;

    /// Removes the pair, returning its value.
    fn remove(&mut self, key: &K) -> Option<V>;

    fn keys(&self) -> Vec<&K>;
}
