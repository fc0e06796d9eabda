//! Ordered maps for dataviz.
//!
//! [`TreeMap`] keeps its entries in a [`RedBlackTree`], so keys iterate in
//! comparator order and `min`/`max`/`floor`/`ceiling` are logarithmic.

use dataviz_containers::{Container, JsonDeserializer, JsonSerializer, Map, Visualizer};
use dataviz_graph::DotGraph;
use dataviz_trees::{Color, Iter, RedBlackTree};
use dataviz_utils::{Comparator, NaturalOrder};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A map whose entries are ordered by key.
#[derive(Clone)]
pub struct TreeMap<K, V, C = NaturalOrder> {
    tree: RedBlackTree<K, V, C>,
}

impl<K: Ord, V> TreeMap<K, V> {
    pub fn new() -> Self {
        Self {
            tree: RedBlackTree::new(),
        }
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RedBlackTree::with_comparator(comparator),
        }
    }

    /// Inserts or overwrites, returning the previous value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.tree.put(key, value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree.remove(key)
    }

    /// Entry with the greatest key less than or equal to `key`.
    pub fn floor(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.floor(key).map(|node| node.entry())
    }

    /// Entry with the least key greater than or equal to `key`.
    pub fn ceiling(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.ceiling(key).map(|node| node.entry())
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn min(&self) -> Option<(&K, &V)> {
        self.tree.min().map(|node| node.entry())
    }

    pub fn max(&self) -> Option<(&K, &V)> {
        self.tree.max().map(|node| node.entry())
    }

    pub fn iter(&self) -> Iter<'_, K, V, Color> {
        self.tree.iter()
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.tree.keys()
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.tree.values()
    }

    /// The red-black tree holding the entries.
    pub fn tree(&self) -> &RedBlackTree<K, V, C> {
        &self.tree
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TreeMap\nmap[")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{key}:{value}")?;
        }
        write!(f, "]")
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Container<V> for TreeMap<K, V, C> {
    fn is_empty(&self) -> bool {
        TreeMap::is_empty(self)
    }

    fn len(&self) -> usize {
        TreeMap::len(self)
    }

    fn clear(&mut self) {
        TreeMap::clear(self)
    }

    fn values(&self) -> Vec<&V> {
        TreeMap::values(self).collect()
    }
}

impl<K, V, C: Comparator<K>> Map<K, V> for TreeMap<K, V, C> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        TreeMap::put(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        TreeMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        TreeMap::remove(self, key)
    }

    fn keys(&self) -> Vec<&K> {
        TreeMap::keys(self).collect()
    }
}

impl<K: Serialize, V: Serialize, C> Serialize for TreeMap<K, V, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tree.serialize(serializer)
    }
}

impl<K: Serialize, V: Serialize, C> JsonSerializer for TreeMap<K, V, C> {
    fn to_json(&self) -> anyhow::Result<String> {
        self.tree.to_json()
    }
}

impl<K, V, C> JsonDeserializer for TreeMap<K, V, C>
where
    K: for<'de> Deserialize<'de>,
    V: for<'de> Deserialize<'de>,
    C: Comparator<K>,
{
    fn from_json(&mut self, data: &str) -> anyhow::Result<()> {
        self.tree.from_json(data)
    }
}

impl<K: fmt::Display, V: fmt::Display, C> Visualizer for TreeMap<K, V, C> {
    fn dot_graph(&self) -> DotGraph {
        self.tree.dot_graph()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeMap<i32, &'static str> {
        let mut map = TreeMap::new();
        map.put(5, "e");
        map.put(6, "f");
        map.put(7, "g");
        map.put(3, "c");
        map.put(4, "d");
        map.put(1, "x");
        map.put(2, "b");
        map.put(1, "a");
        map
    }

    #[test]
    fn put_orders_keys() {
        let map = sample();
        assert_eq!(map.len(), 7);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(
            map.values().copied().collect::<Vec<_>>(),
            vec!["a", "b", "c", "d", "e", "f", "g"]
        );
        assert_eq!(map.get(&1), Some(&"a"));
        assert_eq!(map.get(&8), None);
    }

    #[test]
    fn remove_entries() {
        let mut map = sample();
        for k in 5..=8 {
            map.remove(&k);
        }
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(map.remove(&1), Some("a"));
        assert_eq!(map.len(), 3);
        for k in 2..=4 {
            map.remove(&k);
        }
        assert!(map.is_empty());
        assert!(map.min().is_none());
    }

    #[test]
    fn min_max_floor_ceiling() {
        let map = sample();
        assert_eq!(map.min(), Some((&1, &"a")));
        assert_eq!(map.max(), Some((&7, &"g")));

        let sparse: TreeMap<i32, i32> = [(10, 1), (20, 2), (30, 3)].into_iter().collect();
        assert_eq!(sparse.floor(&25), Some((&20, &2)));
        assert_eq!(sparse.ceiling(&25), Some((&30, &3)));
        assert_eq!(sparse.floor(&5), None);
        assert_eq!(sparse.ceiling(&30), Some((&30, &3)));
    }

    #[test]
    fn display_lists_entries() {
        let map: TreeMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(map.to_string(), "TreeMap\nmap[a:1 b:2]");
        assert_eq!(TreeMap::<i32, i32>::new().to_string(), "TreeMap\nmap[]");
    }

    #[test]
    fn map_interface() {
        let mut map: TreeMap<String, i32> = TreeMap::new();
        let dyn_map: &mut dyn Map<String, i32> = &mut map;
        dyn_map.put("b".to_string(), 2);
        dyn_map.put("a".to_string(), 1);
        assert_eq!(dyn_map.keys(), vec!["a", "b"]);
        assert_eq!(dyn_map.values(), vec![&1, &2]);
        assert_eq!(dyn_map.remove(&"a".to_string()), Some(1));
        assert_eq!(dyn_map.len(), 1);
    }

    #[test]
    fn json_delegates_to_tree() {
        let map: TreeMap<String, i32> = [("x".to_string(), 1)].into_iter().collect();
        assert_eq!(map.to_json().unwrap(), r#"{"x":1}"#);

        let mut other: TreeMap<String, i32> = TreeMap::new();
        other.from_json(r#"{"b": 2, "a": 1}"#).unwrap();
        assert_eq!(other.keys().cloned().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(other.from_json("not json").is_err());
        assert_eq!(other.len(), 2);
    }

    #[test]
    fn custom_comparator() {
        let mut map = TreeMap::with_comparator(dataviz_utils::Reverse(NaturalOrder));
        map.put(1, ());
        map.put(3, ());
        map.put(2, ());
        assert_eq!(map.keys().copied().collect::<Vec<i32>>(), vec![3, 2, 1]);
        assert_eq!(map.min(), Some((&3, &())));
    }

    #[test]
    fn dot_export_uses_tree_colors() {
        let map: TreeMap<i32, i32> = (1..=3).map(|k| (k, k)).collect();
        let graph = map.dot_graph();
        assert_eq!(graph.node_count(), 3);
        assert!(graph.to_dot().contains("fillcolor=black"));
    }
}
