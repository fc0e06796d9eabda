//! Red-black tree over the same node arena as the AVL tree.
//!
//! Invariants: the root is black, a red node has no red child, and every
//! root-to-leaf path crosses the same number of black nodes.

use crate::arena::{Arena, Direction, NodeId};
use crate::node::{Iter, NodeRef};
use dataviz_containers::serialization::entries_from_json;
use dataviz_containers::{Container, JsonDeserializer, JsonSerializer, Tree, Visualizer};
use dataviz_graph::{DotGraph, NodeStyle};
use dataviz_utils::{Comparator, NaturalOrder};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::mem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Graphviz fill color of nodes with this color.
    pub fn fill(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
        }
    }
}

/// Handle to a node of a [`RedBlackTree`].
pub type RedBlackNode<'a, K, V> = NodeRef<'a, K, V, Color>;

impl<K, V> RedBlackNode<'_, K, V> {
    pub fn color(&self) -> Color {
        *self.meta()
    }
}

/// An ordered map stored as a red-black tree.
#[derive(Clone)]
pub struct RedBlackTree<K, V, C = NaturalOrder> {
    arena: Arena<K, V, Color>,
    comparator: C,
}

impl<K: Ord, V> RedBlackTree<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K: Ord, V> Default for RedBlackTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> RedBlackTree<K, V, C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Arena::new(),
            comparator,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Inserts or overwrites, returning the previous value for `key`.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let mut parent = None;
        let mut side = Direction::Left;
        let mut cursor = self.arena.root;
        while let Some(id) = cursor {
            match Direction::of(self.comparator.compare(&key, &self.arena[id].key)) {
                None => {
                    let node = &mut self.arena[id];
                    node.key = key;
                    return Some(mem::replace(&mut node.value, value));
                }
                Some(dir) => {
                    parent = Some(id);
                    side = dir;
                    cursor = self.arena.child(id, dir);
                }
            }
        }

        let id = self.arena.alloc(key, value, parent, Color::Red);
        match parent {
            Some(p) => self.arena[p].children[side.index()] = Some(id),
            None => self.arena.root = Some(id),
        }
        self.insert_fix(id);
        None
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let id = self.arena.search(key, &self.comparator)?;
        Some(&self.arena[id].value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.arena.search(key, &self.comparator)?;
        Some(&mut self.arena[id].value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.arena.search(key, &self.comparator).is_some()
    }

    /// Removes `key` and returns its value, or `None` if it was absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut target = self.arena.search(key, &self.comparator)?;
        if let (Some(_), Some(right)) = (
            self.arena.child(target, Direction::Left),
            self.arena.child(target, Direction::Right),
        ) {
            let successor = self.arena.extreme(right, Direction::Left);
            self.arena.swap_payload(target, successor);
            target = successor;
        }

        let child = self
            .arena
            .child(target, Direction::Left)
            .or(self.arena.child(target, Direction::Right));
        let parent = self.arena[target].parent;
        self.arena.transplant(target, child);
        if self.arena[target].meta == Color::Black {
            self.remove_fix(child, parent);
        }
        Some(self.arena.release(target).value)
    }

    pub fn floor(&self, key: &K) -> Option<RedBlackNode<'_, K, V>> {
        let id = self.arena.nearest(key, &self.comparator, Direction::Left)?;
        Some(NodeRef::new(&self.arena, id))
    }

    pub fn ceiling(&self, key: &K) -> Option<RedBlackNode<'_, K, V>> {
        let id = self.arena.nearest(key, &self.comparator, Direction::Right)?;
        Some(NodeRef::new(&self.arena, id))
    }

    fn color(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self.arena[id].meta)
    }

    fn insert_fix(&mut self, mut node: NodeId) {
        while let Some(parent) = self.arena[node].parent {
            if self.arena[parent].meta == Color::Black {
                break;
            }
            // a red parent is never the root
            let Some(grandparent) = self.arena[parent].parent else {
                break;
            };
            let side = self.arena.side_of(parent).unwrap_or(Direction::Left);
            let uncle = self.arena.child(grandparent, side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self.arena[u].meta == Color::Red) {
                self.arena[parent].meta = Color::Black;
                self.arena[uncle].meta = Color::Black;
                self.arena[grandparent].meta = Color::Red;
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.arena.side_of(node) == Some(side.opposite()) {
                self.arena.rotate_in_place(parent, side.opposite());
                mem::swap(&mut node, &mut parent);
            }
            self.arena[parent].meta = Color::Black;
            self.arena[grandparent].meta = Color::Red;
            self.arena.rotate_in_place(grandparent, side);
        }
        if let Some(root) = self.arena.root {
            self.arena[root].meta = Color::Black;
        }
    }

    /// Restores the black height after a black node was unlinked; `node` took
    /// its place under `parent`.
    fn remove_fix(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
        while node != self.arena.root && self.color(node) == Color::Black {
            let Some(p) = parent else {
                break;
            };
            let side = if self.arena.child(p, Direction::Left) == node {
                Direction::Left
            } else {
                Direction::Right
            };
            let other = side.opposite();
            let Some(mut sibling) = self.arena.child(p, other) else {
                break;
            };

            if self.arena[sibling].meta == Color::Red {
                self.arena[sibling].meta = Color::Black;
                self.arena[p].meta = Color::Red;
                self.arena.rotate_in_place(p, other);
                match self.arena.child(p, other) {
                    Some(s) => sibling = s,
                    None => break,
                }
            }

            let near = self.arena.child(sibling, side);
            let far = self.arena.child(sibling, other);
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                self.arena[sibling].meta = Color::Red;
                node = Some(p);
                parent = self.arena[p].parent;
                continue;
            }

            if self.color(far) == Color::Black {
                if let Some(near) = near {
                    self.arena[near].meta = Color::Black;
                }
                self.arena[sibling].meta = Color::Red;
                self.arena.rotate_in_place(sibling, side);
                match self.arena.child(p, other) {
                    Some(s) => sibling = s,
                    None => break,
                }
            }

            self.arena[sibling].meta = self.arena[p].meta;
            self.arena[p].meta = Color::Black;
            if let Some(far) = self.arena.child(sibling, other) {
                self.arena[far].meta = Color::Black;
            }
            self.arena.rotate_in_place(p, other);
            node = self.arena.root;
            parent = None;
        }
        if let Some(node) = node {
            self.arena[node].meta = Color::Black;
        }
    }
}

impl<K, V, C> RedBlackTree<K, V, C> {
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
    }

    pub fn height(&self) -> usize {
        self.arena.height()
    }

    pub fn root(&self) -> Option<RedBlackNode<'_, K, V>> {
        self.arena.root.map(|id| NodeRef::new(&self.arena, id))
    }

    pub fn min(&self) -> Option<RedBlackNode<'_, K, V>> {
        self.arena
            .end(Direction::Left)
            .map(|id| NodeRef::new(&self.arena, id))
    }

    pub fn max(&self) -> Option<RedBlackNode<'_, K, V>> {
        self.arena
            .end(Direction::Right)
            .map(|id| NodeRef::new(&self.arena, id))
    }

    pub fn iter(&self) -> Iter<'_, K, V, Color> {
        Iter::new(&self.arena)
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, v)| v)
    }
}

impl<'a, K, V, C> IntoIterator for &'a RedBlackTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RedBlackTree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RedBlackTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: fmt::Display, V, C> fmt::Display for RedBlackTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.arena.write_ascii(f, "RedBlackTree")
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RedBlackTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Container<V> for RedBlackTree<K, V, C> {
    fn is_empty(&self) -> bool {
        RedBlackTree::is_empty(self)
    }

    fn len(&self) -> usize {
        RedBlackTree::len(self)
    }

    fn clear(&mut self) {
        RedBlackTree::clear(self)
    }

    fn values(&self) -> Vec<&V> {
        RedBlackTree::values(self).collect()
    }
}

impl<K, V, C> Tree<V> for RedBlackTree<K, V, C> {
    fn height(&self) -> usize {
        RedBlackTree::height(self)
    }
}

impl<K: Serialize, V: Serialize, C> Serialize for RedBlackTree<K, V, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<K: Serialize, V: Serialize, C> JsonSerializer for RedBlackTree<K, V, C> {
    fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).map_err(|e| anyhow::anyhow!("JSON serialization failed: {}", e))
    }
}

impl<K, V, C> JsonDeserializer for RedBlackTree<K, V, C>
where
    K: for<'de> Deserialize<'de>,
    V: for<'de> Deserialize<'de>,
    C: Comparator<K>,
{
    fn from_json(&mut self, data: &str) -> anyhow::Result<()> {
        let entries = entries_from_json::<K, V>(data)?;
        self.clear();
        self.extend(entries);
        Ok(())
    }
}

impl<K: fmt::Display, V: fmt::Display, C> Visualizer for RedBlackTree<K, V, C> {
    fn dot_graph(&self) -> DotGraph {
        self.arena.dot_graph(|color| NodeStyle::filled(color.fill()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Black height of the subtree under `node`, asserting the coloring rules.
    fn black_height<K, V>(node: Option<RedBlackNode<'_, K, V>>) -> usize {
        let Some(node) = node else {
            return 1;
        };
        if node.color() == Color::Red {
            for child in [node.left(), node.right()].into_iter().flatten() {
                assert_eq!(child.color(), Color::Black, "red node with red child");
            }
        }
        let left = black_height(node.left());
        let right = black_height(node.right());
        assert_eq!(left, right, "unequal black heights");
        left + usize::from(node.color() == Color::Black)
    }

    fn check(tree: &RedBlackTree<i32, i32>) {
        if let Some(root) = tree.root() {
            assert_eq!(root.color(), Color::Black);
        }
        black_height(tree.root());
        let keys: Vec<_> = tree.keys().collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn inserts_keep_coloring() {
        let mut tree = RedBlackTree::new();
        for k in [5, 3, 8, 1, 4, 7, 9, 2, 6, 10] {
            tree.put(k, k);
            check(&tree);
        }
        assert_eq!(tree.len(), 10);
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn ascending_inserts() {
        let tree: RedBlackTree<i32, i32> = (1..=100).map(|k| (k, k)).collect();
        check(&tree);
        assert!(tree.height() <= 2 * 7);
    }

    #[test]
    fn removes_keep_coloring() {
        let mut tree: RedBlackTree<i32, i32> = (1..=20).map(|k| (k, k * 2)).collect();
        for k in [10, 1, 20, 5, 15, 11, 2, 19, 7, 13] {
            assert_eq!(tree.remove(&k), Some(k * 2));
            check(&tree);
        }
        assert_eq!(tree.len(), 10);
        assert_eq!(tree.remove(&10), None);
        for k in [3, 4, 6, 8, 9, 12, 14, 16, 17, 18] {
            assert_eq!(tree.get(&k), Some(&(k * 2)));
        }
        for k in [3, 4, 6, 8, 9, 12, 14, 16, 17, 18] {
            tree.remove(&k);
            check(&tree);
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn overwrite() {
        let mut tree = RedBlackTree::new();
        tree.put("a", 1);
        assert_eq!(tree.put("a", 2), Some(1));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&"a"), Some(&2));
    }

    #[test]
    fn floor_ceiling_min_max() {
        let tree: RedBlackTree<i32, ()> = [10, 20, 30].into_iter().map(|k| (k, ())).collect();
        assert_eq!(tree.floor(&25).map(|n| *n.key()), Some(20));
        assert_eq!(tree.ceiling(&25).map(|n| *n.key()), Some(30));
        assert!(tree.floor(&5).is_none());
        assert_eq!(tree.min().map(|n| *n.key()), Some(10));
        assert_eq!(tree.max().map(|n| *n.key()), Some(30));
    }

    #[test]
    fn ascii_rendering() {
        let tree: RedBlackTree<i32, ()> = (1..=3).map(|k| (k, ())).collect();
        insta::assert_snapshot!(tree.to_string(), @r"
        RedBlackTree
        │   ┌── 3
        └── 2
            └── 1
        ");
    }

    #[test]
    fn dot_fills_by_color() {
        let tree: RedBlackTree<i32, i32> = (1..=3).map(|k| (k, k)).collect();
        let graph = tree.dot_graph();
        let colors: Vec<_> = graph.nodes().map(|n| n.style.color.as_str()).collect();
        assert_eq!(colors, vec!["red", "black", "red"]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn json_round_trip() {
        let tree: RedBlackTree<String, i32> =
            [("b".to_string(), 2), ("a".to_string(), 1)].into_iter().collect();
        let json = tree.to_json().unwrap();
        assert_eq!(json, r#"{"a":1,"b":2}"#);
        let mut copy: RedBlackTree<String, i32> = RedBlackTree::new();
        copy.from_json(&json).unwrap();
        assert_eq!(copy.get(&"a".to_string()), Some(&1));
        assert!(copy.from_json("[]").is_err());
        assert_eq!(copy.len(), 2);
    }
}
