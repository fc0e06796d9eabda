//! AVL tree: a binary search tree kept height-balanced by rotations.
//!
//! Every node caches its skew, `height(right) - height(left)`, which stays in
//! `-1..=1`. Insertion and removal recurse down to the edit and report on the
//! way back up whether the subtree they returned changed height; a level stops
//! rebalancing as soon as its own height is known to be unchanged.

use crate::arena::{Arena, Direction, NodeId};
use crate::node::{Iter, NodeRef};
use dataviz_containers::serialization::entries_from_json;
use dataviz_containers::{Container, JsonDeserializer, JsonSerializer, Tree, Visualizer};
use dataviz_graph::{DotGraph, NodeStyle};
use dataviz_utils::{Comparator, NaturalOrder};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::mem;

/// Handle to a node of an [`AvlTree`].
pub type AvlNode<'a, K, V> = NodeRef<'a, K, V, i8>;

impl<K, V> AvlNode<'_, K, V> {
    /// Cached `height(right) - height(left)`.
    pub fn balance(&self) -> i8 {
        *self.meta()
    }
}

/// Fill color of AVL nodes in the dot export.
pub const AVL_NODE_COLOR: &str = "orange1";

fn skew(dir: Direction) -> i8 {
    match dir {
        Direction::Left => -1,
        Direction::Right => 1,
    }
}

/// An ordered map stored as an AVL tree.
#[derive(Clone)]
pub struct AvlTree<K, V, C = NaturalOrder> {
    arena: Arena<K, V, i8>,
    comparator: C,
}

impl<K: Ord, V> AvlTree<K, V> {
    /// An empty tree ordered by the key's natural order.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K: Ord, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> AvlTree<K, V, C> {
    /// An empty tree ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Arena::new(),
            comparator,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Inserts or overwrites. Returns the previous value when `key` was
    /// already present; in that case the stored key is replaced as well.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let mut replaced = None;
        let (root, _) = self.insert_at(self.arena.root, None, key, value, &mut replaced);
        self.arena.root = Some(root);
        replaced
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
        let mut detached = None;
        let (root, _) = self.remove_at(self.arena.root, key, &mut detached);
        self.arena.root = root;
        let id = detached?;
        Some(self.arena.release(id).value)
    }

    /// Largest entry whose key is less than or equal to `key`.
    pub fn floor(&self, key: &K) -> Option<AvlNode<'_, K, V>> {
        let id = self.arena.nearest(key, &self.comparator, Direction::Left)?;
        Some(NodeRef::new(&self.arena, id))
    }

    /// Smallest entry whose key is greater than or equal to `key`.
    pub fn ceiling(&self, key: &K) -> Option<AvlNode<'_, K, V>> {
        let id = self.arena.nearest(key, &self.comparator, Direction::Right)?;
        Some(NodeRef::new(&self.arena, id))
    }

    fn insert_at(
        &mut self,
        slot: Option<NodeId>,
        parent: Option<NodeId>,
        key: K,
        value: V,
        replaced: &mut Option<V>,
    ) -> (NodeId, bool) {
        let Some(s) = slot else {
            return (self.arena.alloc(key, value, parent, 0), true);
        };
        let Some(dir) = Direction::of(self.comparator.compare(&key, &self.arena[s].key)) else {
            let node = &mut self.arena[s];
            node.key = key;
            *replaced = Some(mem::replace(&mut node.value, value));
            return (s, false);
        };
        let child = self.arena.child(s, dir);
        let (child, grew) = self.insert_at(child, Some(s), key, value, replaced);
        self.arena[s].children[dir.index()] = Some(child);
        if grew {
            self.grow_fix(s, dir)
        } else {
            (s, false)
        }
    }

    /// Rebalances `s` after its `dir` subtree grew by one level. Returns the
    /// subtree root and whether the subtree as a whole grew.
    fn grow_fix(&mut self, s: NodeId, dir: Direction) -> (NodeId, bool) {
        let c = skew(dir);
        let b = self.arena[s].meta;
        if b == 0 {
            self.arena[s].meta = c;
            return (s, true);
        }
        if b == -c {
            self.arena[s].meta = 0;
            return (s, false);
        }
        let top = if self.child_skew(s, dir) == c {
            self.single_rotation(s, dir)
        } else {
            self.double_rotation(s, dir)
        };
        (top, false)
    }

    fn remove_at(
        &mut self,
        slot: Option<NodeId>,
        key: &K,
        detached: &mut Option<NodeId>,
    ) -> (Option<NodeId>, bool) {
        let Some(s) = slot else {
            return (None, false);
        };
        match Direction::of(self.comparator.compare(key, &self.arena[s].key)) {
            Some(dir) => {
                let child = self.arena.child(s, dir);
                let (child, shrank) = self.remove_at(child, key, detached);
                self.arena[s].children[dir.index()] = child;
                if shrank {
                    let (top, shorter) = self.shrink_fix(s, dir.opposite());
                    (Some(top), shorter)
                } else {
                    (Some(s), false)
                }
            }
            None => match self.arena.child(s, Direction::Right) {
                None => {
                    *detached = Some(s);
                    let left = self.arena.child(s, Direction::Left);
                    if let Some(left) = left {
                        self.arena[left].parent = self.arena[s].parent;
                    }
                    (left, true)
                }
                Some(right) => {
                    let (right, min, shrank) = self.remove_min(right);
                    self.arena[s].children[Direction::Right.index()] = right;
                    // `s` keeps its place in the tree and takes over the
                    // successor's entry; the successor's node is dropped.
                    self.arena.swap_payload(s, min);
                    *detached = Some(min);
                    if shrank {
                        let (top, shorter) = self.shrink_fix(s, Direction::Left);
                        (Some(top), shorter)
                    } else {
                        (Some(s), false)
                    }
                }
            },
        }
    }

    /// Unlinks the leftmost node below `s`. Returns the new subtree root, the
    /// unlinked node and whether the subtree shrank.
    fn remove_min(&mut self, s: NodeId) -> (Option<NodeId>, NodeId, bool) {
        match self.arena.child(s, Direction::Left) {
            None => {
                let right = self.arena.child(s, Direction::Right);
                if let Some(right) = right {
                    self.arena[right].parent = self.arena[s].parent;
                }
                (right, s, true)
            }
            Some(left) => {
                let (left, min, shrank) = self.remove_min(left);
                self.arena[s].children[Direction::Left.index()] = left;
                if shrank {
                    let (top, shorter) = self.shrink_fix(s, Direction::Right);
                    (Some(top), min, shorter)
                } else {
                    (Some(s), min, false)
                }
            }
        }
    }

    /// Rebalances `s` after the subtree opposite `heavy` lost a level.
    /// Returns the subtree root and whether the subtree as a whole shrank.
    fn shrink_fix(&mut self, s: NodeId, heavy: Direction) -> (NodeId, bool) {
        let c = skew(heavy);
        let b = self.arena[s].meta;
        if b == 0 {
            self.arena[s].meta = c;
            return (s, false);
        }
        if b == -c {
            self.arena[s].meta = 0;
            return (s, true);
        }
        match self.child_skew(s, heavy) {
            0 => {
                // `s` keeps skew `c`; the promoted child leans the other way
                let top = self.arena.rotate(s, heavy);
                self.arena[top].meta = -c;
                (top, false)
            }
            h if h == c => (self.single_rotation(s, heavy), true),
            _ => (self.double_rotation(s, heavy), true),
        }
    }

    fn child_skew(&self, s: NodeId, dir: Direction) -> i8 {
        self.arena
            .child(s, dir)
            .map_or(0, |child| self.arena[child].meta)
    }

    fn single_rotation(&mut self, s: NodeId, dir: Direction) -> NodeId {
        self.arena[s].meta = 0;
        let top = self.arena.rotate(s, dir);
        self.arena[top].meta = 0;
        top
    }

    fn double_rotation(&mut self, s: NodeId, dir: Direction) -> NodeId {
        let c = skew(dir);
        let heavy = self
            .arena
            .child(s, dir)
            .expect("double rotation requires a heavy child");
        let inner = self.arena.rotate(heavy, dir.opposite());
        self.arena[s].children[dir.index()] = Some(inner);
        let top = self.arena.rotate(s, dir);

        let (s_skew, heavy_skew) = match self.arena[top].meta {
            b if b == c => (-c, 0),
            b if b == -c => (0, c),
            _ => (0, 0),
        };
        self.arena[s].meta = s_skew;
        self.arena[heavy].meta = heavy_skew;
        self.arena[top].meta = 0;
        top
    }
}

impl<K, V, C> AvlTree<K, V, C> {
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    pub fn height(&self) -> usize {
        self.arena.height()
    }

    pub fn root(&self) -> Option<AvlNode<'_, K, V>> {
        self.arena.root.map(|id| NodeRef::new(&self.arena, id))
    }

    /// Entry with the smallest key.
    pub fn min(&self) -> Option<AvlNode<'_, K, V>> {
        self.arena
            .end(Direction::Left)
            .map(|id| NodeRef::new(&self.arena, id))
    }

    /// Entry with the largest key.
    pub fn max(&self) -> Option<AvlNode<'_, K, V>> {
        self.arena
            .end(Direction::Right)
            .map(|id| NodeRef::new(&self.arena, id))
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, i8> {
        Iter::new(&self.arena)
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, v)| v)
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, i8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for AvlTree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: fmt::Display, V, C> fmt::Display for AvlTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.arena.write_ascii(f, "AVLTree")
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for AvlTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Container<V> for AvlTree<K, V, C> {
    fn is_empty(&self) -> bool {
        AvlTree::is_empty(self)
    }

    fn len(&self) -> usize {
        AvlTree::len(self)
    }

    fn clear(&mut self) {
        AvlTree::clear(self)
    }

    fn values(&self) -> Vec<&V> {
        AvlTree::values(self).collect()
    }
}

impl<K, V, C> Tree<V> for AvlTree<K, V, C> {
    fn height(&self) -> usize {
        AvlTree::height(self)
    }
}

impl<K: Serialize, V: Serialize, C> Serialize for AvlTree<K, V, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<K: Serialize, V: Serialize, C> JsonSerializer for AvlTree<K, V, C> {
    fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).map_err(|e| anyhow::anyhow!("JSON serialization failed: {}", e))
    }
}

impl<K, V, C> JsonDeserializer for AvlTree<K, V, C>
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

impl<K: fmt::Display, V: fmt::Display, C> Visualizer for AvlTree<K, V, C> {
    fn dot_graph(&self) -> DotGraph {
        self.arena.dot_graph(|_| NodeStyle::filled(AVL_NODE_COLOR))
    }
}
