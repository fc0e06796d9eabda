//! Node storage shared by the balanced binary search trees.
//!
//! Nodes live in a dense `Vec` and refer to each other by index. Only the
//! child slots express ownership; `parent` is a plain back-reference. Removal
//! compacts the vector with `swap_remove` and relinks the node that moved.

use dataviz_graph::{DotGraph, Edge, NodeId as GraphNodeId, NodeStyle};
use dataviz_utils::Comparator;
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
        }
    }

    /// The side a probe descends to, or `None` when it matched.
    pub(crate) fn of(ordering: Ordering) -> Option<Self> {
        match ordering {
            Ordering::Less => Some(Direction::Left),
            Ordering::Equal => None,
            Ordering::Greater => Some(Direction::Right),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K, V, M> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: [Option<NodeId>; 2],
    /// Balancing bookkeeping: the skew of an AVL node, the color of a
    /// red-black node.
    pub(crate) meta: M,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<K, V, M> {
    nodes: Vec<Node<K, V, M>>,
    pub(crate) root: Option<NodeId>,
}

impl<K, V, M> Index<NodeId> for Arena<K, V, M> {
    type Output = Node<K, V, M>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

impl<K, V, M> IndexMut<NodeId> for Arena<K, V, M> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.0]
    }
}

impl<K, V, M> Arena<K, V, M> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Number of stored nodes. Detached nodes count until released.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Stores a new unlinked node; the caller hooks it into its parent slot.
    pub(crate) fn alloc(&mut self, key: K, value: V, parent: Option<NodeId>, meta: M) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key,
            value,
            parent,
            children: [None, None],
            meta,
        });
        id
    }

    /// Drops a node that is no longer linked into the tree and returns it.
    ///
    /// The last node of the vector takes over the freed index, so every link
    /// pointing at it is rewritten.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<K, V, M> {
        let last = NodeId(self.nodes.len() - 1);
        let node = self.nodes.swap_remove(id.0);
        if id != last {
            match self[id].parent {
                Some(parent) => {
                    for slot in &mut self[parent].children {
                        if *slot == Some(last) {
                            *slot = Some(id);
                        }
                    }
                }
                None => {
                    if self.root == Some(last) {
                        self.root = Some(id);
                    }
                }
            }
            let children = self[id].children;
            for child in children.into_iter().flatten() {
                self[child].parent = Some(id);
            }
        }
        node
    }

    pub(crate) fn child(&self, id: NodeId, dir: Direction) -> Option<NodeId> {
        self[id].children[dir.index()]
    }

    /// Which child of its parent `id` is; `None` for the root.
    pub(crate) fn side_of(&self, id: NodeId) -> Option<Direction> {
        let parent = self[id].parent?;
        if self.child(parent, Direction::Left) == Some(id) {
            Some(Direction::Left)
        } else {
            Some(Direction::Right)
        }
    }

    /// Puts `new` where `old` hangs from its parent (or at the root).
    pub(crate) fn transplant(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self[old].parent;
        match (parent, self.side_of(old)) {
            (Some(p), Some(side)) => self[p].children[side.index()] = new,
            _ => self.root = new,
        }
        if let Some(n) = new {
            self[n].parent = parent;
        }
    }

    /// Promotes the child of `s` on side `dir` into the position of `s`.
    ///
    /// The promoted node inherits the parent pointer of `s`, but the parent's
    /// child slot is left to the caller, which receives the new subtree root.
    pub(crate) fn rotate(&mut self, s: NodeId, dir: Direction) -> NodeId {
        let r = self
            .child(s, dir)
            .expect("rotation requires a child on the promoted side");
        let inner = self.child(r, dir.opposite());
        self[s].children[dir.index()] = inner;
        if let Some(inner) = inner {
            self[inner].parent = Some(s);
        }
        self[r].children[dir.opposite().index()] = Some(s);
        self[r].parent = self[s].parent;
        self[s].parent = Some(r);
        r
    }

    /// [`Arena::rotate`] that also relinks the parent slot (or the root).
    pub(crate) fn rotate_in_place(&mut self, s: NodeId, dir: Direction) -> NodeId {
        let parent = self[s].parent;
        let side = self.side_of(s);
        let top = self.rotate(s, dir);
        match (parent, side) {
            (Some(p), Some(side)) => self[p].children[side.index()] = Some(top),
            _ => self.root = Some(top),
        }
        top
    }

    /// Exchanges the key/value payloads of two nodes, leaving links and
    /// balancing bookkeeping in place.
    pub(crate) fn swap_payload(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let (lo, hi) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.nodes.split_at_mut(hi);
        let (x, y) = (&mut head[lo], &mut tail[0]);
        mem::swap(&mut x.key, &mut y.key);
        mem::swap(&mut x.value, &mut y.value);
    }

    pub(crate) fn search<C: Comparator<K>>(&self, key: &K, comparator: &C) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            match Direction::of(comparator.compare(key, &self[id].key)) {
                None => return Some(id),
                Some(dir) => cursor = self.child(id, dir),
            }
        }
        None
    }

    /// The exact match for `key`, or else the closest node on `side` of it:
    /// `Left` yields the floor, `Right` the ceiling.
    pub(crate) fn nearest<C: Comparator<K>>(
        &self,
        key: &K,
        comparator: &C,
        side: Direction,
    ) -> Option<NodeId> {
        let mut best = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            match Direction::of(comparator.compare(key, &self[id].key)) {
                None => return Some(id),
                Some(dir) => {
                    if dir != side {
                        best = Some(id);
                    }
                    cursor = self.child(id, dir);
                }
            }
        }
        best
    }

    /// Follows `dir` children from `id` until there are none.
    pub(crate) fn extreme(&self, mut id: NodeId, dir: Direction) -> NodeId {
        while let Some(next) = self.child(id, dir) {
            id = next;
        }
        id
    }

    /// The smallest (`Left`) or largest (`Right`) node.
    pub(crate) fn end(&self, dir: Direction) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, dir))
    }

    /// In-order neighbour of `id`: the successor for `Right`, the predecessor
    /// for `Left`.
    pub(crate) fn walk(&self, id: NodeId, dir: Direction) -> Option<NodeId> {
        if let Some(child) = self.child(id, dir) {
            return Some(self.extreme(child, dir.opposite()));
        }
        let mut node = id;
        let mut parent = self[node].parent;
        while let Some(p) = parent {
            if self.child(p, dir) != Some(node) {
                break;
            }
            node = p;
            parent = self[p].parent;
        }
        parent
    }

    pub(crate) fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    pub(crate) fn subtree_height(&self, id: Option<NodeId>) -> usize {
        match id {
            None => 0,
            Some(id) => {
                let left = self.subtree_height(self.child(id, Direction::Left));
                let right = self.subtree_height(self.child(id, Direction::Right));
                1 + left.max(right)
            }
        }
    }

    /// Writes `header` followed by the tree turned on its side: right
    /// subtrees above their parent, left subtrees below.
    pub(crate) fn write_ascii(&self, f: &mut fmt::Formatter<'_>, header: &str) -> fmt::Result
    where
        K: fmt::Display,
    {
        writeln!(f, "{header}")?;
        match self.root {
            Some(root) => self.write_subtree(f, root, "", true),
            None => Ok(()),
        }
    }

    fn write_subtree(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        prefix: &str,
        is_tail: bool,
    ) -> fmt::Result
    where
        K: fmt::Display,
    {
        if let Some(right) = self.child(id, Direction::Right) {
            let extended = format!("{prefix}{}", if is_tail { "│   " } else { "    " });
            self.write_subtree(f, right, &extended, false)?;
        }
        let branch = if is_tail { "└── " } else { "┌── " };
        writeln!(f, "{prefix}{branch}{}", self[id].key)?;
        if let Some(left) = self.child(id, Direction::Left) {
            let extended = format!("{prefix}{}", if is_tail { "    " } else { "│   " });
            self.write_subtree(f, left, &extended, true)?;
        }
        Ok(())
    }

    /// Graph with one `key->value` node per entry, numbered by in-order
    /// position, and an edge from every node to each of its children.
    pub(crate) fn dot_graph(&self, style: impl Fn(&M) -> NodeStyle) -> DotGraph
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        let mut graph = DotGraph::new();
        let mut position = vec![0; self.nodes.len()];
        let mut cursor = self.end(Direction::Left);
        let mut index = 0;
        while let Some(id) = cursor {
            position[id.0] = index;
            let node = &self[id];
            graph.add_node(
                GraphNodeId(index),
                format!("{}->{}", node.key, node.value),
                style(&node.meta),
            );
            index += 1;
            cursor = self.walk(id, Direction::Right);
        }

        let mut pending: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = pending.pop() {
            for dir in [Direction::Left, Direction::Right] {
                if let Some(child) = self.child(id, dir) {
                    graph.add_edge(Edge::new(
                        GraphNodeId(position[id.0]),
                        GraphNodeId(position[child.0]),
                    ));
                }
            }
            pending.extend(self.child(id, Direction::Right));
            pending.extend(self.child(id, Direction::Left));
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataviz_utils::NaturalOrder;

    /// Hand-built tree:
    ///
    /// ```text
    ///       20
    ///      /  \
    ///    10    30
    /// ```
    fn small() -> (Arena<i32, &'static str, ()>, [NodeId; 3]) {
        let mut arena = Arena::new();
        let root = arena.alloc(20, "b", None, ());
        let left = arena.alloc(10, "a", Some(root), ());
        let right = arena.alloc(30, "c", Some(root), ());
        arena[root].children = [Some(left), Some(right)];
        arena.root = Some(root);
        (arena, [left, root, right])
    }

    #[test]
    fn direction_helpers() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::of(Ordering::Less), Some(Direction::Left));
        assert_eq!(Direction::of(Ordering::Equal), None);
        assert_eq!(Direction::Right.index(), 1);
    }

    #[test]
    fn search_and_nearest() {
        let (arena, [left, root, right]) = small();
        assert_eq!(arena.search(&30, &NaturalOrder), Some(right));
        assert_eq!(arena.search(&25, &NaturalOrder), None);
        assert_eq!(arena.nearest(&25, &NaturalOrder, Direction::Left), Some(root));
        assert_eq!(arena.nearest(&25, &NaturalOrder, Direction::Right), Some(right));
        assert_eq!(arena.nearest(&5, &NaturalOrder, Direction::Left), None);
        assert_eq!(arena.nearest(&5, &NaturalOrder, Direction::Right), Some(left));
        assert_eq!(arena.nearest(&35, &NaturalOrder, Direction::Right), None);
    }

    #[test]
    fn walk_visits_in_order() {
        let (arena, [left, root, right]) = small();
        assert_eq!(arena.end(Direction::Left), Some(left));
        assert_eq!(arena.walk(left, Direction::Right), Some(root));
        assert_eq!(arena.walk(root, Direction::Right), Some(right));
        assert_eq!(arena.walk(right, Direction::Right), None);
        assert_eq!(arena.walk(right, Direction::Left), Some(root));
        assert_eq!(arena.walk(left, Direction::Left), None);
    }

    #[test]
    fn rotate_in_place_promotes_child() {
        let (mut arena, [left, root, right]) = small();
        let top = arena.rotate_in_place(root, Direction::Right);
        assert_eq!(top, right);
        assert_eq!(arena.root, Some(right));
        assert_eq!(arena[right].parent, None);
        assert_eq!(arena.child(right, Direction::Left), Some(root));
        assert_eq!(arena[root].parent, Some(right));
        assert_eq!(arena.child(root, Direction::Left), Some(left));
        assert_eq!(arena.height(), 3);
    }

    #[test]
    fn release_relinks_moved_node() {
        let (mut arena, [left, root, right]) = small();
        // detach the left leaf, then drop it: the right leaf moves into its slot
        arena[root].children[0] = None;
        let removed = arena.release(left);
        assert_eq!(removed.key, 10);
        assert_eq!(arena.len(), 2);
        let moved = left;
        assert_eq!(arena[moved].key, 30);
        assert_eq!(arena.child(root, Direction::Right), Some(moved));
        let _ = right;
    }

    #[test]
    fn release_moves_root() {
        let mut arena: Arena<i32, (), ()> = Arena::new();
        let leaf = arena.alloc(1, (), None, ());
        let root = arena.alloc(2, (), None, ());
        arena[root].children[0] = Some(leaf);
        arena[leaf].parent = Some(root);
        arena.root = Some(root);
        // detach the leaf; the root moves from index 1 to index 0
        arena[root].children[0] = None;
        arena.release(leaf);
        assert_eq!(arena.root, Some(NodeId(0)));
        assert_eq!(arena[NodeId(0)].key, 2);
    }

    #[test]
    fn swap_payload_keeps_links() {
        let (mut arena, [left, root, _]) = small();
        arena.swap_payload(root, left);
        assert_eq!(arena[root].key, 10);
        assert_eq!(arena[left].key, 20);
        assert_eq!(arena[left].parent, Some(root));
    }
}
