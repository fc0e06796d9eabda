//! Read-only handles into a tree and in-order iteration.

use crate::arena::{Arena, Direction, NodeId};
use std::fmt;
use std::iter::FusedIterator;

/// A borrowed handle to one node of a tree.
///
/// Handles navigate the tree structure (`parent`, `left`, `right`) and its
/// in-order sequence (`next`, `prev`) without an explicit stack.
pub struct NodeRef<'a, K, V, M> {
    arena: &'a Arena<K, V, M>,
    id: NodeId,
}

impl<K, V, M> Clone for NodeRef<'_, K, V, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, M> Copy for NodeRef<'_, K, V, M> {}

impl<'a, K, V, M> NodeRef<'a, K, V, M> {
    pub(crate) fn new(arena: &'a Arena<K, V, M>, id: NodeId) -> Self {
        Self { arena, id }
    }

    fn at(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self::new(self.arena, id))
    }

    pub fn key(&self) -> &'a K {
        self.entry().0
    }

    pub fn value(&self) -> &'a V {
        self.entry().1
    }

    pub fn entry(&self) -> (&'a K, &'a V) {
        let arena = self.arena;
        let node = &arena[self.id];
        (&node.key, &node.value)
    }

    pub fn parent(&self) -> Option<Self> {
        self.at(self.arena[self.id].parent)
    }

    pub fn child(&self, dir: Direction) -> Option<Self> {
        self.at(self.arena.child(self.id, dir))
    }

    pub fn left(&self) -> Option<Self> {
        self.child(Direction::Left)
    }

    pub fn right(&self) -> Option<Self> {
        self.child(Direction::Right)
    }

    /// In-order successor.
    pub fn next(&self) -> Option<Self> {
        self.at(self.arena.walk(self.id, Direction::Right))
    }

    /// In-order predecessor.
    pub fn prev(&self) -> Option<Self> {
        self.at(self.arena.walk(self.id, Direction::Left))
    }

    pub(crate) fn meta(&self) -> &'a M {
        let arena = self.arena;
        &arena[self.id].meta
    }
}

impl<K: fmt::Debug, V: fmt::Debug, M> fmt::Debug for NodeRef<'_, K, V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .finish()
    }
}

/// In-order iterator over the entries of a tree.
pub struct Iter<'a, K, V, M> {
    arena: &'a Arena<K, V, M>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V, M> Iter<'a, K, V, M> {
    pub(crate) fn new(arena: &'a Arena<K, V, M>) -> Self {
        Self {
            arena,
            front: arena.end(Direction::Left),
            back: arena.end(Direction::Right),
            remaining: arena.len(),
        }
    }
}

impl<K, V, M> Clone for Iter<'_, K, V, M> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, M> Iterator for Iter<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.arena.walk(id, Direction::Right);
        let arena = self.arena;
        let node = &arena[id];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, M> DoubleEndedIterator for Iter<'_, K, V, M> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.arena.walk(id, Direction::Left);
        let arena = self.arena;
        let node = &arena[id];
        Some((&node.key, &node.value))
    }
}

impl<K, V, M> ExactSizeIterator for Iter<'_, K, V, M> {}

impl<K, V, M> FusedIterator for Iter<'_, K, V, M> {}
