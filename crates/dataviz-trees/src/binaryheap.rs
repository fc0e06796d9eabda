//! Binary heap backed by a vector.
//!
//! The comparator decides the order: the element that compares least sits on
//! top, so the default [`NaturalOrder`] gives a min-heap and
//! `Reverse(NaturalOrder)` a max-heap.

use dataviz_containers::serialization::elements_from_json;
use dataviz_containers::{Container, JsonDeserializer, JsonSerializer, Tree, Visualizer};
use dataviz_graph::{DotGraph, Edge, NodeId, NodeStyle};
use dataviz_utils::{Comparator, NaturalOrder};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Fill color of heap nodes in the dot export.
pub const HEAP_NODE_COLOR: &str = "steelblue1";

/// A binary heap ordered by a comparator.
#[derive(Debug, Clone)]
pub struct BinaryHeap<T, C = NaturalOrder> {
    data: Vec<T>,
    comparator: C,
}

impl<T: Ord> Default for BinaryHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> BinaryHeap<T> {
    /// Create a new empty min-heap.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Create a min-heap from a vector.
    pub fn from_vec(vec: Vec<T>) -> Self {
        let mut heap = Self::new();
        heap.push_all(vec);
        heap
    }
}

impl<T, C: Comparator<T>> BinaryHeap<T, C> {
    /// Create a new empty heap ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            data: Vec::new(),
            comparator,
        }
    }

    /// Insert an element into the heap.
    pub fn push(&mut self, item: T) {
        self.data.push(item);
        self.bubble_up(self.data.len() - 1);
    }

    /// Append many elements, then restore the heap order bottom-up.
    pub fn push_all<I: IntoIterator<Item = T>>(&mut self, items: I) {
        let before = self.data.len();
        self.data.extend(items);
        match self.data.len() - before {
            0 => {}
            1 => self.bubble_up(self.data.len() - 1),
            _ => self.heapify(),
        }
    }

    /// Remove and return the top element.
    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let top = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.bubble_down(0);
        }
        Some(top)
    }

    /// Drain the heap in comparator order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.data.len());
        while let Some(item) = self.pop() {
            result.push(item);
        }
        result
    }

    fn heapify(&mut self) {
        let n = self.data.len();
        for i in (0..n / 2).rev() {
            self.bubble_down(i);
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.comparator.compare(&self.data[a], &self.data[b]) == Ordering::Less
    }

    fn bubble_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.less(idx, parent) {
                break;
            }
            self.data.swap(idx, parent);
            idx = parent;
        }
    }

    fn bubble_down(&mut self, mut idx: usize) {
        let n = self.data.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;
            if left < n && self.less(left, smallest) {
                smallest = left;
            }
            if right < n && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.data.swap(idx, smallest);
            idx = smallest;
        }
    }
}

impl<T, C> BinaryHeap<T, C> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the top element without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Elements in storage (level) order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Number of levels; 0 when empty.
    pub fn height(&self) -> usize {
        match self.data.len() {
            0 => 0,
            n => n.ilog2() as usize + 1,
        }
    }
}

impl<T, C: Comparator<T>> Extend<T> for BinaryHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push_all(iter);
    }
}

impl<T: Ord> FromIterator<T> for BinaryHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: fmt::Display, C> fmt::Display for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BinaryHeap")?;
        for (i, value) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl<T, C> Container<T> for BinaryHeap<T, C> {
    fn is_empty(&self) -> bool {
        BinaryHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        BinaryHeap::len(self)
    }

    fn clear(&mut self) {
        BinaryHeap::clear(self)
    }

    fn values(&self) -> Vec<&T> {
        self.data.iter().collect()
    }
}

impl<T, C> Tree<T> for BinaryHeap<T, C> {
    fn height(&self) -> usize {
        BinaryHeap::height(self)
    }
}

impl<T: Serialize, C> Serialize for BinaryHeap<T, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.data)
    }
}

impl<T: Serialize, C> JsonSerializer for BinaryHeap<T, C> {
    fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).map_err(|e| anyhow::anyhow!("JSON serialization failed: {}", e))
    }
}

impl<T, C> JsonDeserializer for BinaryHeap<T, C>
where
    T: for<'de> Deserialize<'de>,
    C: Comparator<T>,
{
    fn from_json(&mut self, data: &str) -> anyhow::Result<()> {
        let elements = elements_from_json::<T>(data)?;
        self.clear();
        self.push_all(elements);
        Ok(())
    }
}

impl<T: fmt::Display, C> Visualizer for BinaryHeap<T, C> {
    fn dot_graph(&self) -> DotGraph {
        let mut graph = DotGraph::new();
        for (i, value) in self.data.iter().enumerate() {
            if i > 0 {
                graph.add_edge(Edge::new(NodeId((i - 1) / 2), NodeId(i)));
            }
            graph.add_node(NodeId(i), value.to_string(), NodeStyle::filled(HEAP_NODE_COLOR));
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataviz_utils::Reverse;

    fn assert_heap_order<T: Ord>(heap: &BinaryHeap<T>) {
        let data: Vec<_> = heap.iter().collect();
        for i in 1..data.len() {
            assert!(data[(i - 1) / 2] <= data[i], "parent above child at {i}");
        }
    }

    #[test]
    fn test_binary_heap_push_pop() {
        let mut heap = BinaryHeap::new();

        heap.push(3);
        heap.push(1);
        heap.push(4);
        heap.push(1);
        heap.push(5);

        assert_eq!(heap.len(), 5);
        assert_eq!(heap.pop(), Some(1));
        assert_heap_order(&heap);
    }

    #[test]
    fn test_binary_heap_from_vec() {
        let heap = BinaryHeap::from_vec(vec![3, 1, 4, 1, 5, 9, 2, 6]);

        assert_eq!(heap.len(), 8);
        assert_eq!(heap.peek(), Some(&1));
        assert_heap_order(&heap);
    }

    #[test]
    fn test_binary_heap_push_all_heapifies() {
        let mut heap = BinaryHeap::new();
        heap.push(7);
        heap.push_all([9, 2, 8, 3]);

        assert_eq!(heap.peek(), Some(&2));
        assert_heap_order(&heap);
        assert_eq!(heap.into_sorted_vec(), vec![2, 3, 7, 8, 9]);
    }

    #[test]
    fn test_binary_heap_max_order() {
        let mut heap = BinaryHeap::with_comparator(Reverse(NaturalOrder));

        heap.push(3);
        heap.push(1);
        heap.push(4);

        assert_eq!(heap.pop(), Some(4));
        assert_eq!(heap.pop(), Some(3));
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_binary_heap_empty() {
        let mut heap: BinaryHeap<i32> = BinaryHeap::new();

        assert!(heap.is_empty());
        assert_eq!(heap.pop(), None);
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.height(), 0);
    }

    #[test]
    fn test_binary_heap_height() {
        let heap: BinaryHeap<i32> = (0..7).collect();
        assert_eq!(heap.height(), 3);
        let heap: BinaryHeap<i32> = (0..8).collect();
        assert_eq!(heap.height(), 4);
    }

    #[test]
    fn test_binary_heap_display() {
        let heap = BinaryHeap::from_vec(vec![3, 2, 1]);
        assert_eq!(heap.to_string(), "BinaryHeap\n1, 2, 3");
    }

    #[test]
    fn test_binary_heap_dot_edges() {
        let heap = BinaryHeap::from_vec(vec![1, 2, 3, 4]);
        let graph = heap.dot_graph();
        assert_eq!(graph.edge_list(), "0 [1]\n1 [2]\n2 [3]\n3 [4]\n0 -> 1\n0 -> 2\n1 -> 3\n");
        assert!(graph.to_dot().contains("fillcolor=steelblue1"));
    }

    #[test]
    fn test_binary_heap_json() {
        let heap = BinaryHeap::from_vec(vec![2, 1]);
        assert_eq!(heap.to_json().unwrap(), "[1,2]");

        let mut other: BinaryHeap<i32> = BinaryHeap::new();
        other.from_json("[5, 4, 6]").unwrap();
        assert_eq!(other.peek(), Some(&4));
        assert!(other.from_json("{}").is_err());
        assert_eq!(other.len(), 3);
    }

    #[test]
    fn test_binary_heap_strings() {
        let mut heap = BinaryHeap::with_comparator(dataviz_utils::string_comparator::<String>);
        heap.push_all(["b".to_string(), "c".to_string(), "a".to_string()]);
        assert_eq!(heap.pop().as_deref(), Some("a"));
    }
}
