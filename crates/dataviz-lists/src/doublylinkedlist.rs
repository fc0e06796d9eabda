//! List with links in both directions, on top of `std::collections::LinkedList`.

use crate::{LIST_NODE_COLOR, check_index, write_values};
use dataviz_containers::serialization::elements_from_json;
use dataviz_containers::{Container, JsonDeserializer, JsonSerializer, List, ListError, Visualizer};
use dataviz_graph::{DotGraph, Edge, NodeId, NodeStyle};
use dataviz_utils::Comparator;
use serde::{Deserialize, Serialize};
use std::collections::LinkedList;
use std::collections::linked_list;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoublyLinkedList<T> {
    list: LinkedList<T>,
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DoublyLinkedList<T> {
    pub fn new() -> Self {
        Self {
            list: LinkedList::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    pub fn push_front(&mut self, value: T) {
        self.list.push_front(value);
    }

    pub fn push_back(&mut self, value: T) {
        self.list.push_back(value);
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }

    pub fn front(&self) -> Option<&T> {
        self.list.front()
    }

    pub fn back(&self) -> Option<&T> {
        self.list.back()
    }

    pub fn iter(&self) -> linked_list::Iter<'_, T> {
        self.list.iter()
    }

    pub fn iter_mut(&mut self) -> linked_list::IterMut<'_, T> {
        self.list.iter_mut()
    }
}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.list.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = linked_list::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Container<T> for DoublyLinkedList<T> {
    fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn clear(&mut self) {
        self.list.clear();
    }

    fn values(&self) -> Vec<&T> {
        self.list.iter().collect()
    }
}

impl<T> List<T> for DoublyLinkedList<T> {
    fn get(&self, index: usize) -> Option<&T> {
        if index >= self.list.len() {
            return None;
        }
        // walk from whichever end is closer
        let from_back = self.list.len() - 1 - index;
        if index <= from_back {
            self.list.iter().nth(index)
        } else {
            self.list.iter().nth_back(from_back)
        }
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.list.len() {
            return None;
        }
        let mut tail = self.list.split_off(index);
        let removed = tail.pop_front();
        self.list.append(&mut tail);
        removed
    }

    fn add<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.list.extend(values);
    }

    fn contains(&self, values: &[T]) -> bool
    where
        T: PartialEq,
    {
        values.iter().all(|v| self.list.contains(v))
    }

    fn sort<C: Comparator<T> + ?Sized>(&mut self, comparator: &C) {
        let mut values: Vec<T> = std::mem::take(&mut self.list).into_iter().collect();
        dataviz_utils::sort(&mut values, comparator);
        self.list.extend(values);
    }

    fn swap(&mut self, i: usize, j: usize) -> Result<(), ListError> {
        check_index(i, self.list.len())?;
        check_index(j, self.list.len())?;
        if i == j {
            return Ok(());
        }
        let (lo, hi) = (i.min(j), i.max(j));
        let mut iter = self.list.iter_mut().skip(lo);
        if let (Some(a), Some(b)) = (iter.next(), iter.nth(hi - lo - 1)) {
            std::mem::swap(a, b);
        }
        Ok(())
    }

    fn insert<I: IntoIterator<Item = T>>(&mut self, index: usize, values: I) -> Result<(), ListError> {
        if index > self.list.len() {
            return Err(ListError::IndexOutOfBounds {
                index,
                len: self.list.len(),
            });
        }
        let mut tail = self.list.split_off(index);
        self.list.extend(values);
        self.list.append(&mut tail);
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for DoublyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_values(f, "DoublyLinkedList", &self.list)
    }
}

impl<T: Serialize> JsonSerializer for DoublyLinkedList<T> {
    fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).map_err(|e| anyhow::anyhow!("JSON serialization failed: {}", e))
    }
}

impl<T> JsonDeserializer for DoublyLinkedList<T>
where
    T: for<'de> Deserialize<'de>,
{
    fn from_json(&mut self, data: &str) -> anyhow::Result<()> {
        let elements: Vec<T> = elements_from_json(data)?;
        self.list = elements.into_iter().collect();
        Ok(())
    }
}

impl<T: fmt::Display> Visualizer for DoublyLinkedList<T> {
    /// A chain with edges in both directions between neighbours.
    fn dot_graph(&self) -> DotGraph {
        let mut graph = DotGraph::chain(
            self.list.iter().map(ToString::to_string),
            NodeStyle::filled(LIST_NODE_COLOR),
        );
        for i in 1..self.list.len() {
            graph.add_edge(Edge::new(NodeId(i), NodeId(i - 1)));
        }
        graph
    }
}
