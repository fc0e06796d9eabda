//! List of boxed nodes, each owning the next.

use crate::{LIST_NODE_COLOR, check_index, write_values};
use dataviz_containers::serialization::elements_from_json;
use dataviz_containers::{Container, JsonDeserializer, JsonSerializer, List, ListError, Visualizer};
use dataviz_graph::{DotGraph, NodeStyle};
use dataviz_utils::Comparator;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::FusedIterator;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

pub struct SinglyLinkedList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SinglyLinkedList<T> {
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn clear(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
        self.len = 0;
    }

    /// Prepends a value.
    pub fn push_front(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        self.len -= 1;
        Some(node.value)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.as_deref_mut().map(|node| &mut node.value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
            remaining: self.len,
        }
    }

    /// The link that holds element `index`, or the trailing empty link when
    /// `index == len`.
    fn link_mut(&mut self, index: usize) -> &mut Link<T> {
        let mut link = &mut self.head;
        for _ in 0..index {
            match link {
                Some(node) => link = &mut node.next,
                None => break,
            }
        }
        link
    }

    /// Writes `values` into the empty `link` one after another, returning how
    /// many were written and the link after the last one.
    fn fill<I: IntoIterator<Item = T>>(mut link: &mut Link<T>, values: I) -> (usize, &mut Link<T>) {
        let mut written = 0;
        for value in values {
            let node = link.insert(Box::new(Node { value, next: None }));
            link = &mut node.next;
            written += 1;
        }
        (written, link)
    }
}

impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for SinglyLinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SinglyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.add(iter);
        list
    }
}

impl<T> Extend<T> for SinglyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add(iter);
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        self.next = node.next.as_deref_mut();
        self.remaining -= 1;
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Container<T> for SinglyLinkedList<T> {
    fn is_empty(&self) -> bool {
        SinglyLinkedList::is_empty(self)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        SinglyLinkedList::clear(self)
    }

    fn values(&self) -> Vec<&T> {
        self.iter().collect()
    }
}

impl<T> List<T> for SinglyLinkedList<T> {
    fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let link = self.link_mut(index);
        let mut node = link.take()?;
        *link = node.next.take();
        self.len -= 1;
        Some(node.value)
    }

    fn add<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let len = self.len;
        let (written, _) = Self::fill(self.link_mut(len), values);
        self.len += written;
    }

    fn contains(&self, values: &[T]) -> bool
    where
        T: PartialEq,
    {
        values.iter().all(|v| self.iter().any(|x| x == v))
    }

    fn sort<C: Comparator<T> + ?Sized>(&mut self, comparator: &C) {
        let mut values = Vec::with_capacity(self.len);
        while let Some(value) = self.pop_front() {
            values.push(value);
        }
        dataviz_utils::sort(&mut values, comparator);
        self.add(values);
    }

    fn swap(&mut self, i: usize, j: usize) -> Result<(), ListError> {
        check_index(i, self.len)?;
        check_index(j, self.len)?;
        if i == j {
            return Ok(());
        }
        let (lo, hi) = (i.min(j), i.max(j));
        let mut iter = self.iter_mut().skip(lo);
        if let (Some(a), Some(b)) = (iter.next(), iter.nth(hi - lo - 1)) {
            std::mem::swap(a, b);
        }
        Ok(())
    }

    fn insert<I: IntoIterator<Item = T>>(&mut self, index: usize, values: I) -> Result<(), ListError> {
        if index > self.len {
            return Err(ListError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        let link = self.link_mut(index);
        let rest = link.take();
        let (written, tail) = Self::fill(link, values);
        *tail = rest;
        self.len += written;
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_values(f, "SinglyLinkedList", self.iter())
    }
}

impl<T: Serialize> Serialize for SinglyLinkedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<T: Serialize> JsonSerializer for SinglyLinkedList<T> {
    fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).map_err(|e| anyhow::anyhow!("JSON serialization failed: {}", e))
    }
}

impl<T> JsonDeserializer for SinglyLinkedList<T>
where
    T: for<'de> Deserialize<'de>,
{
    fn from_json(&mut self, data: &str) -> anyhow::Result<()> {
        let elements = elements_from_json(data)?;
        self.clear();
        self.add(elements);
        Ok(())
    }
}

impl<T: fmt::Display> Visualizer for SinglyLinkedList<T> {
    fn dot_graph(&self) -> DotGraph {
        DotGraph::chain(
            self.iter().map(ToString::to_string),
            NodeStyle::filled(LIST_NODE_COLOR),
        )
    }
}
