//! List backed by a growable array.

use crate::{LIST_NODE_COLOR, check_index, write_values};
use dataviz_containers::serialization::elements_from_json;
use dataviz_containers::{Container, JsonDeserializer, JsonSerializer, List, ListError, Visualizer};
use dataviz_graph::{DotGraph, NodeStyle};
use dataviz_utils::Comparator;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrayList<T> {
    elements: Vec<T>,
}

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ArrayList<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn push(&mut self, value: T) {
        self.elements.push(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.elements.pop()
    }

    pub fn last(&self) -> Option<&T> {
        self.elements.last()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.elements.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }
}

impl<T> From<Vec<T>> for ArrayList<T> {
    fn from(elements: Vec<T>) -> Self {
        Self { elements }
    }
}

impl<T> From<ArrayList<T>> for Vec<T> {
    fn from(list: ArrayList<T>) -> Self {
        list.elements
    }
}

impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for ArrayList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for ArrayList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<T> Container<T> for ArrayList<T> {
    fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn len(&self) -> usize {
        self.elements.len()
    }

    fn clear(&mut self) {
        self.elements.clear();
    }

    fn values(&self) -> Vec<&T> {
        self.elements.iter().collect()
    }
}

impl<T> List<T> for ArrayList<T> {
    fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.elements.len()).then(|| self.elements.remove(index))
    }

    fn add<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.elements.extend(values);
    }

    fn contains(&self, values: &[T]) -> bool
    where
        T: PartialEq,
    {
        values.iter().all(|v| self.elements.contains(v))
    }

    fn sort<C: Comparator<T> + ?Sized>(&mut self, comparator: &C) {
        dataviz_utils::sort(&mut self.elements, comparator);
    }

    fn swap(&mut self, i: usize, j: usize) -> Result<(), ListError> {
        check_index(i, self.elements.len())?;
        check_index(j, self.elements.len())?;
        self.elements.swap(i, j);
        Ok(())
    }

    fn insert<I: IntoIterator<Item = T>>(&mut self, index: usize, values: I) -> Result<(), ListError> {
        if index > self.elements.len() {
            return Err(ListError::IndexOutOfBounds {
                index,
                len: self.elements.len(),
            });
        }
        self.elements.splice(index..index, values);
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for ArrayList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_values(f, "ArrayList", &self.elements)
    }
}

impl<T: Serialize> JsonSerializer for ArrayList<T> {
    fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(&self.elements)
            .map_err(|e| anyhow::anyhow!("JSON serialization failed: {}", e))
    }
}

impl<T> JsonDeserializer for ArrayList<T>
where
    T: for<'de> Deserialize<'de>,
{
    fn from_json(&mut self, data: &str) -> anyhow::Result<()> {
        self.elements = elements_from_json(data)?;
        Ok(())
    }
}

impl<T: fmt::Display> Visualizer for ArrayList<T> {
    fn dot_graph(&self) -> DotGraph {
        DotGraph::chain(
            self.elements.iter().map(ToString::to_string),
            NodeStyle::filled(LIST_NODE_COLOR),
        )
    }
}
