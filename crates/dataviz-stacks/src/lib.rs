//! Stack data structure implementations for dataviz.
//!
//! [`ArrayStack`] keeps its elements in an [`ArrayList`] with the top at the
//! end; [`LinkedListStack`] keeps them in a [`SinglyLinkedList`] with the top
//! at the head. Both report `values()` from the top down.

use dataviz_containers::serialization::elements_from_json;
use dataviz_containers::{Container, JsonDeserializer, JsonSerializer, Stack, Visualizer};
use dataviz_graph::{DotGraph, NodeStyle};
use dataviz_lists::{ArrayList, SinglyLinkedList};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Fill color of stack nodes in the dot export.
pub const STACK_NODE_COLOR: &str = "slateblue";

/// A stack implementation using an array list.
#[derive(Debug, Clone, Default)]
pub struct ArrayStack<T> {
    list: ArrayList<T>,
}

impl<T> ArrayStack<T> {
    /// Creates a new empty ArrayStack.
    pub fn new() -> Self {
        Self {
            list: ArrayList::new(),
        }
    }

    /// Creates a new ArrayStack with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: ArrayList::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: T) {
        self.list.push(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.list.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.list.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut T> {
        let top = self.list.len().checked_sub(1)?;
        self.list.get_mut(top)
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

    /// Elements from the top of the stack down.
    pub fn iter(&self) -> std::iter::Rev<std::slice::Iter<'_, T>> {
        self.list.iter().rev()
    }
}

/// The last element of the vector ends up on top.
impl<T> From<Vec<T>> for ArrayStack<T> {
    fn from(vec: Vec<T>) -> Self {
        Self {
            list: ArrayList::from(vec),
        }
    }
}

impl<T> From<ArrayStack<T>> for Vec<T> {
    fn from(stack: ArrayStack<T>) -> Self {
        stack.list.into()
    }
}

/// A stack implementation using a singly linked list.
#[derive(Debug, Clone, Default)]
pub struct LinkedListStack<T> {
    list: SinglyLinkedList<T>,
}

impl<T> LinkedListStack<T> {
    pub fn new() -> Self {
        Self {
            list: SinglyLinkedList::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.list.push_front(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    pub fn peek(&self) -> Option<&T> {
        self.list.front()
    }

    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.list.front_mut()
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

    /// Elements from the top of the stack down.
    pub fn iter(&self) -> dataviz_lists::singlylinkedlist::Iter<'_, T> {
        self.list.iter()
    }
}

macro_rules! impl_stack {
    ($stack:ident, $name:literal) => {
        impl<T> Stack<T> for $stack<T> {
            fn push(&mut self, value: T) {
                $stack::push(self, value)
            }

            fn pop(&mut self) -> Option<T> {
                $stack::pop(self)
            }

            fn peek(&self) -> Option<&T> {
                $stack::peek(self)
            }
        }

        impl<T> Container<T> for $stack<T> {
            fn is_empty(&self) -> bool {
                $stack::is_empty(self)
            }

            fn len(&self) -> usize {
                $stack::len(self)
            }

            fn clear(&mut self) {
                $stack::clear(self)
            }

            fn values(&self) -> Vec<&T> {
                self.iter().collect()
            }
        }

        impl<T: fmt::Display> fmt::Display for $stack<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                writeln!(f, "{}", $name)?;
                for (i, value) in self.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
        }

        /// Serialized from the top down.
        impl<T: Serialize> Serialize for $stack<T> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_seq(self.iter())
            }
        }

        impl<T: Serialize> JsonSerializer for $stack<T> {
            fn to_json(&self) -> anyhow::Result<String> {
                serde_json::to_string(self)
                    .map_err(|e| anyhow::anyhow!("JSON serialization failed: {}", e))
            }
        }

        /// Reads a top-down array, so `to_json` output reloads unchanged.
        impl<T> JsonDeserializer for $stack<T>
        where
            T: for<'de> Deserialize<'de>,
        {
            fn from_json(&mut self, data: &str) -> anyhow::Result<()> {
                let elements: Vec<T> = elements_from_json(data)?;
                self.clear();
                for value in elements.into_iter().rev() {
                    self.push(value);
                }
                Ok(())
            }
        }

        impl<T: fmt::Display> Visualizer for $stack<T> {
            fn dot_graph(&self) -> DotGraph {
                DotGraph::chain(
                    self.iter().map(ToString::to_string),
                    NodeStyle::filled(STACK_NODE_COLOR),
                )
            }
        }
    };
}

impl_stack!(ArrayStack, "ArrayStack");
impl_stack!(LinkedListStack, "LinkedListStack");
