//! Core interfaces shared by every dataviz data structure.
//!
//! [`Container`] is the base interface all structures implement. The more
//! specific [`List`], [`Map`], [`Stack`] and [`Tree`] interfaces build on it.
//! [`JsonSerializer`]/[`JsonDeserializer`] and [`Visualizer`] are optional
//! capabilities.

use dataviz_utils::Comparator;

pub mod lists;
pub mod maps;
pub mod serialization;
pub mod stacks;
pub mod trees;
pub mod visualizer;

pub use lists::{List, ListError};
pub use maps::Map;
pub use serialization::{Entries, JsonDeserializer, JsonSerializer};
pub use stacks::Stack;
pub use trees::Tree;
pub use visualizer::Visualizer;

/// Base interface that all data structures implement.
pub trait Container<T> {
    fn is_empty(&self) -> bool;
    fn len(&self) -> usize;
    fn clear(&mut self);
    /// Elements in the container's natural iteration order.
    fn values(&self) -> Vec<&T>;
}

/// Returns the container's elements sorted by `comparator`.
///
/// The container itself is left untouched.
pub fn get_sorted_values<'a, T, K, C>(container: &'a K, comparator: &C) -> Vec<&'a T>
where
    K: Container<T> + ?Sized,
    C: Comparator<T> + ?Sized,
{
    let mut values = container.values();
    values.sort_by(|a, b| comparator.compare(a, b));
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataviz_utils::{NaturalOrder, Reverse};

    struct ContainerTest<T> {
        values: Vec<T>,
    }

    impl<T> Container<T> for ContainerTest<T> {
        fn is_empty(&self) -> bool {
            self.values.is_empty()
        }

        fn len(&self) -> usize {
            self.values.len()
        }

        fn clear(&mut self) {
            self.values.clear();
        }

        fn values(&self) -> Vec<&T> {
            self.values.iter().collect()
        }
    }

    #[test]
    fn sorted_values_ints() {
        let container = ContainerTest {
            values: vec![5, 1, 3, 2, 4],
        };
        let values = get_sorted_values(&container, &NaturalOrder);
        assert_eq!(values, vec![&1, &2, &3, &4, &5]);
        // the container keeps its own order
        assert_eq!(container.values(), vec![&5, &1, &3, &2, &4]);
    }

    #[test]
    fn sorted_values_strings() {
        let container = ContainerTest {
            values: vec!["g", "a", "d", "e", "f", "c", "b"],
        };
        let values = get_sorted_values(&container, &Reverse(NaturalOrder));
        assert_eq!(values, vec![&"g", &"f", &"e", &"d", &"c", &"b", &"a"]);
    }

    #[test]
    fn clear_empties_container() {
        let mut container = ContainerTest { values: vec![1] };
        assert!(!container.is_empty());
        container.clear();
        assert!(container.is_empty());
        assert_eq!(container.len(), 0);
    }

    proptest::proptest! {
        #[test]
        fn prop_sorted_values_match_std_sort(values in proptest::collection::vec(-100i32..100, 0..40)) {
            let container = ContainerTest { values: values.clone() };
            let sorted: Vec<i32> = get_sorted_values(&container, &NaturalOrder)
                .into_iter()
                .copied()
                .collect();
            let mut expected = values.clone();
            expected.sort();
            proptest::prop_assert_eq!(sorted, expected);
            proptest::prop_assert_eq!(container.values().len(), values.len());
        }
    }
}
