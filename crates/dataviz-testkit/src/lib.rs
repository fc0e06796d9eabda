//! Shared test support for the dataviz crates.
//!
//! Fixture builders and structural invariant checkers live here so the tree,
//! map and CLI tests don't each grow their own copy. The checkers only use
//! the public node-handle API of the trees.

pub mod invariants;
pub mod proptest;

pub use invariants::{check_avl, check_red_black};

/// Keys of the classic seven-node example, in insertion order.
pub const SCENARIO_KEYS: [i32; 7] = [5, 3, 8, 1, 4, 7, 9];

/// Every ordering of `0..n` (Heap's algorithm).
pub fn permutations(n: i32) -> Vec<Vec<i32>> {
    fn generate(k: usize, items: &mut Vec<i32>, out: &mut Vec<Vec<i32>>) {
        if k <= 1 {
            out.push(items.clone());
            return;
        }
        for i in 0..k - 1 {
            generate(k - 1, items, out);
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
        }
        generate(k - 1, items, out);
    }

    let mut items: Vec<i32> = (0..n).collect();
    let mut out = Vec::new();
    generate(items.len(), &mut items, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn permutations_are_distinct_and_complete() {
        let perms = permutations(4);
        assert_eq!(perms.len(), 24);
        let distinct: BTreeSet<_> = perms.iter().cloned().collect();
        assert_eq!(distinct.len(), 24);
        for p in &perms {
            let mut sorted = p.clone();
            sorted.sort();
            assert_eq!(sorted, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn permutations_of_nothing() {
        assert_eq!(permutations(0), vec![Vec::<i32>::new()]);
        assert_eq!(permutations(1), vec![vec![0]]);
    }
}
