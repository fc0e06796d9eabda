//! Reusable generators for keys, entries and mutation sequences.

use proptest::prelude::*;

// ============================================================================
// Base Strategies
// ============================================================================

/// Keys from a narrow range, so generated sequences revisit keys often.
pub fn strategy_key() -> impl Strategy<Value = i32> {
    -64i32..64
}

/// Short lowercase values.
pub fn strategy_value() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// Up to 128 keys, duplicates allowed.
pub fn strategy_keys() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(strategy_key(), 0..128)
}

/// Up to 64 key/value pairs, duplicates allowed.
pub fn strategy_entries() -> impl Strategy<Value = Vec<(i32, String)>> {
    prop::collection::vec((strategy_key(), strategy_value()), 0..64)
}

// ============================================================================
// Mutation Sequences
// ============================================================================

/// One mutation of an ordered map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Put(i32, String),
    Remove(i32),
}

/// Puts and removes, weighted toward puts so trees grow.
pub fn strategy_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (strategy_key(), strategy_value()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => strategy_key().prop_map(Op::Remove),
    ]
}

pub fn strategy_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(strategy_op(), 0..200)
}
