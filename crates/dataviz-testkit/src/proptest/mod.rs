//! Proptest strategies for dataviz property-based testing.

pub mod strategies;

pub use strategies::{
    Op, strategy_entries, strategy_key, strategy_keys, strategy_op, strategy_ops, strategy_value,
};
