//! Fuzz harness for AVL tree operation sequences
//!
//! Each input byte pair is one operation: the high bit of the first byte
//! picks put or remove, the rest of it plus the second byte form the key.
//! After every operation the tree must match a `BTreeMap` and keep its
//! balance invariants.

#![no_main]

use dataviz_testkit::check_avl;
use dataviz_trees::AvlTree;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;

fuzz_target!(|data: &[u8]| {
    let mut tree = AvlTree::new();
    let mut model = BTreeMap::new();

    for (step, pair) in data.chunks_exact(2).enumerate() {
        let key = i16::from_le_bytes([pair[0] & 0x7f, pair[1]]) % 512;
        if pair[0] & 0x80 == 0 {
            assert_eq!(tree.put(key, step), model.insert(key, step));
        } else {
            assert_eq!(tree.remove(&key), model.remove(&key));
        }
        if let Err(violation) = check_avl(&tree) {
            panic!("after step {step}: {violation}");
        }
    }

    assert!(tree.iter().map(|(k, v)| (*k, *v)).eq(model.into_iter()));
});
