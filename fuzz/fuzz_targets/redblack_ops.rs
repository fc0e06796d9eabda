//! Fuzz harness for red-black tree operation sequences
//!
//! Same encoding as `avl_ops`; the tree is checked against a `BTreeMap` and
//! the red-black coloring rules after every operation.

#![no_main]

use dataviz_testkit::check_red_black;
use dataviz_trees::RedBlackTree;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;

fuzz_target!(|data: &[u8]| {
    let mut tree = RedBlackTree::new();
    let mut model = BTreeMap::new();

    for (step, pair) in data.chunks_exact(2).enumerate() {
        let key = i16::from_le_bytes([pair[0] & 0x7f, pair[1]]) % 512;
        if pair[0] & 0x80 == 0 {
            assert_eq!(tree.put(key, step), model.insert(key, step));
        } else {
            assert_eq!(tree.remove(&key), model.remove(&key));
        }
        if let Err(violation) = check_red_black(&tree) {
            panic!("after step {step}: {violation}");
        }
    }

    assert_eq!(tree.len(), model.len());
    assert!(tree.keys().eq(model.keys()));
});
