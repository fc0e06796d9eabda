//! Fuzz harness for JSON decoding into trees and heaps
//!
//! Arbitrary text must either decode cleanly or leave the structure
//! untouched; a decoded tree must re-encode to equivalent JSON.

#![no_main]

use dataviz_containers::{JsonDeserializer, JsonSerializer};
use dataviz_maps::TreeMap;
use dataviz_testkit::check_avl;
use dataviz_trees::{AvlTree, BinaryHeap};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let mut tree: AvlTree<i64, String> = [(0, "seed".to_string())].into_iter().collect();
    match tree.from_json(input) {
        Ok(()) => {
            if let Err(violation) = check_avl(&tree) {
                panic!("decoded tree is unbalanced: {violation}");
            }
            let encoded = tree.to_json().expect("tree re-encodes");
            let mut again: AvlTree<i64, String> = AvlTree::new();
            again.from_json(&encoded).expect("re-encoded tree decodes");
            assert!(tree.iter().eq(again.iter()));
        }
        Err(_) => {
            assert_eq!(tree.len(), 1);
            assert_eq!(tree.get(&0).map(String::as_str), Some("seed"));
        }
    }

    let mut map: TreeMap<String, serde_json::Value> = TreeMap::new();
    let _ = map.from_json(input);

    let mut heap: BinaryHeap<i32> = BinaryHeap::new();
    if heap.from_json(input).is_ok() {
        let sorted = heap.into_sorted_vec();
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    }
});
