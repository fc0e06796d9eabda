//! Property tests for dataviz-lists
//!
//! The three list implementations are driven through the `List` interface
//! with the same operations as a plain `Vec` and must stay equal to it.

use dataviz_containers::{Container, List};
use dataviz_lists::{ArrayList, DoublyLinkedList, SinglyLinkedList};
use dataviz_utils::NaturalOrder;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum ListOp {
    Add(Vec<i32>),
    Remove(usize),
    Insert(usize, Vec<i32>),
    Swap(usize, usize),
    Sort,
}

fn strategy_list_op() -> impl Strategy<Value = ListOp> {
    let values = prop::collection::vec(-20i32..20, 0..5);
    prop_oneof![
        3 => values.clone().prop_map(ListOp::Add),
        2 => (0usize..12).prop_map(ListOp::Remove),
        2 => ((0usize..12), values).prop_map(|(i, v)| ListOp::Insert(i, v)),
        2 => ((0usize..12), (0usize..12)).prop_map(|(i, j)| ListOp::Swap(i, j)),
        1 => Just(ListOp::Sort),
    ]
}

fn apply_to_model(model: &mut Vec<i32>, op: &ListOp) {
    match op {
        ListOp::Add(values) => model.extend(values),
        ListOp::Remove(i) => {
            if *i < model.len() {
                model.remove(*i);
            }
        }
        ListOp::Insert(i, values) => {
            if *i <= model.len() {
                model.splice(*i..*i, values.iter().copied());
            }
        }
        ListOp::Swap(i, j) => {
            if *i < model.len() && *j < model.len() {
                model.swap(*i, *j);
            }
        }
        ListOp::Sort => model.sort(),
    }
}

fn apply_to_list<L: List<i32>>(list: &mut L, op: &ListOp) {
    match op {
        ListOp::Add(values) => list.add(values.iter().copied()),
        ListOp::Remove(i) => {
            list.remove(*i);
        }
        ListOp::Insert(i, values) => {
            let _ = list.insert(*i, values.iter().copied());
        }
        ListOp::Swap(i, j) => {
            let _ = list.swap(*i, *j);
        }
        ListOp::Sort => list.sort(&NaturalOrder),
    }
}

fn check_against<L: List<i32>>(list: &L, model: &[i32]) -> Result<(), TestCaseError> {
    prop_assert_eq!(list.len(), model.len());
    let values: Vec<i32> = list.values().into_iter().copied().collect();
    prop_assert_eq!(values.as_slice(), model);
    for (i, expected) in model.iter().enumerate() {
        prop_assert_eq!(list.get(i), Some(expected));
    }
    prop_assert_eq!(list.get(model.len()), None);
    Ok(())
}

proptest! {
    #[test]
    fn prop_lists_match_vec(ops in prop::collection::vec(strategy_list_op(), 0..60)) {
        let mut model = Vec::new();
        let mut array = ArrayList::new();
        let mut singly = SinglyLinkedList::new();
        let mut doubly = DoublyLinkedList::new();

        for op in &ops {
            apply_to_model(&mut model, op);
            apply_to_list(&mut array, op);
            apply_to_list(&mut singly, op);
            apply_to_list(&mut doubly, op);
        }

        check_against(&array, &model)?;
        check_against(&singly, &model)?;
        check_against(&doubly, &model)?;
    }

    #[test]
    fn prop_contains_matches_model(
        values in prop::collection::vec(-10i32..10, 0..20),
        query in prop::collection::vec(-10i32..10, 0..4)
    ) {
        let expected = query.iter().all(|q| values.contains(q));
        let list: SinglyLinkedList<i32> = values.iter().copied().collect();
        prop_assert_eq!(list.contains(&query), expected);
        let list: DoublyLinkedList<i32> = values.into_iter().collect();
        prop_assert_eq!(list.contains(&query), expected);
    }
}
