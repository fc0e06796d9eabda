//! Structural checks for the balanced trees.
//!
//! Each checker walks the whole tree through its node handles and returns a
//! description of the first violation it finds.

use dataviz_trees::{AvlNode, AvlTree, Color, NodeRef, RedBlackNode, RedBlackTree};
use dataviz_utils::Comparator;
use std::cmp::Ordering;
use std::fmt::Debug;

/// BST order, parent links, size, and for every node a cached balance equal
/// to the measured `height(right) - height(left)` within `-1..=1`.
pub fn check_avl<K, V, C>(tree: &AvlTree<K, V, C>) -> Result<(), String>
where
    K: Debug,
    C: Comparator<K>,
{
    check_order(tree.keys(), tree.comparator())?;
    let reachable = check_links(tree.root())?;
    check_size(reachable, tree.len(), tree.is_empty())?;
    avl_height(tree.root()).map(|_| ())
}

/// BST order, parent links, size, a black root, no red node with a red
/// child, and equal black heights on every path.
pub fn check_red_black<K, V, C>(tree: &RedBlackTree<K, V, C>) -> Result<(), String>
where
    K: Debug,
    C: Comparator<K>,
{
    check_order(tree.keys(), tree.comparator())?;
    let reachable = check_links(tree.root())?;
    check_size(reachable, tree.len(), tree.is_empty())?;
    if let Some(root) = tree.root()
        && root.color() != Color::Black
    {
        return Err(format!("root {:?} is red", root.key()));
    }
    black_height(tree.root()).map(|_| ())
}

fn check_order<'a, K, C>(keys: impl Iterator<Item = &'a K>, comparator: &C) -> Result<(), String>
where
    K: Debug + 'a,
    C: Comparator<K>,
{
    let mut previous: Option<&K> = None;
    for key in keys {
        if let Some(prev) = previous
            && comparator.compare(prev, key) != Ordering::Less
        {
            return Err(format!("in-order keys out of order: {prev:?} then {key:?}"));
        }
        previous = Some(key);
    }
    Ok(())
}

fn check_size(reachable: usize, len: usize, is_empty: bool) -> Result<(), String> {
    if reachable != len {
        return Err(format!("len() is {len} but {reachable} nodes are reachable"));
    }
    if is_empty != (reachable == 0) {
        return Err(format!("is_empty() is {is_empty} with {reachable} nodes"));
    }
    Ok(())
}

/// Counts the nodes under `node`, checking that each child points back at
/// its parent.
fn check_links<K: Debug, V, M>(node: Option<NodeRef<'_, K, V, M>>) -> Result<usize, String> {
    let Some(node) = node else {
        return Ok(0);
    };
    let mut count = 1;
    for child in [node.left(), node.right()].into_iter().flatten() {
        match child.parent() {
            Some(parent) if std::ptr::eq(parent.key(), node.key()) => {}
            _ => {
                return Err(format!(
                    "child {:?} does not point back at {:?}",
                    child.key(),
                    node.key()
                ));
            }
        }
        count += check_links(Some(child))?;
    }
    Ok(count)
}

fn avl_height<K: Debug, V>(node: Option<AvlNode<'_, K, V>>) -> Result<usize, String> {
    let Some(node) = node else {
        return Ok(0);
    };
    let left = avl_height(node.left())?;
    let right = avl_height(node.right())?;
    let measured = right as i64 - left as i64;
    if measured != i64::from(node.balance()) {
        return Err(format!(
            "node {:?} caches balance {} but measures {measured}",
            node.key(),
            node.balance()
        ));
    }
    if measured.abs() > 1 {
        return Err(format!("node {:?} is out of balance ({measured})", node.key()));
    }
    Ok(1 + left.max(right))
}

fn black_height<K: Debug, V>(node: Option<RedBlackNode<'_, K, V>>) -> Result<usize, String> {
    let Some(node) = node else {
        return Ok(1);
    };
    if node.color() == Color::Red {
        for child in [node.left(), node.right()].into_iter().flatten() {
            if child.color() == Color::Red {
                return Err(format!("red node {:?} has red child {:?}", node.key(), child.key()));
            }
        }
    }
    let left = black_height(node.left())?;
    let right = black_height(node.right())?;
    if left != right {
        return Err(format!(
            "node {:?} has black heights {left} (left) and {right} (right)",
            node.key()
        ));
    }
    Ok(left + usize::from(node.color() == Color::Black))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_trees_pass() {
        let avl: AvlTree<i32, ()> = (0..32).map(|k| (k, ())).collect();
        assert_eq!(check_avl(&avl), Ok(()));
        let rb: RedBlackTree<i32, ()> = (0..32).map(|k| (k, ())).collect();
        assert_eq!(check_red_black(&rb), Ok(()));
    }

    #[test]
    fn empty_trees_pass() {
        assert_eq!(check_avl(&AvlTree::<i32, ()>::new()), Ok(()));
        assert_eq!(check_red_black(&RedBlackTree::<i32, ()>::new()), Ok(()));
    }

    #[test]
    fn order_violation_is_reported() {
        let keys = [1, 3, 2];
        let err = check_order(keys.iter(), &dataviz_utils::NaturalOrder).unwrap_err();
        assert!(err.contains("3 then 2"), "{err}");
    }

    #[test]
    fn size_mismatch_is_reported() {
        assert!(check_size(2, 3, false).is_err());
        assert!(check_size(0, 0, false).is_err());
        assert!(check_size(0, 0, true).is_ok());
    }
}
