use std::collections::BTreeSet;

use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};

use linked_bst::{BSTSet, Node};

/// Something to do to a set in a quicktest
#[derive(Debug, Clone, Copy)]
enum Op {
    Insert(i8),
    Erase(i8),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(i8::arbitrary(g))
        } else {
            Op::Erase(i8::arbitrary(g))
        }
    }
}

fn preorder_keys(node: Node<'_, i16>) -> Vec<i16> {
    let mut keys = Vec::new();
    node.walk_preorder(|node| keys.push(*node.key()));
    keys
}

quickcheck! {
    fn inorder_is_strictly_ascending(keys: Vec<i16>) -> bool {
        let set: BSTSet<_> = keys.into_iter().collect();
        let sorted: Vec<_> = set.iter().collect();
        sorted.windows(2).all(|pair| pair[0] < pair[1])
    }

    fn same_keys_as_btreeset(keys: Vec<i16>) -> bool {
        let set: BSTSet<_> = keys.iter().copied().collect();
        let expected: BTreeSet<_> = keys.into_iter().collect();
        set.len() == expected.len() && set.iter().eq(expected.iter())
    }

    fn insert_then_search_finds(keys: Vec<i16>, key: i16) -> bool {
        let mut set: BSTSet<_> = keys.into_iter().collect();
        let was_present = set.contains(&key);

        set.insert(key) != was_present && set.search(&key).map(|node| *node.key()) == Some(key)
    }

    fn erase_then_search_misses(keys: Vec<i16>, key: i16) -> bool {
        let mut set: BSTSet<_> = keys.into_iter().collect();
        let was_present = set.contains(&key);

        set.remove(&key) == was_present
            && set.search(&key).is_none()
            && set.search_recursive(&key).is_none()
    }

    fn recursive_and_iterative_search_agree(ops: Vec<Op>, probes: Vec<i8>) -> bool {
        let mut set = BSTSet::new();
        ops.iter().all(|&op| {
            match op {
                Op::Insert(key) => set.insert(key),
                Op::Erase(key) => set.remove(&key),
            };
            probes.iter().all(|probe| set.search(probe) == set.search_recursive(probe))
        })
    }

    fn operations_keep_tree_valid(ops: Vec<Op>) -> bool {
        let mut set = BSTSet::new();
        let mut expected = BTreeSet::new();

        ops.into_iter().all(|op| {
            let agrees = match op {
                Op::Insert(key) => set.insert(key) == expected.insert(key),
                Op::Erase(key) => set.remove(&key) == expected.remove(&key),
            };
            agrees && set.is_bst() && set.validate().is_ok() && set.len() == expected.len()
        }) && set.iter().eq(expected.iter())
    }

    fn successor_and_predecessor_are_inverse(keys: Vec<i16>) -> bool {
        let set: BSTSet<_> = keys.into_iter().collect();

        let mut inverse = true;
        set.walk_inorder(|node| {
            if let Some(prev) = node.predecessor() {
                inverse &= prev.successor() == Some(node);
            }
            if let Some(next) = node.successor() {
                inverse &= next.predecessor() == Some(node);
            }
        });

        let ends = set.first().map_or(true, |first| first.predecessor().is_none())
            && set.last().map_or(true, |last| last.successor().is_none());
        inverse && ends
    }

    fn removing_two_child_node_promotes_successor(keys: Vec<i16>) -> TestResult {
        let set: BSTSet<_> = keys.into_iter().collect();

        let mut candidates = Vec::new();
        set.walk_preorder(|node| {
            if node.has_left() && node.has_right() {
                candidates.push(*node.key());
            }
        });
        if candidates.is_empty() {
            return TestResult::discard();
        }

        for key in candidates {
            let node = set.search(&key).unwrap();
            // Where the removed node hangs: its parent's key and whether it is the left child
            let position = node.parent().map(|parent| (*parent.key(), parent.left() == Some(node)));
            let successor = node.successor().unwrap();
            let successor_key = *successor.key();
            let successor_right = successor.right().map(preorder_keys);

            let mut after = set.clone();
            if !after.remove(&key) {
                return TestResult::failed();
            }

            let replacement = match position {
                None => after.root(),
                Some((parent_key, true)) => after.search(&parent_key).and_then(|parent| parent.left()),
                Some((parent_key, false)) => after.search(&parent_key).and_then(|parent| parent.right()),
            };
            if replacement.map(|node| *node.key()) != Some(successor_key) {
                return TestResult::failed();
            }

            // Same pre-order keys means the same shape
            if let Some(right_keys) = successor_right {
                let moved = after.search(&right_keys[0]).map(preorder_keys);
                if moved != Some(right_keys) {
                    return TestResult::failed();
                }
            }

            if after.validate().is_err() {
                return TestResult::failed();
            }
        }

        TestResult::passed()
    }
}
