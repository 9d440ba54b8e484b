use std::fmt;

use log::trace;
use thiserror::Error;

use crate::slab::Ptr;

use super::{BSTSet, Node};

/// A broken structural invariant of a tree
///
/// None of these can be produced through the public API of `BSTSet`. Seeing one means that either
/// the tree has a bug or the ordering of a key changed while it was in the tree (e.g. through
/// interior mutability), which is a logic error on the caller's side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("key {key} lies outside the bounds set by its ancestors")]
    KeyOutOfBounds {
        key: String,
    },

    #[error("left child {child} is greater than its parent {parent}")]
    LeftChildGreater {
        parent: String,
        child: String,
    },

    #[error("right child {child} is less than its parent {parent}")]
    RightChildLess {
        parent: String,
        child: String,
    },

    #[error("root {key} has a parent link")]
    RootHasParent {
        key: String,
    },

    #[error("child {child} does not link back to its parent {parent}")]
    BrokenParentLink {
        parent: String,
        child: String,
    },

    #[error("node {parent} links to a released node")]
    DanglingLink {
        parent: String,
    },

    #[error("tree holds {expected} nodes but {reachable} were reached from the root")]
    LengthMismatch {
        expected: usize,
        reachable: usize,
    },
}

enum OrderFault<'a, K> {
    OutOfBounds(Node<'a, K>),
    LeftChildGreater {
        parent: Node<'a, K>,
        child: Node<'a, K>,
    },
    RightChildLess {
        parent: Node<'a, K>,
        child: Node<'a, K>,
    },
}

impl<'a, K: fmt::Debug> From<OrderFault<'a, K>> for InvariantViolation {
    fn from(fault: OrderFault<'a, K>) -> Self {
        match fault {
            OrderFault::OutOfBounds(node) => InvariantViolation::KeyOutOfBounds {
                key: describe(node.key()),
            },
            OrderFault::LeftChildGreater {parent, child} => InvariantViolation::LeftChildGreater {
                parent: describe(parent.key()),
                child: describe(child.key()),
            },
            OrderFault::RightChildLess {parent, child} => InvariantViolation::RightChildLess {
                parent: describe(parent.key()),
                child: describe(child.key()),
            },
        }
    }
}

fn describe<K: fmt::Debug>(key: &K) -> String {
    format!("{:?}", key)
}

/// Checks the ordering property of the subtree at `node`, given the bounds inherited from its
/// ancestors. Both bounds are exclusive.
fn check_order<'a, K: Ord>(
    node: Option<Node<'a, K>>,
    lower: Option<&'a K>,
    upper: Option<&'a K>,
) -> Result<(), OrderFault<'a, K>> {
    let node = match node {
        Some(node) => node,
        None => return Ok(()),
    };
    let key = node.key();

    let below_lower = lower.map_or(false, |lower| key <= lower);
    let above_upper = upper.map_or(false, |upper| key >= upper);
    if below_lower || above_upper {
        return Err(OrderFault::OutOfBounds(node));
    }

    if let Some(left) = node.left() {
        if left.key() > key {
            return Err(OrderFault::LeftChildGreater {parent: node, child: left});
        }
    }
    if let Some(right) = node.right() {
        if right.key() < key {
            return Err(OrderFault::RightChildLess {parent: node, child: right});
        }
    }

    check_order(node.left(), lower, Some(key))?;
    check_order(node.right(), Some(key), upper)
}

impl<K: Ord> BSTSet<K> {
    /// Returns true if every key is greater than all keys in its left subtree and less than all
    /// keys in its right subtree
    ///
    /// Time complexity: `O(n)`, with recursion depth up to `h`
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BSTSet;
    ///
    /// let set: BSTSet<_> = vec![5, 3, 8].into_iter().collect();
    /// assert!(set.is_bst());
    /// assert!(BSTSet::<i32>::new().is_bst());
    /// ```
    pub fn is_bst(&self) -> bool {
        check_order(self.root(), None, None).is_ok()
    }

    /// Checks every structural invariant of the tree, returning the first violation found
    ///
    /// In addition to the ordering checked by `is_bst`, this checks that the root has no parent,
    /// that every child links back to its parent and that every node in the tree is reachable
    /// from the root.
    ///
    /// Time complexity: `O(n)`
    pub fn validate(&self) -> Result<(), InvariantViolation>
        where K: fmt::Debug,
    {
        // Links first: the ordering check recurses and assumes the links form a tree
        self.check_links()?;
        check_order(self.root(), None, None)?;

        trace!("validated tree of {} nodes", self.len());
        Ok(())
    }

    fn check_links(&self) -> Result<(), InvariantViolation>
        where K: fmt::Debug,
    {
        let expected = self.len();
        let root = match self.root.into_index() {
            Some(root) => root,
            None if expected == 0 => return Ok(()),
            None => return Err(InvariantViolation::LengthMismatch {expected, reachable: 0}),
        };

        let root_node = self.nodes.get(root).ok_or(InvariantViolation::LengthMismatch {
            expected,
            reachable: 0,
        })?;
        if !root_node.parent.is_null() {
            return Err(InvariantViolation::RootHasParent {key: describe(&root_node.key)});
        }

        let mut reachable = 0;
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            reachable += 1;
            // More visits than nodes means some node is linked twice
            if reachable > expected {
                break;
            }

            let node = &self.nodes[index];
            for &child in &[node.left, node.right] {
                let child_index = match child.into_index() {
                    Some(child_index) => child_index,
                    None => continue,
                };
                let child_node = self.nodes.get(child_index).ok_or_else(|| {
                    InvariantViolation::DanglingLink {parent: describe(&node.key)}
                })?;

                if child_node.parent != Ptr::from(index) {
                    return Err(InvariantViolation::BrokenParentLink {
                        parent: describe(&node.key),
                        child: describe(&child_node.key),
                    });
                }

                stack.push(child_index);
            }
        }

        if reachable != expected {
            return Err(InvariantViolation::LengthMismatch {expected, reachable});
        }

        Ok(())
    }
}
