use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

pub struct IterPostorder<'a, K> {
    nodes: &'a Slab<InnerNode<K>>,
    stack: Vec<usize>,
}

// See: https://www.geeksforgeeks.org/iterative-postorder-traversal-using-stack/
impl<'a, K> IterPostorder<'a, K> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<K>>, root: Ptr) -> Self {
        let mut stack = Vec::new();
        let mut current = root;
        while let Some(index) = current.into_index() {
            let node = &nodes[index];

            stack.extend(node.right.into_index());
            stack.push(index);

            current = node.left;
        }

        Self {nodes, stack}
    }

    /// Returns the slot of the next node in post-order
    pub(super) fn next_index(&mut self) -> Option<usize> {
        let nodes = self.nodes;

        while let Some(mut current) = self.stack.pop() {
            let mut node = &nodes[current];

            // If the top of the stack is the current node's right child, the right subtree has
            // not been visited yet
            match node.right.into_index() {
                Some(right) if self.stack.last().copied() == Some(right) => {
                    self.stack.pop();
                    self.stack.push(current);

                    current = right;
                    node = &nodes[current];
                },

                _ => return Some(current),
            }

            loop {
                self.stack.extend(node.right.into_index());
                self.stack.push(current);

                match node.left.into_index() {
                    Some(left) => {
                        current = left;
                        node = &nodes[current];
                    },

                    None => break,
                }
            }
        }

        None
    }
}

impl<'a, K> Iterator for IterPostorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        self.next_index().map(|index| &nodes[index].key)
    }
}

impl<'a, K> FusedIterator for IterPostorder<'a, K> {}
