use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

pub struct IterPreorder<'a, K> {
    nodes: &'a Slab<InnerNode<K>>,
    stack: Vec<usize>,
}

impl<'a, K> IterPreorder<'a, K> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<K>>, root: Ptr) -> Self {
        Self {
            nodes,
            stack: root.into_index().into_iter().collect(),
        }
    }
}

// See: https://www.geeksforgeeks.org/iterative-preorder-traversal/
impl<'a, K> Iterator for IterPreorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = &nodes[self.stack.pop()?];
        // Right goes first so that the left subtree is popped first
        self.stack.extend(node.right.into_index());
        self.stack.extend(node.left.into_index());
        Some(&node.key)
    }
}

impl<'a, K> FusedIterator for IterPreorder<'a, K> {}
