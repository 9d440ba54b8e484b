use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

pub struct IterInorder<'a, K> {
    nodes: &'a Slab<InnerNode<K>>,
    stack: Vec<usize>,
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a, K> IterInorder<'a, K> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<K>>, root: Ptr) -> Self {
        let mut iter = Self {nodes, stack: Vec::new()};
        iter.push_left_spine(root);
        iter
    }

    /// Pushes `current` and every node reachable by only going left from it
    fn push_left_spine(&mut self, mut current: Ptr) {
        while let Some(index) = current.into_index() {
            self.stack.push(index);
            current = self.nodes[index].left;
        }
    }
}

impl<'a, K> Iterator for IterInorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let index = self.stack.pop()?;
        let node = &nodes[index];

        self.push_left_spine(node.right);

        Some(&node.key)
    }
}

impl<'a, K> FusedIterator for IterInorder<'a, K> {}
