use std::ptr;
use std::fmt;
use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

/// A single node of the binary search tree
///
/// This is a borrowed handle into the tree. It can be used to walk the tree in any direction,
/// including upwards through `parent`, but never to modify it.
pub struct Node<'a, K> {
    nodes: &'a Slab<InnerNode<K>>,
    index: usize,
}

impl<'a, K> Clone for Node<'a, K> {
    fn clone(&self) -> Self {
        Self {..*self}
    }
}

impl<'a, K> Copy for Node<'a, K> {}

impl<'a, K: fmt::Debug> fmt::Debug for Node<'a, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", self.key())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, K: PartialEq> PartialEq for Node<'a, K> {
    fn eq(&self, other: &Self) -> bool {
        // Keys are unique within a tree, so two nodes of the same tree are the same node exactly
        // when their keys are equal. Checking the index first skips the key comparison.
        let same_node = ptr::eq(self.nodes, other.nodes) && self.index == other.index;
        same_node || self.key().eq(other.key())
    }
}

impl<'a, K: Eq> Eq for Node<'a, K> {}

impl<'a, K> Node<'a, K> {
    /// Creates a new `Node`
    ///
    /// `index` must refer to an occupied entry of `nodes`.
    pub(super) fn new(nodes: &'a Slab<InnerNode<K>>, index: usize) -> Self {
        debug_assert!(nodes.get(index).is_some(), "bug: node handle to a vacant slot");
        Self {nodes, index}
    }

    fn at(&self, ptr: Ptr) -> Option<Self> {
        ptr.into_index().map(|index| Self::new(self.nodes, index))
    }

    fn inner(&self) -> &'a InnerNode<K> {
        let nodes: &'a Slab<InnerNode<K>> = self.nodes;
        &nodes[self.index]
    }

    /// The slot this node occupies in the tree's storage
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    /// Returns the key of this node
    pub fn key(&self) -> &'a K {
        &self.inner().key
    }

    /// Returns true if this node has a left subtree
    pub fn has_left(&self) -> bool {
        !self.inner().left.is_null()
    }

    /// Returns true if this node has a right subtree
    pub fn has_right(&self) -> bool {
        !self.inner().right.is_null()
    }

    /// Returns true if this node has no parent
    pub fn is_root(&self) -> bool {
        self.inner().parent.is_null()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<Self> {
        self.at(self.inner().left)
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<Self> {
        self.at(self.inner().right)
    }

    /// Returns the node this node is a child of, or `None` for the root
    pub fn parent(&self) -> Option<Self> {
        self.at(self.inner().parent)
    }

    /// Returns the node with the smallest key in this subtree
    ///
    /// Time complexity: `O(h)`
    pub fn minimum(self) -> Self {
        let mut current = self;
        while let Some(left) = current.left() {
            current = left;
        }
        current
    }

    /// Returns the node with the largest key in this subtree
    ///
    /// Time complexity: `O(h)`
    pub fn maximum(self) -> Self {
        let mut current = self;
        while let Some(right) = current.right() {
            current = right;
        }
        current
    }

    /// Returns the node with the next larger key in the whole tree, or `None` if this node holds
    /// the largest key
    ///
    /// Time complexity: `O(h)`
    pub fn successor(&self) -> Option<Self> {
        if let Some(right) = self.right() {
            return Some(right.minimum());
        }

        // The successor is the first ancestor whose left subtree we are climbing out of
        let mut current = *self;
        while let Some(parent) = current.parent() {
            if parent.inner().left == Ptr::from(current.index) {
                return Some(parent);
            }
            current = parent;
        }

        None
    }

    /// Returns the node with the next smaller key in the whole tree, or `None` if this node holds
    /// the smallest key
    ///
    /// Time complexity: `O(h)`
    pub fn predecessor(&self) -> Option<Self> {
        if let Some(left) = self.left() {
            return Some(left.maximum());
        }

        let mut current = *self;
        while let Some(parent) = current.parent() {
            if parent.inner().right == Ptr::from(current.index) {
                return Some(parent);
            }
            current = parent;
        }

        None
    }

    /// Recursively searches this subtree for the given key
    ///
    /// Time complexity: `O(h)`, with recursion depth up to `h`
    pub fn search<Q>(self, key: &Q) -> Option<Self>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        match key.cmp(self.key().borrow()) {
            Ordering::Less => self.left()?.search(key),
            Ordering::Greater => self.right()?.search(key),
            Ordering::Equal => Some(self),
        }
    }

    /// Visits every node of this subtree: left subtree, this node, right subtree
    ///
    /// Nodes are visited in ascending key order.
    pub fn walk_inorder<F>(self, mut visit: F)
        where F: FnMut(Node<'a, K>),
    {
        self.inorder_with(&mut visit);
    }

    /// Visits every node of this subtree: this node, left subtree, right subtree
    pub fn walk_preorder<F>(self, mut visit: F)
        where F: FnMut(Node<'a, K>),
    {
        self.preorder_with(&mut visit);
    }

    /// Visits every node of this subtree: left subtree, right subtree, this node
    pub fn walk_postorder<F>(self, mut visit: F)
        where F: FnMut(Node<'a, K>),
    {
        self.postorder_with(&mut visit);
    }

    fn inorder_with<F: FnMut(Node<'a, K>)>(self, visit: &mut F) {
        if let Some(left) = self.left() {
            left.inorder_with(visit);
        }
        visit(self);
        if let Some(right) = self.right() {
            right.inorder_with(visit);
        }
    }

    fn preorder_with<F: FnMut(Node<'a, K>)>(self, visit: &mut F) {
        visit(self);
        if let Some(left) = self.left() {
            left.preorder_with(visit);
        }
        if let Some(right) = self.right() {
            right.preorder_with(visit);
        }
    }

    fn postorder_with<F: FnMut(Node<'a, K>)>(self, visit: &mut F) {
        if let Some(left) = self.left() {
            left.postorder_with(visit);
        }
        if let Some(right) = self.right() {
            right.postorder_with(visit);
        }
        visit(self);
    }
}
