mod node;
mod preorder;
mod inorder;
mod postorder;
mod render;
mod validate;

pub use node::*;
pub use preorder::*;
pub use inorder::*;
pub use postorder::*;
pub use render::*;
pub use validate::*;

use std::fmt;
use std::iter;
use std::mem;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::iter::FromIterator;

use log::trace;

use crate::slab::{Ptr, Slab};

#[derive(Debug, Clone, PartialEq, Eq)]
struct InnerNode<K> {
    key: K,
    left: Ptr,
    right: Ptr,
    /// Never owns anything, only used to walk back up the tree
    parent: Ptr,
}

impl<K> InnerNode<K> {
    fn new(key: K, parent: Ptr) -> Self {
        Self {
            key,
            left: Ptr::null(),
            right: Ptr::null(),
            parent,
        }
    }
}

/// A binary search tree (BST) where every node also links back to its parent
///
/// BST properties: For each node with key `k`:
/// - The key of each node in the left subtree is less than `k`
/// - The key of each node in the right subtree is greater than `k`
///
/// Duplicate keys are not allowed. Inserting a key that already exists in the set does not modify
/// the set.
///
/// The tree is not balanced. Its shape depends entirely on the order of insertions and removals,
/// so most operations are `O(h)` where `h` is the height of the tree, which can be as large as
/// `n` (e.g. when keys are inserted in increasing order).
#[derive(Clone)]
pub struct BSTSet<K> {
    nodes: Slab<InnerNode<K>>,
    root: Ptr,
}

impl<K> Default for BSTSet<K> {
    fn default() -> Self {
        Self {
            nodes: Default::default(),
            root: Ptr::null(),
        }
    }
}

impl<K> Drop for BSTSet<K> {
    fn drop(&mut self) {
        // Fast path: ignore if `K` does not need to be dropped
        if !mem::needs_drop::<K>() {
            return;
        }

        self.clear();
    }
}

impl<K: fmt::Debug> fmt::Debug for BSTSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BSTSet")
            .field("root", &self.root())
            .finish()
    }
}

impl<K: fmt::Display> fmt::Display for BSTSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Render::new(self.root(), DEFAULT_INDENT), f)
    }
}

impl<K: PartialEq> PartialEq for BSTSet<K> {
    fn eq(&self, other: &Self) -> bool {
        // Two sets with the same keys may be shaped differently depending on insertion order. The
        // in-order traversal is always sorted, so compare that instead of the structure.
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for BSTSet<K> {}

impl<K> BSTSet<K> {
    /// Creates an empty `BSTSet`
    ///
    /// The set is initially created with a capacity of 0, so it will not allocate until it is first
    /// inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BSTSet;
    /// let mut set: BSTSet<i32> = BSTSet::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with the specified capacity.
    ///
    /// The set will be able to hold at least `capacity` keys without reallocating. If `capacity` is
    /// 0, the set will not allocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: Ptr::null(),
        }
    }

    /// Returns the number of keys in the set (i.e. the number of nodes in the tree)
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the set is empty
    ///
    /// Time complexity: `O(1)`
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.nodes.is_empty(), self.root.is_null());
        self.nodes.is_empty()
    }

    /// Returns the number of keys the set can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Reserves capacity for at least `additional` more keys
    ///
    /// # Panics
    ///
    /// Panics if the new allocation size overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional)
    }

    /// Shrinks the capacity of the set as much as possible without moving any node
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit()
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// This is a low-level API meant to be used for implementing traversals. Nodes can be used to
    /// navigate the tree in every direction, including to a node's parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BSTSet;
    ///
    /// let mut set = BSTSet::new();
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// let root = set.root().unwrap();
    /// assert_eq!(root.key(), &2);
    /// assert_eq!(root.left().map(|node| *node.key()), Some(1));
    /// assert_eq!(root.left().and_then(|node| node.parent()), Some(root));
    /// ```
    pub fn root(&self) -> Option<Node<K>> {
        self.node(self.root)
    }

    fn node(&self, ptr: Ptr) -> Option<Node<K>> {
        ptr.into_index().map(|index| Node::new(&self.nodes, index))
    }

    /// Returns the node with the smallest key, or `None` if the set is empty
    ///
    /// Time complexity: `O(h)`
    pub fn first(&self) -> Option<Node<K>> {
        self.root().map(Node::minimum)
    }

    /// Returns the node with the largest key, or `None` if the set is empty
    ///
    /// Time complexity: `O(h)`
    pub fn last(&self) -> Option<Node<K>> {
        self.root().map(Node::maximum)
    }

    /// Returns the number of nodes on the longest path from the root to a leaf, or 0 if the set is
    /// empty
    ///
    /// Time complexity: `O(n)`
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root.into_index().map(|root| (root, 1)).into_iter().collect();
        while let Some((index, depth)) = stack.pop() {
            height = height.max(depth);

            let node = &self.nodes[index];
            stack.extend(node.left.into_index().map(|left| (left, depth + 1)));
            stack.extend(node.right.into_index().map(|right| (right, depth + 1)));
        }

        height
    }

    /// Visits every node in ascending key order, recursing through the tree
    ///
    /// Use `iter_inorder` for a traversal that does not recurse.
    pub fn walk_inorder<'a, F>(&'a self, visit: F)
        where F: FnMut(Node<'a, K>),
    {
        if let Some(root) = self.root() {
            root.walk_inorder(visit);
        }
    }

    /// Visits every node before its subtrees, recursing through the tree
    pub fn walk_preorder<'a, F>(&'a self, visit: F)
        where F: FnMut(Node<'a, K>),
    {
        if let Some(root) = self.root() {
            root.walk_preorder(visit);
        }
    }

    /// Visits every node after its subtrees, recursing through the tree
    pub fn walk_postorder<'a, F>(&'a self, visit: F)
        where F: FnMut(Node<'a, K>),
    {
        if let Some(root) = self.root() {
            root.walk_postorder(visit);
        }
    }

    /// Performs a pre-order traversal of the tree
    pub fn iter_preorder(&self) -> IterPreorder<K> {
        IterPreorder::new(&self.nodes, self.root)
    }

    /// Performs an in-order traversal of the tree, yielding keys in ascending order
    pub fn iter_inorder(&self) -> IterInorder<K> {
        IterInorder::new(&self.nodes, self.root)
    }

    /// Performs a post-order traversal of the tree
    pub fn iter_postorder(&self) -> IterPostorder<K> {
        IterPostorder::new(&self.nodes, self.root)
    }

    /// Returns the keys in ascending order. Same as `iter_inorder`.
    pub fn iter(&self) -> IterInorder<K> {
        self.iter_inorder()
    }

    /// Renders the tree with one node per line. See `Render` for the format.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BSTSet;
    ///
    /// let set: BSTSet<_> = vec![5, 3, 8, 4].into_iter().collect();
    /// assert_eq!(set.render(), "5\n  l: 3\n    r: 4\n  r: 8");
    /// assert_eq!(BSTSet::<i32>::new().render(), "");
    /// ```
    pub fn render(&self) -> String
        where K: fmt::Display,
    {
        self.render_with_indent(DEFAULT_INDENT)
    }

    /// Renders the tree, indenting each level by `indent` spaces
    pub fn render_with_indent(&self, indent: usize) -> String
        where K: fmt::Display,
    {
        self.display(indent).to_string()
    }

    /// Returns a value that formats the tree with `indent` spaces per level
    pub fn display(&self, indent: usize) -> Render<K> {
        Render::new(self.root(), indent)
    }

    /// Clears the set, removing all keys
    ///
    /// Nodes are released in post-order, so every node is released after all of its children.
    /// Note that this method has no effect on the allocated capacity of the set.
    pub fn clear(&mut self) {
        let mut postorder = IterPostorder::new(&self.nodes, self.root);
        let order: Vec<_> = iter::from_fn(|| postorder.next_index()).collect();
        self.root = Ptr::null();

        for index in order {
            self.nodes.remove(index);
        }

        // Resets the free list as well
        self.nodes.clear();
    }

    /// Sets the parent link of `child`, if there is one
    fn set_parent(&mut self, child: Ptr, parent: Ptr) {
        if let Some(child) = child.into_index() {
            self.nodes[child].parent = parent;
        }
    }

    /// Puts the subtree rooted at `with` in the place of the node at `target`
    ///
    /// Only the link from `target`'s parent (or the root) and the parent link of `with` are
    /// updated. The children of `target` are left as they were and must be fixed up or discarded
    /// by the caller.
    fn replant(&mut self, target: usize, with: Ptr) {
        let parent = self.nodes[target].parent;
        match parent.into_index() {
            None => self.root = with,
            Some(parent) => {
                let parent_node = &mut self.nodes[parent];
                if parent_node.left == Ptr::from(target) {
                    parent_node.left = with;
                } else {
                    debug_assert_eq!(parent_node.right, Ptr::from(target));
                    parent_node.right = with;
                }
            },
        }

        self.set_parent(with, parent);
    }

    /// Removes the node at `index` from the tree and returns its key
    fn remove_at(&mut self, index: usize) -> K {
        let left = self.nodes[index].left;
        let right = self.nodes[index].right;

        if right.is_null() {
            trace!("removing node {} with no right child", index);
            self.replant(index, left);
        } else if left.is_null() {
            trace!("removing node {} with only a right child", index);
            self.replant(index, right);
        } else {
            // The successor is the minimum of the right subtree, so it has no left child
            let successor = match Node::new(&self.nodes, index).successor() {
                Some(successor) => successor.index(),
                None => unreachable!("bug: node with a right subtree must have a successor"),
            };
            trace!("removing node {} with two children, successor is {}", index, successor);
            debug_assert!(self.nodes[successor].left.is_null());

            if self.nodes[successor].parent != Ptr::from(index) {
                let successor_right = self.nodes[successor].right;
                self.replant(successor, successor_right);

                self.nodes[successor].right = right;
                self.set_parent(right, Ptr::from(successor));
            }

            self.replant(index, Ptr::from(successor));
            self.nodes[successor].left = left;
            self.set_parent(left, Ptr::from(successor));
        }

        match self.nodes.remove(index) {
            Some(node) => node.key,
            None => unreachable!("bug: removed node {} was already released", index),
        }
    }
}

impl<K: Ord> BSTSet<K> {
    /// Returns `true` if the set contains the specified key.
    ///
    /// The key may be any borrowed form of the set's key type, but the ordering on the borrowed
    /// form must match the ordering on the key type.
    ///
    /// Time complexity: `O(h)`
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BSTSet;
    ///
    /// let mut set = BSTSet::new();
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&2));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Returns a reference to the key in the set, if any, that is equal to the given key
    ///
    /// Time complexity: `O(h)`
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.search(key).map(|node| node.key())
    }

    /// Finds the node holding the given key without recursing
    ///
    /// Time complexity: `O(h)`
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BSTSet;
    ///
    /// let set: BSTSet<_> = vec![5, 3, 8].into_iter().collect();
    /// let node = set.search(&3).unwrap();
    /// assert_eq!(node.parent().map(|parent| *parent.key()), Some(5));
    /// assert!(set.search(&4).is_none());
    /// ```
    pub fn search<Q>(&self, key: &Q) -> Option<Node<K>>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let mut current = self.root();
        while let Some(node) = current {
            match key.cmp(node.key().borrow()) {
                Ordering::Less => current = node.left(),
                Ordering::Greater => current = node.right(),
                Ordering::Equal => return Some(node),
            }
        }

        None
    }

    /// Finds the node holding the given key by recursing down the tree
    ///
    /// Always finds the same node as `search`.
    ///
    /// Time complexity: `O(h)`, with recursion depth up to `h`
    pub fn search_recursive<Q>(&self, key: &Q) -> Option<Node<K>>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.root()?.search(key)
    }

    /// Inserts a new key into the set
    ///
    /// If the set did not have this key present, `true` is returned.
    ///
    /// If the set did have this key present, `false` is returned, and the set is not modified.
    ///
    /// Time complexity: `O(h)`
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BSTSet;
    ///
    /// let mut set = BSTSet::new();
    /// assert!(set.insert(37));
    /// assert!(!set.insert(37));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let mut parent = Ptr::null();
        let mut ordering = Ordering::Equal;
        let mut current = self.root;
        while let Some(index) = current.into_index() {
            let node = &self.nodes[index];
            parent = current;
            ordering = key.cmp(&node.key);
            current = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return false,
            };
        }

        let index = self.nodes.push(InnerNode::new(key, parent));
        match parent.into_index() {
            None => self.root = Ptr::from(index),
            Some(parent) if ordering == Ordering::Less => self.nodes[parent].left = Ptr::from(index),
            Some(parent) => self.nodes[parent].right = Ptr::from(index),
        }
        trace!("inserted node {} under {:?}", index, parent.into_index());

        true
    }

    /// Removes a key from the set. Returns whether the key was present in the set.
    ///
    /// The key may be any borrowed form of the set's key type, but the ordering on the borrowed
    /// form must match the ordering on the key type.
    ///
    /// Time complexity: `O(h)`
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BSTSet;
    ///
    /// let mut set = BSTSet::new();
    /// set.insert(String::from("abc"));
    /// assert!(set.remove("abc"));
    /// assert!(!set.remove("def"));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Removes and returns the key in the set, if any, that is equal to the given one.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::BSTSet;
    ///
    /// let mut set = BSTSet::new();
    /// set.insert(String::from("abc"));
    /// assert_eq!(set.take("abc"), Some(String::from("abc")));
    /// assert_eq!(set.take("abc"), None);
    /// ```
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
        where K: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let index = self.search(key)?.index();
        Some(self.remove_at(index))
    }
}

impl<K: Ord> Extend<K> for BSTSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for BSTSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, K> IntoIterator for &'a BSTSet<K> {
    type Item = &'a K;
    type IntoIter = IterInorder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_inorder()
    }
}
