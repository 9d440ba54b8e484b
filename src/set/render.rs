use std::fmt;

use super::Node;

/// The number of spaces each level of the tree is indented by, unless configured otherwise
pub const DEFAULT_INDENT: usize = 2;

/// An indented dump of a tree, one node per line
///
/// Every node is written as its key, preceded by `l: ` or `r: ` if it is the left or right child of
/// the node above it. Children are indented one level deeper than their parent and the left child
/// is written before the right child:
///
/// ```text
/// 5
///   l: 3
///     r: 4
///   r: 8
/// ```
///
/// There is no trailing newline, and an empty tree renders as nothing.
pub struct Render<'a, K> {
    root: Option<Node<'a, K>>,
    indent: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl<'a, K> Render<'a, K> {
    pub(super) fn new(root: Option<Node<'a, K>>, indent: usize) -> Self {
        Self {root, indent}
    }
}

impl<'a, K: fmt::Display> fmt::Display for Render<'a, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Iterative: a list-shaped tree is as deep as it is long
        let mut stack: Vec<_> = self.root.map(|root| (root, 0, None)).into_iter().collect();
        let mut first = true;
        while let Some((node, depth, side)) = stack.pop() {
            if !first {
                f.write_str("\n")?;
            }
            first = false;
            write_line(f, node, depth * self.indent, side)?;

            // Right goes on first so that the left subtree is written before it
            stack.extend(node.right().map(|right| (right, depth + 1, Some(Side::Right))));
            stack.extend(node.left().map(|left| (left, depth + 1, Some(Side::Left))));
        }

        Ok(())
    }
}

fn write_line<K: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    node: Node<'_, K>,
    width: usize,
    side: Option<Side>,
) -> fmt::Result {
    write!(f, "{:width$}", "", width = width)?;
    match side {
        Some(Side::Left) => f.write_str("l: ")?,
        Some(Side::Right) => f.write_str("r: ")?,
        None => {},
    }
    write!(f, "{}", node.key())
}
