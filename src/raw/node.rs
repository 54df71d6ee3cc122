use super::handle::NodeId;

/// Where a node hangs relative to the node above it on a descent.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Position {
    /// The node is the tree's root.
    Root,
    /// The node is the left child of the previous path entry.
    Left,
    /// The node is the right child of the previous path entry.
    Right,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Position::Left)
    }

    #[inline]
    #[must_use]
    pub const fn is_right(self) -> bool {
        matches!(self, Position::Right)
    }
}

// A single binary tree node. Children are uniquely owned by this node through the arena.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V, M> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    // Strategy-specific bookkeeping: subtree height, subtree weight, or nothing.
    pub(crate) meta: M,
}

impl<K, V, M: Default> Node<K, V, M> {
    /// Creates a detached leaf carrying fresh-leaf metadata.
    pub(crate) fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            meta: M::default(),
        }
    }
}
