//! Local rotations.
//!
//! Each primitive rearranges at most three nodes, preserves the in-order sequence, and returns
//! the new root of the rotated subtree. The caller is responsible for linking that root back
//! into the slot the old root occupied and for refreshing any per-node metadata.

use super::handle::NodeId;
use super::links::Links;

impl<K, V, M> Links<K, V, M> {
    /// ```text
    ///     n                p
    ///    / \              / \
    ///   a   p     =>     n   c
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    pub fn rotate_left(&mut self, node: NodeId) -> NodeId {
        let pivot = self.right(node).expect("`Links::rotate_left()` - `node` has no right child!");
        self.set_right(node, self.left(pivot));
        self.set_left(pivot, Some(node));
        pivot
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left).
    pub fn rotate_right(&mut self, node: NodeId) -> NodeId {
        let pivot = self.left(node).expect("`Links::rotate_right()` - `node` has no left child!");
        self.set_left(node, self.right(pivot));
        self.set_right(pivot, Some(node));
        pivot
    }

    /// Zig-zag where the grandchild hangs left-then-right: rotates the left child left, then the
    /// node right. The grandchild ends up on top.
    pub fn rotate_left_right(&mut self, node: NodeId) -> NodeId {
        let left = self.left(node).expect("`Links::rotate_left_right()` - `node` has no left child!");
        let left = self.rotate_left(left);
        self.set_left(node, Some(left));
        self.rotate_right(node)
    }

    /// Zig-zag where the grandchild hangs right-then-left.
    pub fn rotate_right_left(&mut self, node: NodeId) -> NodeId {
        let right = self.right(node).expect("`Links::rotate_right_left()` - `node` has no right child!");
        let right = self.rotate_right(right);
        self.set_right(node, Some(right));
        self.rotate_left(node)
    }

    /// Zig-zig on a right-right chain: two left rotations, top first, lifting the grandchild.
    pub fn rotate_left_left(&mut self, node: NodeId) -> NodeId {
        let pivot = self.rotate_left(node);
        self.rotate_left(pivot)
    }

    /// Zig-zig on a left-left chain.
    pub fn rotate_right_right(&mut self, node: NodeId) -> NodeId {
        let pivot = self.rotate_right(node);
        self.rotate_right(pivot)
    }
}
