use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::NodeId;
use super::node::{Node, Position};
use super::path::AncestorPath;

/// The node graph of a tree: every node plus the root link.
///
/// This is the surface balancing strategies operate on. It exposes child links and per-node
/// metadata by [`NodeId`], the relinking helpers needed to splice a restructured subtree back
/// into its parent, and the rotation primitives. It never compares keys; ordering is the
/// engine's job, and a strategy only moves whole subtrees around in ways that preserve the
/// in-order sequence.
#[derive(Clone)]
pub struct Links<K, V, M> {
    nodes: Arena<Node<K, V, M>>,
    root: Option<NodeId>,
}

impl<K, V, M> Links<K, V, M> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V, M>) -> NodeId {
        self.nodes.alloc(node)
    }

    /// Releases a node that is no longer linked anywhere and returns its entry.
    pub(crate) fn free(&mut self, id: NodeId) -> (K, V) {
        let node = self.nodes.take(id);
        (node.key, node.value)
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V, M> {
        self.nodes.get(id)
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V, M> {
        self.nodes.get_mut(id)
    }

    /// The current root, if the tree is non-empty.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    #[inline]
    #[must_use]
    pub fn key(&self, id: NodeId) -> &K {
        &self.node(id).key
    }

    #[inline]
    #[must_use]
    pub fn value(&self, id: NodeId) -> &V {
        &self.node(id).value
    }

    #[inline]
    pub fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.node_mut(id).value
    }

    #[inline]
    #[must_use]
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    #[inline]
    #[must_use]
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    #[inline]
    pub fn set_left(&mut self, id: NodeId, child: Option<NodeId>) {
        self.node_mut(id).left = child;
    }

    #[inline]
    pub fn set_right(&mut self, id: NodeId, child: Option<NodeId>) {
        self.node_mut(id).right = child;
    }

    #[inline]
    #[must_use]
    pub fn meta(&self, id: NodeId) -> &M {
        &self.node(id).meta
    }

    #[inline]
    pub fn meta_mut(&mut self, id: NodeId) -> &mut M {
        &mut self.node_mut(id).meta
    }

    /// Stores `child` in the slot described by `parent` and `position`.
    ///
    /// A `Root` position (or a missing parent) replaces the root link.
    pub fn replace_child(&mut self, parent: Option<NodeId>, position: Position, child: Option<NodeId>) {
        match (parent, position) {
            (Some(parent), Position::Left) => self.set_left(parent, child),
            (Some(parent), Position::Right) => self.set_right(parent, child),
            (None, _) | (_, Position::Root) => {
                debug_assert!(parent.is_none() && position == Position::Root, "root slot mismatch");
                self.root = child;
            }
        }
    }

    /// Links `node` into the slot that `path[depth]` occupied when the path was recorded.
    pub fn relink(&mut self, path: &AncestorPath, depth: usize, node: NodeId) {
        self.replace_child(path.parent(depth), path[depth].position, Some(node));
    }

    /// The leftmost (minimum) node of the subtree rooted at `id`.
    #[must_use]
    pub fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.left(id) {
            id = left;
        }
        id
    }

    /// The rightmost (maximum) node of the subtree rooted at `id`.
    #[must_use]
    pub fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.right(id) {
            id = right;
        }
        id
    }

    /// Collects the subtree rooted at `id` in in-order sequence.
    #[must_use]
    pub fn flatten(&self, id: NodeId) -> Vec<NodeId> {
        let mut sorted = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut current = Some(id);
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = self.left(node);
            }
            let Some(node) = stack.pop() else {
                break;
            };
            sorted.push(node);
            current = self.right(node);
        }
        sorted
    }

    /// Links `sorted` into a minimum-height subtree and returns its root.
    ///
    /// The median of every slice becomes the local root. `refresh` runs on each node after both
    /// of its children are in place, so bottom-up metadata can be recomputed during the same
    /// pass. Any previous child links of the nodes in `sorted` are overwritten.
    pub fn build_balanced<F>(&mut self, sorted: &[NodeId], refresh: &mut F) -> Option<NodeId>
    where
        F: FnMut(&mut Self, NodeId),
    {
        if sorted.is_empty() {
            return None;
        }

        let mid = sorted.len() / 2;
        let node = sorted[mid];
        let left = self.build_balanced(&sorted[..mid], refresh);
        let right = self.build_balanced(&sorted[mid + 1..], refresh);

        let slot = self.node_mut(node);
        slot.left = left;
        slot.right = right;
        refresh(self, node);

        Some(node)
    }
}
