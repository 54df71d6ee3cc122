//! Balancing strategies.
//!
//! The tree engine performs plain binary-search-tree surgery and then hands the affected
//! ancestor path to a [`Balance`] implementation, which restores its own invariant with
//! rotations or subtree rebuilds. Four strategies ship with the crate:
//!
//! | Strategy | Metadata | Guarantee |
//! |----------|----------|-----------|
//! | [`Unbalanced`] | none | none; height follows insertion order |
//! | [`Avl`] | subtree height | worst-case `O(log n)` height |
//! | [`Scapegoat`] | subtree weight | amortized `O(log n)` via partial rebuilds |
//! | [`Splay`] | none | amortized `O(log n)`; recently used keys near the root |
//!
//! The hooks receive a [`Links`] view of the node graph and an [`AncestorPath`] recorded by the
//! engine's descent, so a strategy never needs parent pointers or key comparisons.

mod avl;
mod scapegoat;
mod splay;

use core::fmt::Debug;

pub use crate::raw::{AncestorPath, Links, NodeId, PathEntry, Position};
pub use avl::{Avl, Height};
pub use scapegoat::{Scapegoat, Weight};
pub use splay::Splay;

/// Rebalancing hooks invoked by the tree engine after structural changes.
///
/// Every hook must preserve the in-order sequence of the tree and must leave each node linked
/// from exactly one slot. Entries of the path below a restructured node may be stale afterwards;
/// the engine never reuses a path once a hook has run.
pub trait Balance {
    /// Per-node bookkeeping. `Default` is the value for a freshly created leaf.
    type Meta: Copy + Default + Debug;

    /// Recomputes the metadata of `node` from its children.
    ///
    /// Called bottom-up during bulk construction, after both children of `node` are final.
    fn refresh<K, V>(&self, links: &mut Links<K, V, Self::Meta>, node: NodeId) {
        let _ = (links, node);
    }

    /// Runs after a new leaf was linked in. The last path entry is the new leaf.
    fn after_insert<K, V>(&self, links: &mut Links<K, V, Self::Meta>, path: &mut AncestorPath);

    /// Runs after a node was unlinked.
    ///
    /// `path[..slot]` are the removed node's ancestors, unchanged. If `path.len() > slot`, then
    /// `path[slot]` is the node that took over the removed node's slot, and any later entries are
    /// the former ancestors of the in-order predecessor that was moved there, down to the node
    /// whose child link changed.
    fn after_remove<K, V>(&self, links: &mut Links<K, V, Self::Meta>, path: &mut AncestorPath, slot: usize);

    /// Runs after a successful lookup or an in-place value update. The last path entry is the
    /// node that was accessed.
    fn after_access<K, V>(&self, links: &mut Links<K, V, Self::Meta>, path: &mut AncestorPath) {
        let _ = (links, path);
    }
}

/// A plain binary search tree. Every hook is a no-op.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Unbalanced;

impl Balance for Unbalanced {
    type Meta = ();

    fn after_insert<K, V>(&self, _links: &mut Links<K, V, ()>, _path: &mut AncestorPath) {}

    fn after_remove<K, V>(&self, _links: &mut Links<K, V, ()>, _path: &mut AncestorPath, _slot: usize) {}
}
