use core::ops::Deref;

use smallvec::SmallVec;

use super::handle::NodeId;
use super::node::Position;

// Depth of a balanced tree with a few billion nodes; deeper paths spill to the heap.
const INLINE_DEPTH: usize = 32;

/// One step of a root-to-target descent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PathEntry {
    /// How `node` hangs off the previous entry.
    pub position: Position,
    /// The node visited at this depth.
    pub node: NodeId,
}

impl PathEntry {
    #[inline]
    #[must_use]
    pub const fn new(position: Position, node: NodeId) -> Self {
        Self { position, node }
    }
}

/// The ancestor path recorded by a single descent from the root.
///
/// Entry `0` is always the root (position [`Position::Root`]) and every later entry is a child
/// of the entry before it. Balancing strategies walk the path upward instead of following parent
/// pointers, which nodes do not have. A path is only valid for the structural state it was
/// recorded in; once a strategy restructures the tree, entries below the restructured depth are
/// stale.
#[derive(Clone, Debug, Default)]
pub struct AncestorPath {
    entries: SmallVec<[PathEntry; INLINE_DEPTH]>,
}

impl AncestorPath {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, entry: PathEntry) {
        self.entries.push(entry);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<PathEntry> {
        self.entries.pop()
    }

    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Replaces the node recorded at `depth`, keeping its position.
    pub fn replace_node(&mut self, depth: usize, node: NodeId) {
        self.entries[depth].node = node;
    }

    /// Returns the node directly above `depth`, or `None` for the root entry.
    #[must_use]
    pub fn parent(&self, depth: usize) -> Option<NodeId> {
        depth.checked_sub(1).map(|above| self.entries[above].node)
    }
}

impl Deref for AncestorPath {
    type Target = [PathEntry];

    #[inline]
    fn deref(&self) -> &[PathEntry] {
        &self.entries
    }
}
