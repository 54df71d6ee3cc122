use alloc::vec::Vec;

use super::handle::NodeId;

/// Slot storage for tree nodes.
///
/// Freed slots are recycled before the slot vector grows, so a tree that churns through
/// inserts and removals keeps a footprint proportional to its peak size.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<NodeId>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.to_index()] = Some(element);
            id
        } else {
            assert!(
                self.slots.len() <= NodeId::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                NodeId::MAX
            );
            self.slots.push(Some(element));
            NodeId::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &T {
        self.slots[id.to_index()].as_ref().expect("`Arena::get()` - `id` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut T {
        self.slots[id.to_index()].as_mut().expect("`Arena::get_mut()` - `id` is invalid!")
    }

    pub(crate) fn take(&mut self, id: NodeId) -> T {
        let element = self.slots[id.to_index()].take().expect("`Arena::take()` - `id` is invalid!");
        self.free.push(id);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
