use core::num::NonZero;

type RawId = u32;

/// A stable handle to a node owned by a tree.
///
/// Handles survive rotations and subtree rebuilds: restructuring moves handles between child
/// slots but never reallocates the node they refer to. A handle is only meaningful for the tree
/// that produced it, and only until that node is removed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(NonZero<RawId>);

impl NodeId {
    pub(crate) const MAX: usize = (RawId::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`NodeId::from_index()` - `index` > `NodeId::MAX`!");
        // `index + 1` cannot be zero and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new((index + 1) as RawId).unwrap())
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Child links are stored as `Option<NodeId>`; the niche keeps them pointer-free and small.
    assert_eq_size!(NodeId, Option<NodeId>);
    assert_eq_size!(NodeId, RawId);

    #[test]
    #[should_panic(expected = "`NodeId::from_index()` - `index` > `NodeId::MAX`!")]
    fn index_past_max_panics() {
        let _ = NodeId::from_index(NodeId::MAX + 1);
    }

    #[test]
    fn first_and_last_index() {
        assert_eq!(NodeId::from_index(0).to_index(), 0);
        assert_eq!(NodeId::from_index(NodeId::MAX).to_index(), NodeId::MAX);
    }

    proptest! {
        #[test]
        fn index_survives_conversion(index in 0..=NodeId::MAX) {
            prop_assert_eq!(NodeId::from_index(index).to_index(), index);
        }
    }
}
