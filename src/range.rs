use core::fmt;
use core::ops::{Bound, BitOr, BitOrAssign};

/// Bound handling for [`SearchTree::range_query`](crate::SearchTree::range_query).
///
/// Flags combine with `|`. A side whose `NO_*_BOUND` flag is set ignores its key (and its
/// `INCLUDE_*` flag) entirely.
///
/// ```
/// use balanced_bst::{RangeFlags, SearchTree, TraversalOrder};
///
/// let tree: SearchTree<i32, ()> = (1..=7).map(|k| (k, ())).collect();
///
/// let flags = RangeFlags::INCLUDE_LEFT | RangeFlags::NO_RIGHT_BOUND;
/// let keys: Vec<_> = tree.range_query(&4, &0, flags, TraversalOrder::InOrder, false).map(|(k, _)| *k).collect();
/// assert_eq!(keys, [4, 5, 6, 7]);
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct RangeFlags(u8);

impl RangeFlags {
    /// Both bounds present and exclusive.
    pub const NONE: Self = Self(0);
    pub const INCLUDE_LEFT: Self = Self(1);
    pub const INCLUDE_RIGHT: Self = Self(1 << 1);
    pub const NO_LEFT_BOUND: Self = Self(1 << 2);
    pub const NO_RIGHT_BOUND: Self = Self(1 << 3);
    /// Both bounds present and inclusive.
    pub const INCLUSIVE: Self = Self(Self::INCLUDE_LEFT.0 | Self::INCLUDE_RIGHT.0);

    /// Returns `true` if every flag in `other` is also set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Resolves the flags against concrete bound keys.
    #[must_use]
    pub fn bounds<'k, K: ?Sized>(self, left: &'k K, right: &'k K) -> (Bound<&'k K>, Bound<&'k K>) {
        let side = |key, unbounded, include| {
            if self.contains(unbounded) {
                Bound::Unbounded
            } else if self.contains(include) {
                Bound::Included(key)
            } else {
                Bound::Excluded(key)
            }
        };

        (
            side(left, Self::NO_LEFT_BOUND, Self::INCLUDE_LEFT),
            side(right, Self::NO_RIGHT_BOUND, Self::INCLUDE_RIGHT),
        )
    }
}

impl Default for RangeFlags {
    fn default() -> Self {
        Self::INCLUSIVE
    }
}

impl BitOr for RangeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for RangeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for RangeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(RangeFlags, &str); 4] = [
            (RangeFlags::INCLUDE_LEFT, "INCLUDE_LEFT"),
            (RangeFlags::INCLUDE_RIGHT, "INCLUDE_RIGHT"),
            (RangeFlags::NO_LEFT_BOUND, "NO_LEFT_BOUND"),
            (RangeFlags::NO_RIGHT_BOUND, "NO_RIGHT_BOUND"),
        ];

        let mut set = f.debug_set();
        for (flag, name) in NAMES {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}
