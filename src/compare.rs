//! Key ordering.
//!
//! A tree orders its keys through a [`Comparator`] chosen at construction. The default,
//! [`Natural`], defers to [`Ord`]; any `Fn(&K, &K) -> Ordering` closure works as well, which
//! makes reversed or projected orderings a one-liner:
//!
//! ```
//! use balanced_bst::AvlTree;
//!
//! let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
//! tree.set(1, "one");
//! tree.set(2, "two");
//! tree.set(3, "three");
//!
//! let keys: Vec<_> = tree.keys().copied().collect();
//! assert_eq!(keys, [3, 2, 1]);
//! ```

use core::cmp::Ordering;

/// A total order over keys of type `K`.
///
/// Implementations must be consistent: `compare(a, b)` and `compare(b, a)` are opposite, and
/// the relation is transitive. A comparator that violates this leaves the tree's contents
/// unreachable through lookups, although no memory unsafety can result.
pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
