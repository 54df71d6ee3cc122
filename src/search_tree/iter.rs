use alloc::vec::{self, Vec};
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Bound, RangeBounds};

use crate::balance::{Balance, Unbalanced};
use crate::compare::{Comparator, Natural};
use crate::raw::{RawTree, Walk};

/// An iterator over the entries of a [`SearchTree`](super::SearchTree).
///
/// This `struct` is created by the [`iter`] and [`iter_ordered`] methods on `SearchTree`. Its
/// traversal stack lives on the iterator; the tree itself is only borrowed.
///
/// [`iter`]: super::SearchTree::iter
/// [`iter_ordered`]: super::SearchTree::iter_ordered
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, B: Balance = Unbalanced, C = Natural> {
    tree: &'a RawTree<K, V, B, C>,
    walk: Walk,
    remaining: usize,
}

impl<'a, K, V, B: Balance, C> Iter<'a, K, V, B, C> {
    pub(super) fn new(tree: &'a RawTree<K, V, B, C>, walk: Walk) -> Self {
        Self {
            tree,
            walk,
            remaining: tree.len(),
        }
    }

    /// Restarts the traversal from the beginning.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let tree = AvlTree::from([(1, 'a'), (2, 'b')]);
    /// let mut iter = tree.keys();
    /// assert_eq!(iter.next(), Some(&1));
    /// iter.rewind();
    /// assert_eq!(iter.collect::<Vec<_>>(), [&1, &2]);
    /// ```
    pub fn rewind(&mut self) {
        self.walk.rewind();
        self.remaining = self.tree.len();
    }
}

impl<'a, K, V, B: Balance, C: Comparator<K>> Iterator for Iter<'a, K, V, B, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let tree = self.tree;
        let id = self.walk.next(tree.links(), tree.comparator(), Bound::Unbounded, Bound::Unbounded)?;
        self.remaining -= 1;
        Some(tree.key_value(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, B: Balance, C: Comparator<K>> ExactSizeIterator for Iter<'_, K, V, B, C> {}

impl<K, V, B: Balance, C: Comparator<K>> FusedIterator for Iter<'_, K, V, B, C> {}

impl<K, V, B: Balance, C> Clone for Iter<'_, K, V, B, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            walk: self.walk.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V, B: Balance, C> fmt::Debug for Iter<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish_non_exhaustive()
    }
}

/// An iterator over the keys of a [`SearchTree`](super::SearchTree).
///
/// This `struct` is created by the [`keys`] and [`keys_ordered`] methods on `SearchTree`.
///
/// [`keys`]: super::SearchTree::keys
/// [`keys_ordered`]: super::SearchTree::keys_ordered
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, B: Balance = Unbalanced, C = Natural> {
    inner: Iter<'a, K, V, B, C>,
}

impl<'a, K, V, B: Balance, C> Keys<'a, K, V, B, C> {
    pub(super) const fn new(inner: Iter<'a, K, V, B, C>) -> Self {
        Self { inner }
    }

    /// Restarts the traversal from the beginning.
    pub fn rewind(&mut self) {
        self.inner.rewind();
    }
}

impl<'a, K, V, B: Balance, C: Comparator<K>> Iterator for Keys<'a, K, V, B, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, B: Balance, C: Comparator<K>> ExactSizeIterator for Keys<'_, K, V, B, C> {}

impl<K, V, B: Balance, C: Comparator<K>> FusedIterator for Keys<'_, K, V, B, C> {}

impl<K, V, B: Balance, C> Clone for Keys<'_, K, V, B, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, B: Balance, C> fmt::Debug for Keys<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Keys").field(&self.inner).finish()
    }
}

/// An iterator over the values of a [`SearchTree`](super::SearchTree).
///
/// This `struct` is created by the [`values`] and [`values_ordered`] methods on `SearchTree`.
///
/// [`values`]: super::SearchTree::values
/// [`values_ordered`]: super::SearchTree::values_ordered
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, B: Balance = Unbalanced, C = Natural> {
    inner: Iter<'a, K, V, B, C>,
}

impl<'a, K, V, B: Balance, C> Values<'a, K, V, B, C> {
    pub(super) const fn new(inner: Iter<'a, K, V, B, C>) -> Self {
        Self { inner }
    }

    /// Restarts the traversal from the beginning.
    pub fn rewind(&mut self) {
        self.inner.rewind();
    }
}

impl<'a, K, V, B: Balance, C: Comparator<K>> Iterator for Values<'a, K, V, B, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, B: Balance, C: Comparator<K>> ExactSizeIterator for Values<'_, K, V, B, C> {}

impl<K, V, B: Balance, C: Comparator<K>> FusedIterator for Values<'_, K, V, B, C> {}

impl<K, V, B: Balance, C> Clone for Values<'_, K, V, B, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, B: Balance, C> fmt::Debug for Values<'_, K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Values").field(&self.inner).finish()
    }
}

/// An iterator over a sub-range of entries in a [`SearchTree`](super::SearchTree).
///
/// This `struct` is created by the [`range`], [`range_ordered`] and [`range_query`] methods on
/// `SearchTree`. Subtrees that lie wholly outside the bounds are never entered.
///
/// [`range`]: super::SearchTree::range
/// [`range_ordered`]: super::SearchTree::range_ordered
/// [`range_query`]: super::SearchTree::range_query
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K, V, R, B: Balance = Unbalanced, C = Natural> {
    tree: &'a RawTree<K, V, B, C>,
    walk: Walk,
    bounds: R,
}

impl<'a, K, V, R, B: Balance, C> Range<'a, K, V, R, B, C> {
    pub(super) const fn new(tree: &'a RawTree<K, V, B, C>, walk: Walk, bounds: R) -> Self {
        Self { tree, walk, bounds }
    }

    /// Restarts the traversal from the beginning of the range.
    pub fn rewind(&mut self) {
        self.walk.rewind();
    }
}

impl<'a, K, V, R, B, C> Iterator for Range<'a, K, V, R, B, C>
where
    R: RangeBounds<K>,
    B: Balance,
    C: Comparator<K>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let tree = self.tree;
        let id = self.walk.next(tree.links(), tree.comparator(), self.bounds.start_bound(), self.bounds.end_bound())?;
        Some(tree.key_value(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.walk.is_finished() {
            (0, Some(0))
        } else {
            (0, Some(self.tree.len()))
        }
    }
}

impl<K, V, R: RangeBounds<K>, B: Balance, C: Comparator<K>> FusedIterator for Range<'_, K, V, R, B, C> {}

impl<K, V, R: Clone, B: Balance, C> Clone for Range<'_, K, V, R, B, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            walk: self.walk.clone(),
            bounds: self.bounds.clone(),
        }
    }
}

impl<K, V, R, B: Balance, C> fmt::Debug for Range<'_, K, V, R, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Range").field("finished", &self.walk.is_finished()).finish_non_exhaustive()
    }
}

/// An owning iterator over the entries of a [`SearchTree`](super::SearchTree), sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on `SearchTree` (provided by the
/// [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(entries: Vec<(K, V)>) -> Self {
        Self {
            inner: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: Clone, V: Clone> Clone for IntoIter<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Default for IntoIter<K, V> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec::Vec;

    use crate::order::TraversalOrder;
    use crate::{AvlTree, SplayTree};

    #[test]
    fn exact_size_counts_down() {
        let tree: AvlTree<_, _> = (0..10).map(|k| (k, k)).collect();
        let mut iter = tree.iter_ordered(TraversalOrder::PostOrder, true);
        assert_eq!(iter.len(), 10);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 8);
        assert_eq!(iter.by_ref().count(), 8);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn clones_resume_independently() {
        let tree: SplayTree<_, _> = (0..6).map(|k| (k, ())).collect();
        let mut keys = tree.keys();
        keys.next();
        let copy = keys.clone();
        assert_eq!(keys.copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
        assert_eq!(copy.copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn range_rewinds() {
        let tree: AvlTree<_, _> = (0..20).map(|k| (k, k * 2)).collect();
        let mut range = tree.range(5..=8);
        assert_eq!(range.next(), Some((&5, &10)));
        range.rewind();
        assert_eq!(range.map(|(_, v)| *v).collect::<Vec<_>>(), [10, 12, 14, 16]);
    }

    #[test]
    fn values_follow_key_order() {
        let tree = AvlTree::from([(3, 'c'), (1, 'a'), (2, 'b')]);
        assert_eq!(tree.values().copied().collect::<Vec<_>>(), ['a', 'b', 'c']);
        let mut values = tree.values_ordered(TraversalOrder::InOrder, true);
        assert_eq!(values.next(), Some(&'c'));
        values.rewind();
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn into_iter_is_sorted() {
        let tree = SplayTree::from([(2, "b"), (3, "c"), (1, "a")]);
        let iter = tree.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.rev().collect::<Vec<_>>(), [(3, "c"), (2, "b"), (1, "a")]);
    }
}
