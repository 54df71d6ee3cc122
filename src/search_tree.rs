use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Bound, Index, RangeBounds};

use crate::balance::{Avl, Balance, Scapegoat, Splay, Unbalanced};
use crate::compare::{Comparator, Natural};
use crate::error::{Error, Result};
use crate::order::TraversalOrder;
use crate::range::RangeFlags;
use crate::raw::{Inserted, RawTree, Target, Walk};

mod iter;

pub use iter::{IntoIter, Iter, Keys, Range, Values};

/// An ordered map based on a [binary search tree], generic over its balancing strategy.
///
/// Keys are ordered by a [`Comparator`], [`Natural`] (the key's [`Ord`]) unless another one is
/// supplied at construction. The strategy `B` decides how the tree keeps its shape; the aliases
/// [`BinarySearchTree`], [`AvlTree`], [`ScapegoatTree`] and [`SplayTree`] name the four that ship
/// with the crate, and all of them expose exactly the same operations.
///
/// Lookups that count as an *access* ([`get`], [`try_get`], [`get_mut`], the closest-key queries)
/// take `&mut self`, because a [`Splay`] tree restructures itself on every access. [`peek`],
/// [`contains_key`], [`min`], [`max`], indexing and iteration never change the tree and take
/// `&self`.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to any
/// other key changes while it is in the tree. The behavior resulting from such a logic error is
/// not specified, but will be encapsulated to the tree that observed it and not result in
/// undefined behavior.
///
/// # Examples
///
/// ```
/// use balanced_bst::AvlTree;
///
/// let mut planets = AvlTree::new();
/// planets.set("Mercury", 0.4);
/// planets.set("Venus", 0.7);
/// planets.set("Earth", 1.0);
/// planets.set("Mars", 1.5);
///
/// assert_eq!(planets.get(&"Earth"), Ok(&1.0));
/// assert_eq!(planets.len(), 4);
///
/// // Keys are kept in order.
/// let names: Vec<_> = planets.keys().copied().collect();
/// assert_eq!(names, ["Earth", "Mars", "Mercury", "Venus"]);
///
/// // Nearest-key lookups.
/// assert_eq!(planets.try_left_closest_key_value(&"Jupiter"), Some((&"Earth", &1.0)));
/// assert_eq!(planets.try_right_closest_key_value(&"Jupiter"), Some((&"Mars", &1.5)));
/// ```
///
/// A tree with a known list of items can be initialized from an array:
///
/// ```
/// use balanced_bst::SplayTree;
///
/// let tree = SplayTree::from([(3, "c"), (1, "a"), (2, "b")]);
/// assert_eq!(tree.min(), Ok((&1, &"a")));
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [`get`]: SearchTree::get
/// [`try_get`]: SearchTree::try_get
/// [`get_mut`]: SearchTree::get_mut
/// [`peek`]: SearchTree::peek
/// [`contains_key`]: SearchTree::contains_key
/// [`min`]: SearchTree::min
/// [`max`]: SearchTree::max
pub struct SearchTree<K, V, B: Balance = Unbalanced, C = Natural> {
    raw: RawTree<K, V, B, C>,
}

/// A search tree that never rebalances.
pub type BinarySearchTree<K, V, C = Natural> = SearchTree<K, V, Unbalanced, C>;

/// A height-balanced search tree. See [`Avl`].
pub type AvlTree<K, V, C = Natural> = SearchTree<K, V, Avl, C>;

/// A weight-balanced search tree. See [`Scapegoat`].
pub type ScapegoatTree<K, V, C = Natural> = SearchTree<K, V, Scapegoat, C>;

/// A self-adjusting search tree. See [`Splay`].
pub type SplayTree<K, V, C = Natural> = SearchTree<K, V, Splay, C>;

impl<K: Ord, V, B: Balance + Default> SearchTree<K, V, B, Natural> {
    /// Makes a new, empty tree ordered by [`Ord`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    ///
    /// // entries can now be inserted into the empty tree
    /// tree.set(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_balance(B::default(), Natural)
    }

    /// Builds a tree from entries in any order. If a key appears more than once, the last value
    /// wins.
    ///
    /// The entries are sorted once and linked into a minimum-height tree, which is cheaper than
    /// inserting them one by one.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let tree = AvlTree::from_pairs([(2, 'b'), (1, 'a'), (2, 'B')]);
    /// assert_eq!(tree.peek(&2), Some(&'B'));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn from_pairs<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_pairs_with_comparator(entries, Natural)
    }
}

impl<K, V, B: Balance + Default, C: Comparator<K>> SearchTree<K, V, B, C> {
    /// Makes a new, empty tree ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::ScapegoatTree;
    ///
    /// // Case-insensitive keys.
    /// let mut tree = ScapegoatTree::with_comparator(|a: &&str, b: &&str| {
    ///     a.to_lowercase().cmp(&b.to_lowercase())
    /// });
    /// tree.set("Apple", 1);
    /// tree.set("APPLE", 2);
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.peek(&"apple"), Some(&2));
    /// ```
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_balance(B::default(), cmp)
    }

    /// Builds a tree ordered by `cmp` from entries in any order. If a key appears more than once,
    /// the last value wins.
    pub fn from_pairs_with_comparator<I>(entries: I, cmp: C) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_pairs_with_balance(entries, B::default(), cmp)
    }
}

impl<K: Ord, V> SearchTree<K, V, Scapegoat, Natural> {
    /// Makes a new, empty scapegoat tree with rebuild threshold `alpha`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAlpha`] unless `0.5 <= alpha <= 1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{Error, ScapegoatTree};
    ///
    /// let tree = ScapegoatTree::<u8, u8>::with_alpha(0.6).unwrap();
    /// assert_eq!(tree.balance().alpha(), 0.6);
    ///
    /// assert_eq!(ScapegoatTree::<u8, u8>::with_alpha(2.0).unwrap_err(), Error::InvalidAlpha { alpha: 2.0 });
    /// ```
    pub fn with_alpha(alpha: f64) -> Result<Self> {
        Ok(Self::with_balance(Scapegoat::new(alpha)?, Natural))
    }

    /// Builds a scapegoat tree with rebuild threshold `alpha` from entries in any order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAlpha`] unless `0.5 <= alpha <= 1.0`.
    pub fn from_pairs_with_alpha<I>(entries: I, alpha: f64) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Ok(Self::from_pairs_with_balance(entries, Scapegoat::new(alpha)?, Natural))
    }
}

impl<K, V, C: Comparator<K>> SearchTree<K, V, Scapegoat, C> {
    /// Makes a new, empty scapegoat tree with rebuild threshold `alpha`, ordered by `cmp`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAlpha`] unless `0.5 <= alpha <= 1.0`.
    pub fn with_alpha_and_comparator(alpha: f64, cmp: C) -> Result<Self> {
        Ok(Self::with_balance(Scapegoat::new(alpha)?, cmp))
    }

    /// Builds a scapegoat tree with rebuild threshold `alpha`, ordered by `cmp`, from entries in
    /// any order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAlpha`] unless `0.5 <= alpha <= 1.0`.
    pub fn from_pairs_with_alpha_and_comparator<I>(entries: I, alpha: f64, cmp: C) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Ok(Self::from_pairs_with_balance(entries, Scapegoat::new(alpha)?, cmp))
    }
}

impl<K, V, B: Balance, C> SearchTree<K, V, B, C> {
    /// Makes a new, empty tree with an explicit strategy value and comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{Natural, Scapegoat, SearchTree};
    ///
    /// let strategy = Scapegoat::new(0.55)?;
    /// let mut tree = SearchTree::with_balance(strategy, Natural);
    /// tree.set(1, ());
    /// # Ok::<(), balanced_bst::Error>(())
    /// ```
    #[must_use]
    pub const fn with_balance(balance: B, cmp: C) -> Self {
        Self {
            raw: RawTree::new(balance, cmp),
        }
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let mut a = AvlTree::new();
    /// assert_eq!(a.len(), 0);
    /// a.set(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the tree, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// The comparator ordering this tree.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// The balancing strategy of this tree.
    #[must_use]
    pub const fn balance(&self) -> &B {
        self.raw.balance()
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{AvlTree, Error};
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.min(), Err(Error::Empty));
    /// tree.set(2, "b");
    /// tree.set(1, "a");
    /// assert_eq!(tree.min(), Ok((&1, &"a")));
    /// ```
    pub fn min(&self) -> Result<(&K, &V)> {
        self.raw.min().map(|id| self.raw.key_value(id)).ok_or(Error::Empty)
    }

    /// Returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn max(&self) -> Result<(&K, &V)> {
        self.raw.max().map(|id| self.raw.key_value(id)).ok_or(Error::Empty)
    }
}

impl<K, V, B: Balance, C: Comparator<K>> SearchTree<K, V, B, C> {
    /// Builds a tree with an explicit strategy value and comparator from entries in any order.
    /// If a key appears more than once, the first key is kept with the last value.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{Scapegoat, SearchTree};
    ///
    /// let descending = |a: &u32, b: &u32| b.cmp(a);
    /// let entries = [(1, 'a'), (3, 'c'), (2, 'b')];
    /// let tree = SearchTree::from_pairs_with_balance(entries, Scapegoat::new(0.6)?, descending);
    /// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// assert_eq!(tree.balance().alpha(), 0.6);
    /// # Ok::<(), balanced_bst::Error>(())
    /// ```
    pub fn from_pairs_with_balance<I>(entries: I, balance: B, cmp: C) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            raw: RawTree::from_unsorted(entries, balance, cmp),
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// On a [`SplayTree`] the found node is moved to the root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the key is absent.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{Error, SplayTree};
    ///
    /// let mut tree = SplayTree::new();
    /// tree.set(1, "a");
    /// assert_eq!(tree.get(&1), Ok(&"a"));
    /// assert_eq!(tree.get(&2), Err(Error::NotFound));
    /// ```
    pub fn get(&mut self, key: &K) -> Result<&V> {
        self.try_get(key).ok_or(Error::NotFound)
    }

    /// Returns a reference to the value corresponding to the key, or `None` if it is absent.
    ///
    /// On a [`SplayTree`] the found node is moved to the root.
    pub fn try_get(&mut self, key: &K) -> Option<&V> {
        let id = self.raw.access(key, Target::Exact)?;
        Some(self.raw.key_value(id).1)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.set(1, "a");
    /// if let Some(x) = tree.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(tree[&1], "b");
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.raw.access(key, Target::Exact)?;
        Some(self.raw.value_mut(id))
    }

    /// Looks up the value for `key` without restructuring the tree, even on a [`SplayTree`].
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::SplayTree;
    ///
    /// let tree = SplayTree::from([(1, "a")]);
    /// assert_eq!(tree.peek(&1), Some(&"a"));
    /// assert_eq!(tree.peek(&2), None);
    /// ```
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.raw.find(key).map(|id| self.raw.key_value(id).1)
    }

    /// Returns `true` if the tree contains a value for the specified key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.find(key).is_some()
    }

    /// Returns `true` if the tree maps `key` to a value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BinarySearchTree;
    ///
    /// let tree = BinarySearchTree::from([(1, "a")]);
    /// assert!(tree.contains(&1, &"a"));
    /// assert!(!tree.contains(&1, &"b"));
    /// ```
    #[must_use]
    pub fn contains(&self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.peek(key) == Some(value)
    }

    /// Inserts a key-value pair, overwriting the value if the key is already present.
    ///
    /// Returns the previous value, if any. The stored key is not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.set(37, "a"), None);
    /// assert_eq!(tree.set(37, "b"), Some("a"));
    /// assert_eq!(tree[&37], "b");
    /// ```
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.raw.insert(key, value, true) {
            Inserted::Replaced(previous) => Some(previous),
            Inserted::New | Inserted::Rejected => None,
        }
    }

    /// Inserts a key-value pair only if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`], leaving the tree unchanged, if the key is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{Error, ScapegoatTree};
    ///
    /// let mut tree = ScapegoatTree::new();
    /// assert_eq!(tree.add(1, "a"), Ok(()));
    /// assert_eq!(tree.add(1, "b"), Err(Error::DuplicateKey));
    /// assert_eq!(tree[&1], "a");
    /// ```
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        match self.raw.insert(key, value, false) {
            Inserted::New => Ok(()),
            Inserted::Replaced(_) | Inserted::Rejected => Err(Error::DuplicateKey),
        }
    }

    /// Removes a key from the tree, returning its value if it was present.
    ///
    /// On a [`SplayTree`] the parent of the removed node is moved to the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.set(1, "a");
    /// assert_eq!(tree.remove(&1), Some("a"));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the tree, returning the stored key and value if it was present.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.raw.remove_if(key, |_| true)
    }

    /// Removes `key` only if it maps to a value equal to `value`. Returns whether it did.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::from([(1, "a")]);
    /// assert!(!tree.remove_pair(&1, &"b"));
    /// assert!(tree.remove_pair(&1, &"a"));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove_pair(&mut self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.raw.remove_if(key, |stored| stored == value).is_some()
    }

    /// Returns the value of the greatest key less than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if every key is greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{AvlTree, Error};
    ///
    /// let mut tree: AvlTree<_, _> = (1..=13).step_by(2).map(|k| (k, k * 10)).collect();
    /// assert_eq!(tree.left_closest(&6), Ok(&50));
    /// assert_eq!(tree.left_closest(&7), Ok(&70));
    /// assert_eq!(tree.left_closest(&0), Err(Error::NotFound));
    /// ```
    pub fn left_closest(&mut self, key: &K) -> Result<&V> {
        self.try_left_closest(key).ok_or(Error::NotFound)
    }

    /// Returns the value of the greatest key less than or equal to `key`, if any.
    pub fn try_left_closest(&mut self, key: &K) -> Option<&V> {
        self.try_left_closest_key_value(key).map(|(_, value)| value)
    }

    /// Returns the entry with the greatest key less than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if every key is greater than `key`.
    pub fn left_closest_key_value(&mut self, key: &K) -> Result<(&K, &V)> {
        self.try_left_closest_key_value(key).ok_or(Error::NotFound)
    }

    /// Returns the entry with the greatest key less than or equal to `key`, if any.
    pub fn try_left_closest_key_value(&mut self, key: &K) -> Option<(&K, &V)> {
        let id = self.raw.access(key, Target::Floor)?;
        Some(self.raw.key_value(id))
    }

    /// Returns the value of the least key greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if every key is less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{Error, SplayTree};
    ///
    /// let mut tree: SplayTree<_, _> = (1..=13).step_by(2).map(|k| (k, k * 10)).collect();
    /// assert_eq!(tree.right_closest(&6), Ok(&70));
    /// assert_eq!(tree.right_closest(&14), Err(Error::NotFound));
    /// ```
    pub fn right_closest(&mut self, key: &K) -> Result<&V> {
        self.try_right_closest(key).ok_or(Error::NotFound)
    }

    /// Returns the value of the least key greater than or equal to `key`, if any.
    pub fn try_right_closest(&mut self, key: &K) -> Option<&V> {
        self.try_right_closest_key_value(key).map(|(_, value)| value)
    }

    /// Returns the entry with the least key greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if every key is less than `key`.
    pub fn right_closest_key_value(&mut self, key: &K) -> Result<(&K, &V)> {
        self.try_right_closest_key_value(key).ok_or(Error::NotFound)
    }

    /// Returns the entry with the least key greater than or equal to `key`, if any.
    pub fn try_right_closest_key_value(&mut self, key: &K) -> Option<(&K, &V)> {
        let id = self.raw.access(key, Target::Ceiling)?;
        Some(self.raw.key_value(id))
    }

    /// Clones every entry, in ascending key order, into `dest` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`], leaving `dest` untouched, if fewer than
    /// [`len`](Self::len) slots follow `offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let tree = AvlTree::from([(2, 'b'), (1, 'a')]);
    /// let mut buffer = [(0, ' '); 3];
    /// tree.copy_to(&mut buffer, 1).unwrap();
    /// assert_eq!(buffer, [(0, ' '), (1, 'a'), (2, 'b')]);
    /// assert!(tree.copy_to(&mut buffer, 2).is_err());
    /// ```
    pub fn copy_to(&self, dest: &mut [(K, V)], offset: usize) -> Result<()>
    where
        K: Clone,
        V: Clone,
    {
        let needed = self.len();
        let available = dest.len();
        if offset > available || available - offset < needed {
            return Err(Error::BufferTooSmall {
                offset,
                needed,
                available,
            });
        }

        for (slot, (key, value)) in dest[offset..].iter_mut().zip(self.iter()) {
            *slot = (key.clone(), value.clone());
        }
        Ok(())
    }

    /// Gets an iterator over the entries of the tree, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let tree = AvlTree::from([(3, "c"), (2, "b"), (1, "a")]);
    /// let (first_key, first_value) = tree.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, B, C> {
        self.iter_ordered(TraversalOrder::InOrder, false)
    }

    /// Gets an iterator over the entries of the tree in the given traversal order.
    ///
    /// With `reversed` set, right subtrees are visited before left subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{AvlTree, TraversalOrder};
    ///
    /// let tree: AvlTree<_, _> = (1..=7).map(|k| (k, ())).collect();
    ///
    /// let pre: Vec<_> = tree.keys_ordered(TraversalOrder::PreOrder, false).copied().collect();
    /// assert_eq!(pre, [4, 2, 1, 3, 6, 5, 7]);
    ///
    /// let descending: Vec<_> = tree.keys_ordered(TraversalOrder::InOrder, true).copied().collect();
    /// assert_eq!(descending, [7, 6, 5, 4, 3, 2, 1]);
    /// ```
    pub fn iter_ordered(&self, order: TraversalOrder, reversed: bool) -> Iter<'_, K, V, B, C> {
        Iter::new(&self.raw, Walk::new(order, reversed))
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V, B, C> {
        Keys::new(self.iter())
    }

    /// Gets an iterator over the keys of the tree in the given traversal order.
    pub fn keys_ordered(&self, order: TraversalOrder, reversed: bool) -> Keys<'_, K, V, B, C> {
        Keys::new(self.iter_ordered(order, reversed))
    }

    /// Gets an iterator over the values of the tree, in order by key.
    pub fn values(&self) -> Values<'_, K, V, B, C> {
        Values::new(self.iter())
    }

    /// Gets an iterator over the values of the tree in the given traversal order.
    pub fn values_ordered(&self, order: TraversalOrder, reversed: bool) -> Values<'_, K, V, B, C> {
        Values::new(self.iter_ordered(order, reversed))
    }

    /// Constructs an iterator over a sub-range of entries in the tree, sorted by key.
    ///
    /// Only the subtrees that can hold keys within `range` are visited. Unlike
    /// `BTreeMap::range`, an empty or inverted range yields nothing instead of panicking.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let tree: AvlTree<_, _> = (1..=7).map(|k| (k, k * 10)).collect();
    /// let found: Vec<_> = tree.range(3..6).map(|(k, v)| (*k, *v)).collect();
    /// assert_eq!(found, [(3, 30), (4, 40), (5, 50)]);
    /// assert_eq!(tree.range(5..2).count(), 0);
    /// ```
    pub fn range<R>(&self, range: R) -> Range<'_, K, V, R, B, C>
    where
        R: RangeBounds<K>,
    {
        self.range_ordered(range, TraversalOrder::InOrder, false)
    }

    /// Constructs an iterator over a sub-range of entries in the given traversal order.
    pub fn range_ordered<R>(&self, range: R, order: TraversalOrder, reversed: bool) -> Range<'_, K, V, R, B, C>
    where
        R: RangeBounds<K>,
    {
        Range::new(&self.raw, Walk::new(order, reversed), range)
    }

    /// Constructs an iterator over the entries between `left` and `right`, with bound handling
    /// given by `flags`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{BinarySearchTree, RangeFlags, TraversalOrder};
    ///
    /// let tree: BinarySearchTree<_, _> = (1..=7).map(|k| (k, ())).collect();
    /// let keys = |flags, reversed| {
    ///     tree.range_query(&1, &7, flags, TraversalOrder::InOrder, reversed).map(|(k, _)| *k).collect::<Vec<_>>()
    /// };
    ///
    /// assert_eq!(keys(RangeFlags::INCLUSIVE, false), [1, 2, 3, 4, 5, 6, 7]);
    /// assert_eq!(keys(RangeFlags::NONE, false), [2, 3, 4, 5, 6]);
    /// assert_eq!(keys(RangeFlags::INCLUDE_LEFT, true), [6, 5, 4, 3, 2, 1]);
    /// ```
    pub fn range_query<'a, 'k>(
        &'a self,
        left: &'k K,
        right: &'k K,
        flags: RangeFlags,
        order: TraversalOrder,
        reversed: bool,
    ) -> Range<'a, K, V, (Bound<&'k K>, Bound<&'k K>), B, C> {
        self.range_ordered(flags.bounds(left, right), order, reversed)
    }
}

impl<K: Clone, V: Clone, B: Balance + Clone, C: Clone> Clone for SearchTree<K, V, B, C> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<K: Hash, V: Hash, B: Balance, C: Comparator<K>> Hash for SearchTree<K, V, B, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq, B: Balance, C: Comparator<K>> PartialEq for SearchTree<K, V, B, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, B: Balance, C: Comparator<K>> Eq for SearchTree<K, V, B, C> {}

impl<K: fmt::Debug, V: fmt::Debug, B: Balance, C: Comparator<K>> fmt::Debug for SearchTree<K, V, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, B: Balance + Default, C: Default> Default for SearchTree<K, V, B, C> {
    fn default() -> Self {
        Self::with_balance(B::default(), C::default())
    }
}

impl<K, V, B: Balance + Default, C: Comparator<K> + Default> FromIterator<(K, V)> for SearchTree<K, V, B, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs_with_balance(iter, B::default(), C::default())
    }
}

impl<K, V, B: Balance, C: Comparator<K>> Extend<(K, V)> for SearchTree<K, V, B, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<'a, K: Copy, V: Copy, B: Balance, C: Comparator<K>> Extend<(&'a K, &'a V)> for SearchTree<K, V, B, C> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.set(k, v);
        }
    }
}

impl<K: Ord, V, B: Balance + Default, const N: usize> From<[(K, V); N]> for SearchTree<K, V, B, Natural> {
    /// Converts a `[(K, V); N]` into a tree ordered by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::ScapegoatTree;
    ///
    /// let tree1 = ScapegoatTree::from([(1, 2), (3, 4)]);
    /// let tree2: ScapegoatTree<_, _> = [(1, 2), (3, 4)].into();
    /// assert_eq!(tree1, tree2);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        Self::from_pairs(arr)
    }
}

impl<'a, K, V, B: Balance, C: Comparator<K>> IntoIterator for &'a SearchTree<K, V, B, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, B, C>;

    fn into_iter(self) -> Iter<'a, K, V, B, C> {
        self.iter()
    }
}

impl<K, V, B: Balance, C> IntoIterator for SearchTree<K, V, B, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the tree, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::AvlTree;
    ///
    /// let tree = AvlTree::from([(2, "b"), (1, "a")]);
    /// let mut iter = tree.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.raw.into_sorted_vec())
    }
}

impl<K, V, B: Balance, C: Comparator<K>> Index<&K> for SearchTree<K, V, B, C> {
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key, without restructuring
    /// the tree.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the tree.
    fn index(&self, key: &K) -> &V {
        self.peek(key).expect("no entry found for key")
    }
}
