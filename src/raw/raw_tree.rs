use alloc::vec::Vec;
use core::cmp::Ordering;
use core::mem;

use super::handle::NodeId;
use super::links::Links;
use super::node::{Node, Position};
use super::path::{AncestorPath, PathEntry};
use crate::balance::Balance;
use crate::compare::Comparator;

/// The binary search tree engine backing `SearchTree`.
///
/// Owns the node graph, the comparator and the balancing strategy, and keeps handles to the
/// minimum and maximum nodes up to date across every mutation. Rebalancing is delegated to `B`
/// after each structural change.
#[derive(Clone)]
pub(crate) struct RawTree<K, V, B: Balance, C> {
    links: Links<K, V, B::Meta>,
    min: Option<NodeId>,
    max: Option<NodeId>,
    cmp: C,
    balance: B,
}

/// Outcome of [`RawTree::insert`].
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum Inserted<V> {
    /// A new node was linked in.
    New,
    /// The key existed and its value was overwritten; holds the previous value.
    Replaced(V),
    /// The key existed and overwriting was not allowed; the tree is unchanged.
    Rejected,
}

/// Which node an adjusting lookup settles on when the key itself is absent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Target {
    /// Only an exact match.
    Exact,
    /// The greatest key less than or equal to the probe.
    Floor,
    /// The least key greater than or equal to the probe.
    Ceiling,
}

/// Result of a single root-to-leaf descent.
pub(crate) struct Descent {
    /// Every visited node. Ends at the match, or at the node a new key would hang from.
    pub(crate) path: AncestorPath,
    /// Whether the last path entry holds the probed key.
    pub(crate) found: bool,
    /// Depth of the deepest visited node with a key below the probe.
    pub(crate) floor: Option<usize>,
    /// Depth of the deepest visited node with a key above the probe.
    pub(crate) ceiling: Option<usize>,
}

impl Descent {
    // Depth of the node `target` resolves to.
    fn settle(&self, target: Target) -> Option<usize> {
        if self.found {
            return self.path.len().checked_sub(1);
        }

        match target {
            Target::Exact => None,
            Target::Floor => self.floor,
            Target::Ceiling => self.ceiling,
        }
    }
}

impl<K, V, B: Balance, C> RawTree<K, V, B, C> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(balance: B, cmp: C) -> Self {
        Self {
            links: Links::new(),
            min: None,
            max: None,
            cmp,
            balance,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if the tree contains no elements.
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        self.links.clear();
        self.min = None;
        self.max = None;
    }

    pub(crate) const fn links(&self) -> &Links<K, V, B::Meta> {
        &self.links
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.cmp
    }

    pub(crate) const fn balance(&self) -> &B {
        &self.balance
    }

    /// Handle to the node holding the smallest key.
    pub(crate) const fn min(&self) -> Option<NodeId> {
        self.min
    }

    /// Handle to the node holding the largest key.
    pub(crate) const fn max(&self) -> Option<NodeId> {
        self.max
    }

    pub(crate) fn key_value(&self, id: NodeId) -> (&K, &V) {
        let node = self.links.node(id);
        (&node.key, &node.value)
    }

    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut V {
        self.links.value_mut(id)
    }

    /// Unlinks every node and returns the entries in ascending order.
    pub(crate) fn into_sorted_vec(self) -> Vec<(K, V)> {
        let Self { mut links, .. } = self;
        let Some(root) = links.root() else {
            return Vec::new();
        };

        let sorted = links.flatten(root);
        let entries: Vec<(K, V)> = sorted.into_iter().map(|id| links.free(id)).collect();
        links.clear();
        entries
    }
}

impl<K, V, B: Balance, C: Comparator<K>> RawTree<K, V, B, C> {
    /// Builds a minimum-height tree from entries already sorted by `cmp` with no duplicate keys.
    pub(crate) fn from_sorted(entries: Vec<(K, V)>, balance: B, cmp: C) -> Self {
        let mut tree = Self::new(balance, cmp);
        tree.links = Links::with_capacity(entries.len());

        let ids: Vec<NodeId> = entries.into_iter().map(|(key, value)| tree.links.alloc(Node::leaf(key, value))).collect();
        debug_assert!(
            ids.windows(2).all(|pair| tree.cmp.compare(tree.links.key(pair[0]), tree.links.key(pair[1])).is_lt()),
            "`RawTree::from_sorted()` - entries are not strictly ascending!"
        );

        let Self { links, balance, .. } = &mut tree;
        let root = links.build_balanced(&ids, &mut |links, id| balance.refresh(links, id));
        links.set_root(root);
        tree.min = ids.first().copied();
        tree.max = ids.last().copied();

        #[cfg(feature = "tracing")]
        tracing::trace!(len = ids.len(), "bulk build: balanced tree linked");

        tree
    }

    /// Builds a tree from entries in any order. For duplicate keys the last entry wins.
    pub(crate) fn from_unsorted<I>(entries: I, balance: B, cmp: C) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut entries: Vec<(K, V)> = entries.into_iter().collect();
        // Stable, so equal keys keep their input order for the dedup below.
        entries.sort_by(|a, b| cmp.compare(&a.0, &b.0));
        entries.dedup_by(|later, earlier| {
            let duplicate = cmp.compare(&later.0, &earlier.0).is_eq();
            if duplicate {
                mem::swap(&mut later.1, &mut earlier.1);
            }
            duplicate
        });

        Self::from_sorted(entries, balance, cmp)
    }

    /// Descends from the root towards `key`, recording every node visited.
    pub(crate) fn descend(&self, key: &K) -> Descent {
        let mut descent = Descent {
            path: AncestorPath::new(),
            found: false,
            floor: None,
            ceiling: None,
        };

        let mut position = Position::Root;
        let mut current = self.links.root();
        while let Some(node) = current {
            let depth = descent.path.len();
            descent.path.push(PathEntry::new(position, node));

            match self.cmp.compare(key, self.links.key(node)) {
                Ordering::Less => {
                    descent.ceiling = Some(depth);
                    position = Position::Left;
                    current = self.links.left(node);
                }
                Ordering::Greater => {
                    descent.floor = Some(depth);
                    position = Position::Right;
                    current = self.links.right(node);
                }
                Ordering::Equal => {
                    descent.found = true;
                    break;
                }
            }
        }

        descent
    }

    /// Looks `key` up without restructuring the tree.
    pub(crate) fn find(&self, key: &K) -> Option<NodeId> {
        let mut current = self.links.root();
        while let Some(node) = current {
            current = match self.cmp.compare(key, self.links.key(node)) {
                Ordering::Less => self.links.left(node),
                Ordering::Greater => self.links.right(node),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Looks up `key` (or its floor or ceiling) and reports the access to the balancing strategy.
    ///
    /// The returned handle is the node the strategy was told about; for a splay tree it is the
    /// root afterwards. A miss leaves the tree untouched.
    pub(crate) fn access(&mut self, key: &K, target: Target) -> Option<NodeId> {
        let descent = self.descend(key);
        let depth = descent.settle(target)?;

        let mut path = descent.path;
        path.truncate(depth + 1);
        let node = path[depth].node;
        self.balance.after_access(&mut self.links, &mut path);
        Some(node)
    }

    /// Inserts `key` with `value`.
    ///
    /// If the key exists, the value is replaced when `overwrite` is set; otherwise the tree is
    /// left unchanged and [`Inserted::Rejected`] is returned.
    pub(crate) fn insert(&mut self, key: K, value: V, overwrite: bool) -> Inserted<V> {
        if self.links.root().is_none() {
            let id = self.links.alloc(Node::leaf(key, value));
            self.links.set_root(Some(id));
            self.min = Some(id);
            self.max = Some(id);
            return Inserted::New;
        }

        let Descent { mut path, found, .. } = self.descend(&key);
        let last = path.last().expect("`RawTree::insert()` - descent of a non-empty tree is empty!").node;

        if found {
            if !overwrite {
                return Inserted::Rejected;
            }

            let previous = mem::replace(self.links.value_mut(last), value);
            self.balance.after_access(&mut self.links, &mut path);
            return Inserted::Replaced(previous);
        }

        let goes_left = self.cmp.compare(&key, self.links.key(last)).is_lt();
        let id = self.links.alloc(Node::leaf(key, value));
        let position = if goes_left {
            self.links.set_left(last, Some(id));
            if self.min == Some(last) {
                self.min = Some(id);
            }
            Position::Left
        } else {
            self.links.set_right(last, Some(id));
            if self.max == Some(last) {
                self.max = Some(id);
            }
            Position::Right
        };

        path.push(PathEntry::new(position, id));
        self.balance.after_insert(&mut self.links, &mut path);
        Inserted::New
    }

    /// Removes `key` if `predicate` accepts its value, returning the removed entry.
    pub(crate) fn remove_if<F>(&mut self, key: &K, predicate: F) -> Option<(K, V)>
    where
        F: FnOnce(&V) -> bool,
    {
        let Descent { mut path, found, .. } = self.descend(key);
        if !found {
            return None;
        }

        let slot = path.len() - 1;
        let PathEntry { position, node: removed } = path[slot];
        if !predicate(self.links.value(removed)) {
            return None;
        }

        let parent = path.parent(slot);
        let substitute = self.detach_substitute(removed, &mut path);
        debug_assert!(
            substitute.is_none_or(|node| self.orders_between_children(node)),
            "`RawTree::remove_if()` - substitute does not order between its children!"
        );
        match substitute {
            Some(substitute) => path.replace_node(slot, substitute),
            None => {
                path.pop();
            }
        }
        self.links.replace_child(parent, position, substitute);

        if self.min == Some(removed) {
            self.min = substitute.map(|node| self.links.leftmost(node)).or(parent);
        }
        if self.max == Some(removed) {
            self.max = substitute.map(|node| self.links.rightmost(node)).or(parent);
        }

        let entry = self.links.free(removed);
        self.balance.after_remove(&mut self.links, &mut path, slot);
        Some(entry)
    }

    /// `true` if `node`'s key orders after its left child's and before its right child's.
    pub(crate) fn orders_between_children(&self, node: NodeId) -> bool {
        let key = self.links.key(node);
        let left_ok = self.links.left(node).is_none_or(|left| self.cmp.compare(self.links.key(left), key).is_lt());
        let right_ok = self.links.right(node).is_none_or(|right| self.cmp.compare(key, self.links.key(right)).is_lt());
        left_ok && right_ok
    }

    // Picks the node that takes over `removed`'s slot and gives it `removed`'s children. When the
    // in-order predecessor is used, its former ancestors below `removed` are appended to `path`.
    fn detach_substitute(&mut self, removed: NodeId, path: &mut AncestorPath) -> Option<NodeId> {
        let left = self.links.left(removed);
        let right = self.links.right(removed);

        let Some(left) = left else {
            return right;
        };

        let Some(mut predecessor) = self.links.right(left) else {
            self.links.set_right(left, right);
            return Some(left);
        };

        path.push(PathEntry::new(Position::Left, left));
        let mut predecessor_parent = left;
        while let Some(next) = self.links.right(predecessor) {
            path.push(PathEntry::new(Position::Right, predecessor));
            predecessor_parent = predecessor;
            predecessor = next;
        }

        self.links.set_right(predecessor_parent, self.links.left(predecessor));
        self.links.set_left(predecessor, Some(left));
        self.links.set_right(predecessor, right);
        Some(predecessor)
    }
}
