use super::{AncestorPath, Balance, Links, NodeId};

/// Height of the subtree rooted at a node. A leaf has height 1, an absent child 0.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Height(u32);

impl Height {
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Height {
    fn default() -> Self {
        Self(1)
    }
}

/// Height-balanced (AVL) strategy.
///
/// The heights of the two subtrees of every node differ by at most one, bounding the tree
/// height by roughly `1.44 log2(n)`. An insert needs at most one single or double rotation;
/// a removal may rotate once per level on its way back to the root.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Avl;

impl Avl {
    #[inline]
    fn height<K, V>(links: &Links<K, V, Height>, node: Option<NodeId>) -> u32 {
        node.map_or(0, |node| links.meta(node).0)
    }

    // Recomputes and stores the height of `node`, returning it.
    fn update<K, V>(links: &mut Links<K, V, Height>, node: NodeId) -> u32 {
        let height = 1 + Self::height(links, links.left(node)).max(Self::height(links, links.right(node)));
        *links.meta_mut(node) = Height(height);
        height
    }

    // Restores the balance of `node`, assuming both of its subtrees are balanced with correct
    // heights. Returns the root of the subtree, which the caller must relink if it changed.
    fn fix<K, V>(links: &mut Links<K, V, Height>, node: NodeId) -> NodeId {
        let left = links.left(node);
        let right = links.right(node);
        let left_height = Self::height(links, left);
        let right_height = Self::height(links, right);

        let top = if left_height > right_height + 1 {
            let left = left.expect("`Avl::fix()` - left-heavy node has no left child!");
            if Self::height(links, links.left(left)) >= Self::height(links, links.right(left)) {
                links.rotate_right(node)
            } else {
                links.rotate_left_right(node)
            }
        } else if right_height > left_height + 1 {
            let right = right.expect("`Avl::fix()` - right-heavy node has no right child!");
            if Self::height(links, links.right(right)) >= Self::height(links, links.left(right)) {
                links.rotate_left(node)
            } else {
                links.rotate_right_left(node)
            }
        } else {
            Self::update(links, node);
            return node;
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(?node, ?top, left_height, right_height, "avl: rotated");

        for child in [links.left(top), links.right(top)].into_iter().flatten() {
            Self::update(links, child);
        }
        Self::update(links, top);
        top
    }
}

impl Balance for Avl {
    type Meta = Height;

    fn refresh<K, V>(&self, links: &mut Links<K, V, Height>, node: NodeId) {
        Self::update(links, node);
    }

    fn after_insert<K, V>(&self, links: &mut Links<K, V, Height>, path: &mut AncestorPath) {
        // The new leaf already has height 1; start at its parent.
        for depth in (0..path.len().saturating_sub(1)).rev() {
            let node = path[depth].node;
            let before = Self::height(links, Some(node));

            let top = Self::fix(links, node);
            if top != node {
                // The rotated subtree is back at its pre-insert height.
                links.relink(path, depth, top);
                return;
            }
            if Self::height(links, Some(node)) == before {
                return;
            }
        }
    }

    fn after_remove<K, V>(&self, links: &mut Links<K, V, Height>, path: &mut AncestorPath, slot: usize) {
        for depth in (0..path.len()).rev() {
            let node = path[depth].node;
            let before = Self::height(links, Some(node));

            let top = Self::fix(links, node);
            if top != node {
                links.relink(path, depth, top);
            }

            // At and below `slot` the stored heights predate the splice and prove nothing.
            if depth < slot && Self::height(links, Some(top)) == before {
                return;
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::compare::Natural;
    use crate::raw::tests::check_structure;
    use crate::raw::{Inserted, RawTree};
    use proptest::prelude::*;

    // Verifies stored heights and the balance condition, returning the subtree height.
    fn check_heights<K, V>(links: &Links<K, V, Height>, node: Option<NodeId>) -> u32 {
        let Some(node) = node else {
            return 0;
        };

        let left = check_heights(links, links.left(node));
        let right = check_heights(links, links.right(node));
        assert!(left.abs_diff(right) <= 1, "unbalanced node: {left} vs {right}");
        assert_eq!(links.meta(node).get(), 1 + left.max(right), "stale height");
        1 + left.max(right)
    }

    fn check(tree: &RawTree<i32, i32, Avl, Natural>) -> Vec<i32> {
        check_heights(tree.links(), tree.links().root());
        check_structure(tree)
    }

    #[test]
    fn ascending_inserts_stay_logarithmic() {
        let mut tree = RawTree::new(Avl, Natural);
        for key in 0..1023 {
            assert_eq!(tree.insert(key, key, false), Inserted::New);
        }
        check(&tree);
        // 1023 keys fit in a perfect tree of height 10; AVL allows at most 1.44x that.
        let height = tree.links().meta(tree.links().root().unwrap()).get();
        assert!((10..=14).contains(&height), "height {height}");
    }

    #[test]
    fn double_rotations() {
        // 3, 1, 2 forces a left-right rotation; 5, 4 then forces a right-left at 3.
        let mut tree = RawTree::new(Avl, Natural);
        for key in [3, 1, 2] {
            tree.insert(key, key, false);
        }
        assert_eq!(tree.links().root().map(|id| *tree.links().key(id)), Some(2));
        for key in [5, 4] {
            tree.insert(key, key, false);
        }
        assert_eq!(check(&tree), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn removals_rebalance_to_the_root() {
        let mut tree = RawTree::from_sorted((0..100).map(|key| (key, key)).collect(), Avl, Natural);
        check(&tree);
        for key in (0..100).step_by(3) {
            assert_eq!(tree.remove_if(&key, |_| true), Some((key, key)));
            check(&tree);
        }
        for key in 0..50 {
            tree.remove_if(&key, |_| true);
            check(&tree);
        }
        assert_eq!(check(&tree), (50..100).filter(|key| key % 3 != 0).collect::<Vec<_>>());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn heights_hold_after_every_operation(ops in prop::collection::vec((any::<bool>(), -100..100_i32), 0..400)) {
            let mut tree = RawTree::new(Avl, Natural);
            let mut model = alloc::collections::BTreeMap::new();

            for (insert, key) in ops {
                if insert {
                    tree.insert(key, key, true);
                    model.insert(key, key);
                } else {
                    prop_assert_eq!(tree.remove_if(&key, |_| true).map(|entry| entry.1), model.remove(&key));
                }
                prop_assert_eq!(check(&tree), model.keys().copied().collect::<Vec<_>>());
            }
        }
    }
}
