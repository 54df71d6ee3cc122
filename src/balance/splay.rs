use super::{AncestorPath, Balance, Links, Position};

/// Self-adjusting (splay) strategy.
///
/// Every explicit access moves the accessed node to the root with zig, zig-zig and zig-zag
/// steps. No metadata is stored; balance is amortized, and keys used recently stay cheap to
/// reach. Removal splays the removed node's former parent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Splay;

impl Splay {
    // Rotates the last path entry up to the root, two levels per step.
    fn splay<K, V>(links: &mut Links<K, V, ()>, path: &AncestorPath) {
        let Some(mut depth) = path.len().checked_sub(1) else {
            return;
        };
        let node = path[depth].node;

        while depth >= 2 {
            let grandparent = path[depth - 2].node;
            let top = match (path[depth - 1].position, path[depth].position) {
                (Position::Left, Position::Left) => links.rotate_right_right(grandparent),
                (Position::Right, Position::Right) => links.rotate_left_left(grandparent),
                (Position::Left, Position::Right) => links.rotate_left_right(grandparent),
                (Position::Right, Position::Left) => links.rotate_right_left(grandparent),
                (Position::Root, _) | (_, Position::Root) => {
                    unreachable!("`Splay::splay()` - root entry below the top of the path!")
                }
            };
            debug_assert_eq!(top, node);
            links.relink(path, depth - 2, top);
            depth -= 2;
        }

        if depth == 1 {
            let root = path[0].node;
            let top = if path[1].position.is_left() {
                links.rotate_right(root)
            } else {
                links.rotate_left(root)
            };
            debug_assert_eq!(top, node);
            links.set_root(Some(top));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(?node, from_depth = path.len() - 1, "splay: node lifted to root");
    }
}

impl Balance for Splay {
    type Meta = ();

    fn after_insert<K, V>(&self, links: &mut Links<K, V, ()>, path: &mut AncestorPath) {
        Self::splay(links, path);
    }

    fn after_remove<K, V>(&self, links: &mut Links<K, V, ()>, path: &mut AncestorPath, slot: usize) {
        path.truncate(slot);
        Self::splay(links, path);
    }

    fn after_access<K, V>(&self, links: &mut Links<K, V, ()>, path: &mut AncestorPath) {
        Self::splay(links, path);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::compare::Natural;
    use crate::raw::tests::check_structure;
    use crate::raw::{RawTree, Target};
    use proptest::prelude::*;

    fn root_key(tree: &RawTree<i32, i32, Splay, Natural>) -> Option<i32> {
        tree.links().root().map(|id| *tree.links().key(id))
    }

    #[test]
    fn inserted_key_becomes_root() {
        let mut tree = RawTree::new(Splay, Natural);
        for key in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
            tree.insert(key, key, false);
            assert_eq!(root_key(&tree), Some(key));
        }
        assert_eq!(check_structure(&tree), [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn access_splays_target() {
        let mut tree = RawTree::from_sorted((1..=15).map(|key| (key, key)).collect(), Splay, Natural);

        tree.access(&1, Target::Exact);
        assert_eq!(root_key(&tree), Some(1));
        tree.access(&11, Target::Exact);
        assert_eq!(root_key(&tree), Some(11));

        // Misses leave the shape alone; closest lookups splay the node they settle on.
        tree.access(&100, Target::Exact);
        assert_eq!(root_key(&tree), Some(11));
        tree.access(&100, Target::Floor);
        assert_eq!(root_key(&tree), Some(15));
        assert_eq!(check_structure(&tree), (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn removal_splays_parent() {
        let mut tree = RawTree::from_sorted((1..=7).map(|key| (key, key)).collect(), Splay, Natural);
        // Perfect tree rooted at 4; 5 hangs left of 6.
        tree.remove_if(&5, |_| true);
        assert_eq!(root_key(&tree), Some(6));
        assert_eq!(check_structure(&tree), [1, 2, 3, 4, 6, 7]);

        // Removing the root leaves its substitute on top.
        tree.remove_if(&6, |_| true);
        assert_eq!(check_structure(&tree), [1, 2, 3, 4, 7]);
        assert_eq!(root_key(&tree), Some(4));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn accessed_key_is_root(ops in prop::collection::vec((0..3_u8, -60..60_i32), 0..300)) {
            let mut tree = RawTree::new(Splay, Natural);
            let mut model = alloc::collections::BTreeMap::new();

            for (op, key) in ops {
                match op {
                    0 => {
                        tree.insert(key, key, true);
                        model.insert(key, key);
                        prop_assert_eq!(root_key(&tree), Some(key));
                    }
                    1 => {
                        let found = tree.access(&key, Target::Exact).is_some();
                        prop_assert_eq!(found, model.contains_key(&key));
                        if found {
                            prop_assert_eq!(root_key(&tree), Some(key));
                        }
                    }
                    _ => {
                        let parent = {
                            let descent = tree.descend(&key);
                            descent.path.len().checked_sub(2).map(|depth| *tree.links().key(descent.path[depth].node))
                        };
                        let removed = tree.remove_if(&key, |_| true).map(|entry| entry.1);
                        prop_assert_eq!(removed, model.remove(&key));
                        if removed.is_some() && parent.is_some() {
                            prop_assert_eq!(root_key(&tree), parent);
                        }
                    }
                }
                prop_assert_eq!(check_structure(&tree), model.keys().copied().collect::<Vec<_>>());
            }
        }
    }
}
