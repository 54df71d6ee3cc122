use std::collections::BTreeSet;
use std::ops::Bound;

use balanced_bst::{AvlTree, BinarySearchTree, RangeFlags, ScapegoatTree, SplayTree, TraversalOrder};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn query<'a, I>(items: I) -> Vec<i32>
where
    I: Iterator<Item = (&'a i32, &'a ())>,
{
    items.map(|(k, _)| *k).collect()
}

macro_rules! seven_key_tests {
    ($($name:ident => $tree:ty),* $(,)?) => {$(
        mod $name {
            use super::*;
            use pretty_assertions::assert_eq;

            fn seven() -> $tree {
                (1..=7).map(|k| (k, ())).collect()
            }

            #[test]
            fn flags_select_bounds() {
                let tree = seven();
                let run = |left: i32, right: i32, flags: RangeFlags| {
                    query(tree.range_query(&left, &right, flags, TraversalOrder::InOrder, false))
                };

                assert_eq!(run(1, 7, RangeFlags::INCLUSIVE), [1, 2, 3, 4, 5, 6, 7]);
                assert_eq!(run(4, 4, RangeFlags::NONE), Vec::<i32>::new());
                assert_eq!(run(4, 4, RangeFlags::INCLUSIVE), [4]);
                assert_eq!(run(4, 0, RangeFlags::INCLUDE_LEFT | RangeFlags::NO_RIGHT_BOUND), [4, 5, 6, 7]);
                assert_eq!(run(0, 4, RangeFlags::NO_LEFT_BOUND), [1, 2, 3]);
                assert_eq!(run(0, 0, RangeFlags::NO_LEFT_BOUND | RangeFlags::NO_RIGHT_BOUND), [1, 2, 3, 4, 5, 6, 7]);
                assert_eq!(run(2, 6, RangeFlags::INCLUDE_RIGHT), [3, 4, 5, 6]);
                assert_eq!(run(6, 2, RangeFlags::INCLUSIVE), Vec::<i32>::new());
            }

            #[test]
            fn reversed_in_order() {
                let tree = seven();
                let reversed = |lower: Bound<&i32>, upper: Bound<&i32>| {
                    query(tree.range_ordered((lower, upper), TraversalOrder::InOrder, true))
                };

                assert_eq!(reversed(Bound::Included(&1), Bound::Excluded(&7)), [6, 5, 4, 3, 2, 1]);
                assert_eq!(reversed(Bound::Excluded(&1), Bound::Excluded(&7)), [6, 5, 4, 3, 2]);
                assert_eq!(reversed(Bound::Unbounded, Bound::Included(&3)), [3, 2, 1]);
            }

            #[test]
            fn results_are_a_pruned_traversal() {
                let tree = seven();
                for order in [TraversalOrder::PreOrder, TraversalOrder::PostOrder] {
                    for reversed in [false, true] {
                        let full: Vec<i32> = tree.keys_ordered(order, reversed).copied().collect();
                        let expected: Vec<i32> = full.into_iter().filter(|k| (2..=5).contains(k)).collect();
                        let ranged: Vec<i32> = tree.range_ordered(2..=5, order, reversed).map(|(k, _)| *k).collect();
                        assert_eq!(ranged, expected, "{order:?} reversed={reversed}");
                    }
                }
            }
        }
    )*};
}

seven_key_tests! {
    unbalanced => BinarySearchTree<i32, ()>,
    avl => AvlTree<i32, ()>,
    scapegoat => ScapegoatTree<i32, ()>,
    splay => SplayTree<i32, ()>,
}

#[test]
fn pre_and_post_order_over_a_perfect_tree() {
    let tree: AvlTree<i32, ()> = (1..=7).map(|k| (k, ())).collect();
    let keys = |order, reversed, flags| -> Vec<i32> {
        tree.range_query(&2, &6, flags, order, reversed).map(|(k, _)| *k).collect()
    };

    // Root 4; the pruned subtree is 4(2(3), 6(5)).
    assert_eq!(keys(TraversalOrder::PreOrder, false, RangeFlags::INCLUSIVE), [4, 2, 3, 6, 5]);
    assert_eq!(keys(TraversalOrder::PostOrder, false, RangeFlags::INCLUSIVE), [3, 2, 5, 6, 4]);
    assert_eq!(keys(TraversalOrder::PreOrder, true, RangeFlags::INCLUSIVE), [4, 6, 5, 2, 3]);
    assert_eq!(keys(TraversalOrder::PostOrder, true, RangeFlags::NONE), [5, 3, 4]);
}

#[test]
fn range_iterators_rewind_and_fuse() {
    let tree: ScapegoatTree<i32, i32> = (0..40).map(|k| (k, k * k)).collect();
    let mut range = tree.range_query(&10, &13, RangeFlags::INCLUDE_LEFT, TraversalOrder::InOrder, false);

    assert_eq!(range.next(), Some((&10, &100)));
    assert_eq!(range.by_ref().count(), 2);
    assert_eq!(range.next(), None);
    assert_eq!(range.next(), None);

    range.rewind();
    assert_eq!(range.map(|(k, _)| *k).collect::<Vec<_>>(), [10, 11, 12]);
}

#[test]
fn default_flags_are_inclusive() {
    assert_eq!(RangeFlags::default(), RangeFlags::INCLUSIVE);
    assert_eq!(format!("{:?}", RangeFlags::INCLUDE_LEFT | RangeFlags::NO_RIGHT_BOUND), "{INCLUDE_LEFT, NO_RIGHT_BOUND}");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every combination of flags over random keys matches a filter over a BTreeSet.
    #[test]
    fn flags_match_filter(
        keys in proptest::collection::btree_set(-200i32..200, 0..300),
        left in -220i32..220,
        right in -220i32..220,
        flags in 0u8..16,
        reversed in any::<bool>(),
    ) {
        let set: BTreeSet<i32> = keys;
        let tree: SplayTree<i32, ()> = set.iter().map(|k| (*k, ())).collect();
        let mut flag_set = RangeFlags::NONE;
        for (bit, flag) in [
            RangeFlags::INCLUDE_LEFT,
            RangeFlags::INCLUDE_RIGHT,
            RangeFlags::NO_LEFT_BOUND,
            RangeFlags::NO_RIGHT_BOUND,
        ]
        .into_iter()
        .enumerate()
        {
            if flags & (1 << bit) != 0 {
                flag_set |= flag;
            }
        }

        let above_left = |k: &i32| {
            flag_set.contains(RangeFlags::NO_LEFT_BOUND)
                || *k > left
                || (*k == left && flag_set.contains(RangeFlags::INCLUDE_LEFT))
        };
        let below_right = |k: &i32| {
            flag_set.contains(RangeFlags::NO_RIGHT_BOUND)
                || *k < right
                || (*k == right && flag_set.contains(RangeFlags::INCLUDE_RIGHT))
        };
        let mut expected: Vec<i32> = set.iter().copied().filter(|k| above_left(k) && below_right(k)).collect();
        if reversed {
            expected.reverse();
        }

        let found: Vec<i32> = tree
            .range_query(&left, &right, flag_set, TraversalOrder::InOrder, reversed)
            .map(|(k, _)| *k)
            .collect();
        prop_assert_eq!(found, expected);
    }
}
