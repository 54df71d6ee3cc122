/// The visiting order of a depth-first traversal.
///
/// Combined with a `reversed` flag, which swaps left and right at every node, this selects one of
/// six sequences. Reversed in-order is descending key order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree: ascending key order.
    #[default]
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
}
