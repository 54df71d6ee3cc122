use super::{AncestorPath, Balance, Links, NodeId};
use crate::error::{Error, Result};

/// Number of nodes in the subtree rooted at a node, itself included.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Weight(usize);

impl Weight {
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self(1)
    }
}

/// Weight-balanced (scapegoat) strategy.
///
/// No node may have a child subtree heavier than `alpha` times its own weight. After an insert
/// or removal, the shallowest node on the affected path that violates this is the scapegoat:
/// its subtree is flattened and rebuilt perfectly balanced. Smaller `alpha` keeps the tree
/// shallower at the cost of more frequent rebuilds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scapegoat {
    alpha: f64,
}

impl Scapegoat {
    /// The balance factor used by [`Scapegoat::default`].
    pub const DEFAULT_ALPHA: f64 = 0.7;

    /// Creates a strategy with the given balance factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAlpha`] unless `0.5 <= alpha <= 1.0`.
    ///
    /// ```
    /// use balanced_bst::{Error, Scapegoat};
    ///
    /// assert!(Scapegoat::new(0.75).is_ok());
    /// assert_eq!(Scapegoat::new(0.3), Err(Error::InvalidAlpha { alpha: 0.3 }));
    /// ```
    pub fn new(alpha: f64) -> Result<Self> {
        if !(0.5..=1.0).contains(&alpha) {
            return Err(Error::InvalidAlpha { alpha });
        }
        Ok(Self { alpha })
    }

    #[inline]
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    #[inline]
    fn weight<K, V>(links: &Links<K, V, Weight>, node: Option<NodeId>) -> usize {
        node.map_or(0, |node| links.meta(node).0)
    }

    fn update<K, V>(links: &mut Links<K, V, Weight>, node: NodeId) {
        let weight = 1 + Self::weight(links, links.left(node)) + Self::weight(links, links.right(node));
        *links.meta_mut(node) = Weight(weight);
    }

    #[allow(clippy::cast_precision_loss)]
    fn is_unbalanced<K, V>(&self, links: &Links<K, V, Weight>, node: NodeId) -> bool {
        let heavier = Self::weight(links, links.left(node)).max(Self::weight(links, links.right(node)));
        heavier as f64 > self.alpha * links.meta(node).0 as f64
    }

    // Refreshes weights along the path, then rebuilds the subtree of the shallowest node that
    // violates the weight bound, if any.
    fn rebuild<K, V>(&self, links: &mut Links<K, V, Weight>, path: &AncestorPath) {
        for entry in path.iter().rev() {
            Self::update(links, entry.node);
        }

        let Some(depth) = path.iter().position(|entry| self.is_unbalanced(links, entry.node)) else {
            return;
        };

        let scapegoat = path[depth].node;
        let sorted = links.flatten(scapegoat);
        let top = links
            .build_balanced(&sorted, &mut |links, node| Self::update(links, node))
            .expect("`Scapegoat::rebuild()` - scapegoat subtree is empty!");
        links.relink(path, depth, top);

        #[cfg(feature = "tracing")]
        tracing::debug!(depth, weight = sorted.len(), alpha = self.alpha, "scapegoat: rebuilt subtree");
    }
}

impl Default for Scapegoat {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
        }
    }
}

impl Balance for Scapegoat {
    type Meta = Weight;

    fn refresh<K, V>(&self, links: &mut Links<K, V, Weight>, node: NodeId) {
        Self::update(links, node);
    }

    fn after_insert<K, V>(&self, links: &mut Links<K, V, Weight>, path: &mut AncestorPath) {
        self.rebuild(links, path);
    }

    fn after_remove<K, V>(&self, links: &mut Links<K, V, Weight>, path: &mut AncestorPath, _slot: usize) {
        self.rebuild(links, path);
    }
}
