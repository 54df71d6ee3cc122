use core::cmp::Ordering;
use core::ops::Bound;

use smallvec::SmallVec;

use super::handle::NodeId;
use super::links::Links;
use crate::compare::Comparator;
use crate::order::TraversalOrder;

// Frames stay inline for any tree up to this depth.
const INLINE_FRAMES: usize = 32;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Step {
    Left,
    Value,
    Right,
    Done,
}

/// Where a visited node sits relative to the query bounds.
///
/// The search root is the shallowest node inside the bounds. Below it, nodes on the leftmost
/// spine of its left subtree run along the lower bound ("left edge") and nodes on the rightmost
/// spine of its right subtree run along the upper bound ("right edge"). Everything hanging off
/// the inner side of an in-range edge node is inside the bounds without further comparisons.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Zone {
    /// Search root strictly between the bounds.
    Root,
    /// Search root equal to both bounds.
    RootExact,
    /// Search root equal to the lower bound.
    RootLeftExact,
    /// Search root equal to the upper bound.
    RootRightExact,
    /// Whole subtree within bounds.
    Inside,
    LeftEdgeInside,
    LeftEdgeOutside,
    LeftExact,
    RightEdgeInside,
    RightEdgeOutside,
    RightExact,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    node: NodeId,
    cursor: u8,
    zone: Zone,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Fresh,
    Running,
    Finished,
}

/// The resumable traversal and range-query state machine.
///
/// A `Walk` holds no reference to the tree: every call to [`next`](Walk::next) is handed the
/// node graph, the comparator and the bounds, and advances by exactly one yielded node. With
/// both bounds [`Bound::Unbounded`] it is a plain depth-first traversal.
///
/// Subtrees that provably lie outside the bounds are never entered. The tree must not change
/// between calls.
#[derive(Clone, Debug)]
pub(crate) struct Walk {
    stack: SmallVec<[Frame; INLINE_FRAMES]>,
    schedule: [Step; 4],
    state: State,
}

impl Walk {
    pub(crate) fn new(order: TraversalOrder, reversed: bool) -> Self {
        use Step::{Done, Left, Right, Value};

        let schedule = match (order, reversed) {
            (TraversalOrder::PreOrder, false) => [Value, Left, Right, Done],
            (TraversalOrder::PreOrder, true) => [Value, Right, Left, Done],
            (TraversalOrder::InOrder, false) => [Left, Value, Right, Done],
            (TraversalOrder::InOrder, true) => [Right, Value, Left, Done],
            (TraversalOrder::PostOrder, false) => [Left, Right, Value, Done],
            (TraversalOrder::PostOrder, true) => [Right, Left, Value, Done],
        };

        Self {
            stack: SmallVec::new(),
            schedule,
            state: State::Fresh,
        }
    }

    /// Returns the walk to its initial state; the next call starts over from the root.
    pub(crate) fn rewind(&mut self) {
        self.stack.clear();
        self.state = State::Fresh;
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Advances to the next node that lies within `lower..upper`.
    pub(crate) fn next<K, V, M, C>(
        &mut self,
        links: &Links<K, V, M>,
        cmp: &C,
        lower: Bound<&K>,
        upper: Bound<&K>,
    ) -> Option<NodeId>
    where
        C: Comparator<K>,
    {
        match self.state {
            State::Finished => return None,
            State::Fresh => {
                self.state = State::Running;
                self.start(links, cmp, lower, upper);
            }
            State::Running => {}
        }

        while let Some(frame) = self.stack.last_mut() {
            let step = self.schedule[usize::from(frame.cursor)];
            frame.cursor += 1;
            let Frame { node, zone, .. } = *frame;

            match step {
                Step::Left => {
                    if let Some(child) = links.left(node) {
                        if let Some(zone) = left_zone(zone, links.key(child), cmp, lower, upper) {
                            self.push(child, zone);
                        }
                    }
                }
                Step::Right => {
                    if let Some(child) = links.right(node) {
                        if let Some(zone) = right_zone(zone, links.key(child), cmp, lower, upper) {
                            self.push(child, zone);
                        }
                    }
                }
                Step::Value => {
                    if reports(zone, lower, upper) {
                        return Some(node);
                    }
                }
                Step::Done => {
                    self.stack.pop();
                }
            }
        }

        self.state = State::Finished;
        None
    }

    fn push(&mut self, node: NodeId, zone: Zone) {
        self.stack.push(Frame { node, cursor: 0, zone });
    }

    // Descends from the root to the search root, pruning the side that cannot hold any key
    // within the bounds, and pushes its frame.
    fn start<K, V, M, C>(&mut self, links: &Links<K, V, M>, cmp: &C, lower: Bound<&K>, upper: Bound<&K>)
    where
        C: Comparator<K>,
    {
        if let (Bound::Included(lo) | Bound::Excluded(lo), Bound::Included(hi) | Bound::Excluded(hi)) = (lower, upper) {
            match cmp.compare(lo, hi) {
                Ordering::Greater => return,
                Ordering::Equal if !matches!((lower, upper), (Bound::Included(_), Bound::Included(_))) => return,
                _ => {}
            }
        }

        let mut current = links.root();
        while let Some(node) = current {
            let key = links.key(node);
            let low = match lower {
                Bound::Unbounded => Ordering::Greater,
                Bound::Included(lo) => cmp.compare(key, lo),
                Bound::Excluded(lo) => cmp.compare(key, lo).then(Ordering::Less),
            };
            let high = match upper {
                Bound::Unbounded => Ordering::Less,
                Bound::Included(hi) => cmp.compare(key, hi),
                Bound::Excluded(hi) => cmp.compare(key, hi).then(Ordering::Greater),
            };

            if low.is_lt() {
                current = links.right(node);
            } else if high.is_gt() {
                current = links.left(node);
            } else {
                let zone = match (low, high) {
                    (Ordering::Equal, Ordering::Equal) => Zone::RootExact,
                    (Ordering::Equal, _) => Zone::RootLeftExact,
                    (_, Ordering::Equal) => Zone::RootRightExact,
                    _ => Zone::Root,
                };
                self.push(node, zone);
                return;
            }
        }
    }
}

fn against_lower<K, C: Comparator<K>>(key: &K, cmp: &C, lower: Bound<&K>) -> Zone {
    match lower {
        Bound::Unbounded => Zone::Inside,
        Bound::Included(lo) | Bound::Excluded(lo) => match cmp.compare(key, lo) {
            Ordering::Less => Zone::LeftEdgeOutside,
            Ordering::Equal => Zone::LeftExact,
            Ordering::Greater => Zone::LeftEdgeInside,
        },
    }
}

fn against_upper<K, C: Comparator<K>>(key: &K, cmp: &C, upper: Bound<&K>) -> Zone {
    match upper {
        Bound::Unbounded => Zone::Inside,
        Bound::Included(hi) | Bound::Excluded(hi) => match cmp.compare(key, hi) {
            Ordering::Less => Zone::RightEdgeInside,
            Ordering::Equal => Zone::RightExact,
            Ordering::Greater => Zone::RightEdgeOutside,
        },
    }
}

// Zone of a left child, or `None` if its subtree cannot intersect the bounds.
fn left_zone<K, C: Comparator<K>>(parent: Zone, key: &K, cmp: &C, lower: Bound<&K>, upper: Bound<&K>) -> Option<Zone> {
    match parent {
        Zone::Inside | Zone::RightEdgeInside | Zone::RightExact => Some(Zone::Inside),
        Zone::Root | Zone::RootRightExact | Zone::LeftEdgeInside => Some(against_lower(key, cmp, lower)),
        Zone::RightEdgeOutside => Some(against_upper(key, cmp, upper)),
        Zone::RootExact | Zone::RootLeftExact | Zone::LeftEdgeOutside | Zone::LeftExact => None,
    }
}

fn right_zone<K, C: Comparator<K>>(parent: Zone, key: &K, cmp: &C, lower: Bound<&K>, upper: Bound<&K>) -> Option<Zone> {
    match parent {
        Zone::Inside | Zone::LeftEdgeInside | Zone::LeftExact => Some(Zone::Inside),
        Zone::Root | Zone::RootLeftExact | Zone::RightEdgeInside => Some(against_upper(key, cmp, upper)),
        Zone::LeftEdgeOutside => Some(against_lower(key, cmp, lower)),
        Zone::RootExact | Zone::RootRightExact | Zone::RightEdgeOutside | Zone::RightExact => None,
    }
}

fn reports<K>(zone: Zone, lower: Bound<&K>, upper: Bound<&K>) -> bool {
    match zone {
        Zone::LeftEdgeOutside | Zone::RightEdgeOutside => false,
        Zone::LeftExact => matches!(lower, Bound::Included(_)),
        Zone::RightExact => matches!(upper, Bound::Included(_)),
        _ => true,
    }
}
