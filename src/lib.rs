//! Ordered maps over binary search trees with pluggable balancing.
//!
//! This crate provides [`SearchTree`], an ordered key/value map over a binary search tree whose
//! shape is maintained by a [`Balance`] strategy chosen at the type level:
//!
//! - [`BinarySearchTree`] - never rebalances
//! - [`AvlTree`] - height-balanced, rotations after every insert and removal
//! - [`ScapegoatTree`] - weight-balanced, rebuilds an unbalanced subtree wholesale
//! - [`SplayTree`] - self-adjusting, moves every accessed node to the root
//!
//! All four share one search, insert, remove and traversal engine; the strategy only reacts
//! to the path each operation walked. Keys are ordered by a [`Comparator`], either the key's own
//! [`Ord`] ([`Natural`]) or any `Fn(&K, &K) -> Ordering`.
//!
//! # Example
//!
//! ```
//! use balanced_bst::{AvlTree, RangeFlags, TraversalOrder};
//!
//! let mut scores = AvlTree::new();
//! scores.set("Alice", 100);
//! scores.set("Bob", 85);
//! scores.set("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Ok(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Closest-key lookups
//! assert_eq!(scores.try_left_closest_key_value(&"Bz"), Some((&"Bob", &85)));
//! assert_eq!(scores.try_right_closest_key_value(&"Bz"), Some((&"Carol", &92)));
//!
//! // Range queries with explicit bound handling, in any traversal order
//! let names: Vec<_> = scores
//!     .range_query(&"Alice", &"Carol", RangeFlags::INCLUDE_RIGHT, TraversalOrder::InOrder, true)
//!     .map(|(name, _)| *name)
//!     .collect();
//! assert_eq!(names, ["Carol", "Bob"]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Arena storage** - Nodes live in one slot vector and link to each other by handle
//! - **Pruned range queries** - Subtrees outside the bounds are never entered
//! - **`tracing`** (optional feature) - Emits rotation, splay and rebuild events
//!
//! # Implementation
//!
//! Nodes hold no parent pointers. Every mutating operation records the path it descended and
//! hands it to the strategy, which rotates or rebuilds bottom-up along that path. See the
//! [`balance`] module for writing a strategy of your own.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod order;
mod range;
mod raw;

pub mod balance;
pub mod compare;
pub mod error;
pub mod search_tree;

pub use balance::{Avl, Balance, Scapegoat, Splay, Unbalanced};
pub use compare::{Comparator, Natural};
pub use error::{Error, Result};
pub use order::TraversalOrder;
pub use range::RangeFlags;
pub use search_tree::{AvlTree, BinarySearchTree, ScapegoatTree, SearchTree, SplayTree};
