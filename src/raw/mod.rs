mod arena;
mod handle;
mod links;
mod node;
mod path;
mod raw_tree;
mod rotate;
mod walk;

pub use handle::NodeId;
pub use links::Links;
pub use node::Position;
pub use path::{AncestorPath, PathEntry};

pub(crate) use raw_tree::{Inserted, RawTree, Target};
pub(crate) use walk::Walk;

#[cfg(test)]
pub(crate) use raw_tree::tests;
