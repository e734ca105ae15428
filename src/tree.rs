//! Persistent game-state tree
//!
//! The tree records every distinct board this player has seen, rooted at the
//! empty board, and accumulates an outcome score on each node. It grows by one
//! node per previously unseen state and is kept for the player's lifetime.

pub mod arena;
pub mod node;

pub use arena::{MoveTree, PathToRoot, TreeStats};
pub use node::{BoardNode, NodeId};
