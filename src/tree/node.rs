//! Tree node types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Board;

/// Index of a node inside a [`MoveTree`](super::MoveTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One distinct board state reached along a played line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardNode {
    /// Board at this point of the line.
    pub(crate) state: Board,
    /// Cell this player chose to reach `state`; `None` for the root and for
    /// states recorded from the opponent's move.
    pub(crate) move_played: Option<usize>,
    /// Sum of outcome deltas over every episode that passed through here.
    pub(crate) score: i64,
    /// Children in creation order.
    pub(crate) children: Vec<NodeId>,
    /// Upward link, only followed during backpropagation.
    pub(crate) parent: Option<NodeId>,
}

impl BoardNode {
    pub(crate) fn root() -> Self {
        Self {
            state: Board::new(),
            move_played: None,
            score: 0,
            children: Vec::new(),
            parent: None,
        }
    }

    pub(crate) fn child(parent: NodeId, state: Board, move_played: Option<usize>) -> Self {
        Self {
            state,
            move_played,
            score: 0,
            children: Vec::new(),
            parent: Some(parent),
        }
    }

    pub fn state(&self) -> &Board {
        &self.state
    }

    pub fn move_played(&self) -> Option<usize> {
        self.move_played
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// True when this node was reached by the owning player's own choice
    pub fn is_own_move(&self) -> bool {
        self.move_played.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
