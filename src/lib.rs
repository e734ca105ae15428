//! Self-play tree learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - A Tic-Tac-Toe board with win and draw detection
//! - A deduplicating tree of every board a player has reached, with scores
//!   accumulated from game outcomes
//! - A player that explores each continuation once before exploiting the
//!   best-scoring one
//! - A game loop, training pipeline and observers to drive it
//! - MessagePack persistence and a command-line interface

pub mod adapters;
pub mod cli;
pub mod error;
pub mod learner;
pub mod pipeline;
pub mod ports;
pub mod tictactoe;
pub mod tree;

pub use error::{Error, Result};
pub use learner::{
    RandomPlayer, SavedTreePlayer, ScoreDeltas, SelectionMode, TreePlayer, TreePlayerBuilder,
};
pub use ports::{Observer, Player, TreeRepository};
pub use tictactoe::{Board, Cell, GameOutcome, GameRecord, Outcome, Symbol};
pub use tree::{BoardNode, MoveTree, NodeId};
