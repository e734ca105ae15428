//! Tic-Tac-Toe board, outcomes and game records

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Board, CELL_COUNT, Cell, Symbol};
pub use game::{GameOutcome, GameRecord, Move, Outcome};
pub use lines::{LineAnalyzer, WINNING_LINES};
