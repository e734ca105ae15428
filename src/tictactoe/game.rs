//! Game outcomes and finished-game records

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Board, Symbol};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub symbol: Symbol,
}

/// Outcome of a game, as read off the final board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Symbol),
    Draw,
}

impl GameOutcome {
    /// Outcome of a terminal board, `None` while the game is still running
    pub fn from_board(board: &Board) -> Option<Self> {
        match board.winner() {
            Some(symbol) => Some(GameOutcome::Win(symbol)),
            None if board.is_full() => Some(GameOutcome::Draw),
            None => None,
        }
    }

    /// The result as seen by the player holding `symbol`
    pub fn for_symbol(self, symbol: Symbol) -> Outcome {
        match self {
            GameOutcome::Win(winner) if winner == symbol => Outcome::Win,
            GameOutcome::Win(_) => Outcome::Lose,
            GameOutcome::Draw => Outcome::Draw,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Win(symbol) => write!(f, "{symbol} wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// Result of a finished game from one player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Lose,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Win => "win",
            Outcome::Draw => "draw",
            Outcome::Lose => "lose",
        };
        f.write_str(label)
    }
}

/// A complete game with history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub final_board: Board,
    pub outcome: GameOutcome,
}

impl GameRecord {
    /// Number of plies in the game
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Replay the move list from an empty board.
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the state it is
    /// applied to. This indicates corrupted game data.
    pub fn replay(&self) -> Result<Vec<Board>, crate::Error> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut board = Board::new();
        states.push(board);
        for mv in &self.moves {
            board.set_move(mv.position, mv.symbol)?;
            states.push(board);
        }
        Ok(states)
    }
}
