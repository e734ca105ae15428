//! Winning line analysis for Tic-Tac-Toe

use super::board::{Cell, Symbol};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a symbol has three in a row
    pub fn has_won(cells: &[Cell; 9], symbol: Symbol) -> bool {
        let target = symbol.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// The line completed by `symbol`, if any
    pub fn completed_line(cells: &[Cell; 9], symbol: Symbol) -> Option<[usize; 3]> {
        let target = symbol.to_cell();
        WINNING_LINES
            .iter()
            .find(|line| line.iter().all(|&idx| cells[idx] == target))
            .copied()
    }
}
