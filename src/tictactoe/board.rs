//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The symbol occupying this cell, if any
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::X => Some(Symbol::X),
            Cell::O => Some(Symbol::O),
            Cell::Empty => None,
        }
    }
}

/// The mark a player places on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Get the opponent symbol
    pub fn opponent(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    /// Convert symbol to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Symbol::X => Cell::X,
            Symbol::O => Cell::O,
        }
    }

    pub fn to_char(self) -> char {
        self.to_cell().to_char()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Grid contents of a game in progress.
///
/// Equality and hashing consider the cells only, so two boards reached through
/// different move orders compare equal. The type is `Copy`; every mutation is
/// either explicit ([`Board::set_move`]) or produces a new value
/// ([`Board::with_move`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from a string representation.
    ///
    /// Line breaks and tabs are ignored, so both `"XO......."` and the
    /// multi-line [`Display`](fmt::Display) rendering parse. A space counts as
    /// an empty cell.
    ///
    /// # Errors
    ///
    /// Returns error unless exactly 9 cell characters are present, or if any
    /// character is not a valid cell representation.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !matches!(c, '\n' | '\r' | '\t')).collect();
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Self { cells })
    }

    /// Raw cell contents
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Get cell at position (0-8)
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] for positions outside the board.
    pub fn get_cell(&self, pos: usize) -> Result<Cell, crate::Error> {
        self.cells
            .get(pos)
            .copied()
            .ok_or(crate::Error::InvalidPosition { position: pos })
    }

    /// Check if a position is on the board and empty
    pub fn is_cell_empty(&self, pos: usize) -> bool {
        self.cells.get(pos) == Some(&Cell::Empty)
    }

    /// Place `symbol` at `pos`.
    ///
    /// # Errors
    ///
    /// Fails when the position is out of range or already occupied; the
    /// board is left unchanged in both cases.
    pub fn set_move(&mut self, pos: usize, symbol: Symbol) -> Result<(), crate::Error> {
        match self.cells.get(pos) {
            None => Err(crate::Error::InvalidPosition { position: pos }),
            Some(Cell::Empty) => {
                self.cells[pos] = symbol.to_cell();
                Ok(())
            }
            Some(_) => Err(crate::Error::InvalidMove { position: pos }),
        }
    }

    /// Copy of this board with `symbol` placed at `pos`
    #[must_use = "with_move returns a new board; the original is unchanged"]
    pub fn with_move(&self, pos: usize, symbol: Symbol) -> Result<Board, crate::Error> {
        let mut next = *self;
        next.set_move(pos, symbol)?;
        Ok(next)
    }

    /// True when no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == Cell::Empty)
    }

    /// True when every cell is occupied
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Get all empty positions
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check if a symbol has three in a row
    pub fn has_won(&self, symbol: Symbol) -> bool {
        LineAnalyzer::has_won(&self.cells, symbol)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Symbol> {
        if self.has_won(Symbol::X) {
            Some(Symbol::X)
        } else if self.has_won(Symbol::O) {
            Some(Symbol::O)
        } else {
            None
        }
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Locate the single placement that turns `self` into `next`.
    ///
    /// Returns the position and the cell placed there when `next` equals
    /// `self` plus exactly one mark on a previously empty cell, and `None`
    /// otherwise (identical boards, several changes, or an overwritten mark).
    pub fn single_placement(&self, next: &Board) -> Option<(usize, Cell)> {
        let mut placement = None;
        for (pos, (&before, &after)) in self.cells.iter().zip(next.cells.iter()).enumerate() {
            if before == after {
                continue;
            }
            if before != Cell::Empty || after == Cell::Empty || placement.is_some() {
                return None;
            }
            placement = Some((pos, after));
        }
        placement
    }

    /// Compact one-line encoding, e.g. `"XO..X...."`
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    /// Render the grid with empty cells replaced by their index.
    ///
    /// Used when prompting a human, so the free positions can be read off
    /// the board directly.
    pub fn render_with_guide(&self) -> String {
        let mut out = String::with_capacity(3 * 12);
        for row in 0..3 {
            let line: Vec<String> = (0..3)
                .map(|col| {
                    let pos = row * 3 + col;
                    match self.cells[pos] {
                        Cell::Empty => pos.to_string(),
                        cell => cell.to_char().to_string(),
                    }
                })
                .collect();
            out.push_str(&line.join(" | "));
            if row < 2 {
                out.push_str("\n--+---+--\n");
            }
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
