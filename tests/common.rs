//! Common test players for the tictree test suite.

#![allow(dead_code)]

use tictree::{Board, Error, Outcome, Player, Result, Symbol};

/// Always plays the smallest empty cell.
pub struct FirstFreePlayer;

impl Player for FirstFreePlayer {
    fn get_move(&mut self, board: &Board, _symbol: Symbol) -> Result<usize> {
        board
            .empty_positions()
            .first()
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn report_winner(&mut self, _board: &Board, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "first-free"
    }
}

/// Plays a fixed list of cells, then falls back to the smallest empty cell.
pub struct ScriptedPlayer {
    cells: Vec<usize>,
    next: usize,
}

impl ScriptedPlayer {
    pub fn new(cells: &[usize]) -> Self {
        Self {
            cells: cells.to_vec(),
            next: 0,
        }
    }
}

impl Player for ScriptedPlayer {
    fn get_move(&mut self, board: &Board, symbol: Symbol) -> Result<usize> {
        match self.cells.get(self.next) {
            Some(&cell) => {
                self.next += 1;
                Ok(cell)
            }
            None => FirstFreePlayer.get_move(board, symbol),
        }
    }

    fn report_winner(&mut self, _board: &Board, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Check that no node has two children with equal boards and that every
/// child differs from its parent in exactly one cell, the recorded one for
/// the owner's own moves.
pub fn assert_tree_shape(tree: &tictree::MoveTree) {
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        let parent = tree.get(id);
        let mut seen = std::collections::HashSet::new();
        for (child_id, child) in tree.children(id) {
            assert!(seen.insert(*child.state()), "duplicate sibling under {id}");
            let (cell, _) = parent
                .state()
                .single_placement(child.state())
                .unwrap_or_else(|| panic!("{child_id} is not one placement after {id}"));
            if let Some(played) = child.move_played() {
                assert_eq!(played, cell, "{child_id} records the wrong cell");
            }
            stack.push(child_id);
        }
    }
}
