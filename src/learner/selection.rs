//! Move-selection engine.
//!
//! Selection runs in two phases at every node. While some legal cell has no
//! own-move child yet, the smallest such cell is returned, so each node grows
//! one child per legal continuation before any score is consulted. Once every
//! legal cell is covered, [`SelectionMode`] decides between a random revisit
//! and the best-scoring child.

use std::fmt;

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tictactoe::CELL_COUNT,
    tree::{MoveTree, NodeId},
};

/// Policy applied once every legal continuation of a node has been tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Revisit a uniformly random known continuation.
    #[default]
    Explore,
    /// Play the continuation with the greatest accumulated score.
    Exploit,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Explore => f.write_str("explore"),
            SelectionMode::Exploit => f.write_str("exploit"),
        }
    }
}

/// Cells unavailable for exploration at `node`: occupied in its state or
/// already chosen by this player from it.
pub fn settled_cells(tree: &MoveTree, node: NodeId) -> [bool; CELL_COUNT] {
    let state = tree.get(node).state();
    let mut settled = [false; CELL_COUNT];
    for (position, slot) in settled.iter_mut().enumerate() {
        *slot = !state.is_cell_empty(position);
    }
    for (_, child) in tree.children(node) {
        if let Some(position) = child.move_played() {
            settled[position] = true;
        }
    }
    settled
}

/// Smallest legal cell of `node` that this player has not tried yet.
pub fn first_unexplored(tree: &MoveTree, node: NodeId) -> Option<usize> {
    settled_cells(tree, node).iter().position(|&settled| !settled)
}

/// Pick the next cell to play from `node`.
///
/// # Errors
///
/// * [`Error::NoValidMoves`] when the node's board has no empty cell.
/// * [`Error::NoExploitableChild`] when every legal cell is settled but no
///   own-move child exists to choose from.
pub fn select_move<R: Rng + ?Sized>(
    tree: &MoveTree,
    node: NodeId,
    mode: SelectionMode,
    rng: &mut R,
) -> Result<usize> {
    let state = tree.get(node).state();
    if state.is_full() {
        return Err(Error::NoValidMoves);
    }
    if let Some(position) = first_unexplored(tree, node) {
        return Ok(position);
    }

    let candidates: Vec<(usize, i64)> = tree
        .children(node)
        .filter_map(|(_, child)| child.move_played().map(|played| (played, child.score())))
        .collect();

    let chosen = match mode {
        SelectionMode::Explore => candidates.choose(rng).map(|&(position, _)| position),
        SelectionMode::Exploit => best_candidate(&candidates),
    };
    chosen.ok_or_else(|| Error::NoExploitableChild {
        state: state.encode(),
    })
}

/// First candidate holding the maximum score.
fn best_candidate(candidates: &[(usize, i64)]) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for &(position, score) in candidates {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((position, score));
        }
    }
    best.map(|(position, _)| position)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::tictactoe::{Board, Symbol};

    fn fully_explored_root(scores: [i64; CELL_COUNT]) -> MoveTree {
        let mut tree = MoveTree::new();
        let root = tree.root();
        for (position, score) in scores.into_iter().enumerate() {
            let child = tree
                .record_own_move(root, &Board::new(), position, Symbol::X)
                .unwrap();
            tree.backpropagate(child, score);
        }
        tree
    }

    #[test]
    fn explores_smallest_free_cell_first() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            select_move(&tree, root, SelectionMode::Exploit, &mut rng).unwrap(),
            0
        );
        tree.record_own_move(root, &Board::new(), 0, Symbol::X)
            .unwrap();
        tree.record_own_move(root, &Board::new(), 2, Symbol::X)
            .unwrap();
        assert_eq!(
            select_move(&tree, root, SelectionMode::Exploit, &mut rng).unwrap(),
            1
        );
    }

    #[test]
    fn occupied_cells_are_settled() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let node = tree
            .record_opponent_move(root, &Board::from_string("X........").unwrap())
            .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_move(&tree, node, SelectionMode::Explore, &mut rng).unwrap(),
            1
        );
    }

    #[test]
    fn opponent_children_do_not_settle_cells() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        tree.record_opponent_move(root, &Board::from_string("X........").unwrap())
            .unwrap();
        assert_eq!(first_unexplored(&tree, root), Some(0));
    }

    #[test]
    fn exploit_picks_highest_score() {
        let tree = fully_explored_root([0, -4, 2, 6, 0, 2, -8, 0, 4]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_move(&tree, tree.root(), SelectionMode::Exploit, &mut rng).unwrap(),
            3
        );
    }

    #[test]
    fn exploit_breaks_ties_by_creation_order() {
        let tree = fully_explored_root([-4, 2, -4, -4, 2, -4, -4, -4, -4]);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(
                select_move(&tree, tree.root(), SelectionMode::Exploit, &mut rng).unwrap(),
                1
            );
        }
    }

    #[test]
    fn explore_returns_known_continuation() {
        let tree = fully_explored_root([0; CELL_COUNT]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; CELL_COUNT];
        for _ in 0..200 {
            let position =
                select_move(&tree, tree.root(), SelectionMode::Explore, &mut rng).unwrap();
            seen[position] = true;
        }
        assert!(seen.iter().all(|&s| s), "explore should revisit every child");
    }

    #[test]
    fn full_board_has_no_moves() {
        let mut tree = MoveTree::new();
        let root = tree.root();
        let mut node = root;
        let mut board = Board::new();
        for (position, symbol) in [
            (0, Symbol::X),
            (1, Symbol::O),
            (2, Symbol::X),
            (4, Symbol::O),
            (3, Symbol::X),
            (5, Symbol::O),
            (7, Symbol::X),
            (6, Symbol::O),
            (8, Symbol::X),
        ] {
            node = tree.record_own_move(node, &board, position, symbol).unwrap();
            board.set_move(position, symbol).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(1);
        let err = select_move(&tree, node, SelectionMode::Exploit, &mut rng).unwrap_err();
        assert!(matches!(err, Error::NoValidMoves));
    }

    #[test]
    fn best_candidate_of_nothing_is_none() {
        assert_eq!(best_candidate(&[]), None);
    }
}
