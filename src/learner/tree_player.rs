//! Tree-learning player.
//!
//! A [`TreePlayer`] walks and extends its [`MoveTree`] as a game unfolds,
//! tracking the node for the current board in `current`. Between games
//! `current` is `None` (idle); the first `get_move` of a game sets it to the
//! root and every later call advances it. `report_winner` scores the path
//! walked and returns the player to idle.
//!
//! A player is bound to the symbol of its first own move. Scores along the
//! tree only mean something from one side of the board, so a request to play
//! the other symbol is refused with [`Error::SeatChanged`].

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, trace};

use super::{
    scoring::ScoreDeltas,
    selection::{SelectionMode, select_move},
};
use crate::{
    Error, Result,
    ports::Player,
    tictactoe::{Board, Outcome, Symbol},
    tree::{MoveTree, NodeId},
};

/// Player that learns from self-play by scoring the states it reaches.
#[derive(Debug, Clone)]
pub struct TreePlayer {
    pub(crate) name: String,
    pub(crate) tree: MoveTree,
    pub(crate) current: Option<NodeId>,
    pub(crate) symbol: Option<Symbol>,
    pub(crate) mode: SelectionMode,
    pub(crate) deltas: ScoreDeltas,
    pub(crate) rng: StdRng,
    pub(crate) episodes_completed: usize,
}

impl TreePlayer {
    /// Create a player with an empty tree, default deltas and an entropy-seeded RNG.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_tree(name, MoveTree::new())
    }

    /// Create a player around an existing tree, bound to the symbol the tree
    /// was grown with.
    pub fn from_tree(name: impl Into<String>, tree: MoveTree) -> Self {
        let symbol = tree.own_symbol();
        Self {
            name: name.into(),
            tree,
            current: None,
            symbol,
            mode: SelectionMode::default(),
            deltas: ScoreDeltas::default(),
            rng: StdRng::from_rng(&mut rand::rng()),
            episodes_completed: 0,
        }
    }

    /// Start building a customized player.
    pub fn builder() -> super::builder::TreePlayerBuilder {
        super::builder::TreePlayerBuilder::new()
    }

    pub fn tree(&self) -> &MoveTree {
        &self.tree
    }

    /// Consume the player, keeping only what it learned.
    pub fn into_tree(self) -> MoveTree {
        self.tree
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// Symbol this player learns with, `None` before its first move.
    pub fn symbol(&self) -> Option<Symbol> {
        self.symbol
    }

    pub fn deltas(&self) -> ScoreDeltas {
        self.deltas
    }

    /// Number of games scored through `report_winner`
    pub fn episodes_completed(&self) -> usize {
        self.episodes_completed
    }

    /// Node of the board last seen in the running game, `None` when idle.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn is_tracking(&self) -> bool {
        self.current.is_some()
    }

    /// Replace the random number generator with one seeded from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Forget the running game without scoring it.
    ///
    /// Nodes created during the game stay in the tree.
    pub fn abandon_episode(&mut self) {
        if let Some(node) = self.current.take() {
            debug!(player = %self.name, node = %node, "abandoned episode");
        }
    }

    /// Bring `current` up to date with `board`, entering tracking if idle.
    fn sync_with(&mut self, board: &Board) -> Result<NodeId> {
        let root = self.tree.root();
        match self.current {
            Some(_) if board.is_empty() => Err(Error::EpisodeInProgress),
            None if board.is_empty() => Ok(root),
            None => self.tree.record_opponent_move(root, board),
            Some(node) => self.tree.record_opponent_move(node, board),
        }
    }
}

impl Player for TreePlayer {
    fn get_move(&mut self, board: &Board, symbol: Symbol) -> Result<usize> {
        match self.symbol {
            Some(learned) if learned != symbol => {
                return Err(Error::SeatChanged {
                    learned,
                    requested: symbol,
                });
            }
            Some(_) => {}
            None => self.symbol = Some(symbol),
        }
        let node = self.sync_with(board)?;
        self.current = Some(node);

        let position = select_move(&self.tree, node, self.mode, &mut self.rng)?;
        let next = self.tree.record_own_move(node, board, position, symbol)?;
        self.current = Some(next);

        trace!(player = %self.name, from = %node, to = %next, position, "selected move");
        Ok(position)
    }

    fn report_winner(&mut self, board: &Board, outcome: Outcome) -> Result<()> {
        let node = self.current.ok_or_else(|| Error::NoActiveEpisode {
            operation: "report_winner".to_string(),
        })?;
        let last = self.tree.record_opponent_move(node, board)?;

        let delta = self.deltas.delta(outcome);
        self.tree.backpropagate(last, delta);
        self.current = None;
        self.episodes_completed += 1;

        debug!(
            player = %self.name,
            %outcome,
            delta,
            episodes = self.episodes_completed,
            nodes = self.tree.node_count(),
            "episode scored"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.reseed(seed);
        Ok(())
    }

    fn abandon_game(&mut self) {
        self.abandon_episode();
    }
}
