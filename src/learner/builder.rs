//! Builder pattern for TreePlayer construction
//!
//! Provides a fluent API for configuring and creating tree-learning players.

use rand::{SeedableRng, rngs::StdRng};

use super::{scoring::ScoreDeltas, selection::SelectionMode, tree_player::TreePlayer};
use crate::{Error, Result, tree::MoveTree};

/// Builder for constructing [`TreePlayer`] instances with custom configuration.
///
/// # Examples
///
/// ```
/// use tictree::learner::{SelectionMode, TreePlayerBuilder};
///
/// // Defaults: explore mode, +2 / 0 / -4 deltas
/// let player = TreePlayerBuilder::new().build()?;
///
/// // Deterministic evaluation player
/// let player = TreePlayerBuilder::new()
///     .name("champion")
///     .seed(42)
///     .mode(SelectionMode::Exploit)
///     .build()?;
/// # Ok::<(), tictree::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct TreePlayerBuilder {
    name: Option<String>,
    seed: Option<u64>,
    mode: SelectionMode,
    deltas: ScoreDeltas,
    tree: Option<MoveTree>,
}

impl TreePlayerBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set all three outcome deltas at once.
    pub fn deltas(mut self, deltas: ScoreDeltas) -> Self {
        self.deltas = deltas;
        self
    }

    pub fn win_delta(mut self, value: i64) -> Self {
        self.deltas.win = value;
        self
    }

    pub fn draw_delta(mut self, value: i64) -> Self {
        self.deltas.draw = value;
        self
    }

    pub fn lose_delta(mut self, value: i64) -> Self {
        self.deltas.lose = value;
        self
    }

    /// Continue learning from a previously trained tree.
    pub fn tree(mut self, tree: MoveTree) -> Self {
        self.tree = Some(tree);
        self
    }

    /// Build the configured player.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidConfiguration`] when the deltas do not rank a win
    ///   above a draw above a loss.
    /// * [`Error::CorruptTree`] when a supplied tree breaks its invariants.
    pub fn build(self) -> Result<TreePlayer> {
        let ScoreDeltas { win, draw, lose } = self.deltas;
        if !(win > draw && draw > lose) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "score deltas must satisfy win > draw > lose, got {win} / {draw} / {lose}"
                ),
            });
        }

        let tree = match self.tree {
            Some(tree) => {
                tree.validate()?;
                tree
            }
            None => MoveTree::new(),
        };

        let name = self.name.unwrap_or_else(|| "tree".to_string());
        let mut player = TreePlayer::from_tree(name, tree);
        player.mode = self.mode;
        player.deltas = self.deltas;
        if let Some(seed) = self.seed {
            player.rng = StdRng::seed_from_u64(seed);
        }
        Ok(player)
    }
}
