//! Player serialization support
//!
//! Provides save/load functionality for trained tree players.

use serde::{Deserialize, Serialize};

use super::{scoring::ScoreDeltas, selection::SelectionMode, tree_player::TreePlayer};
use crate::{Error, Result, tree::MoveTree};

/// Serializable representation of a trained tree player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTreePlayer {
    /// Version of the save format (for future compatibility)
    pub version: u32,
    /// The learned tree with its scores
    pub tree: MoveTree,
    /// Outcome deltas used during training
    pub deltas: ScoreDeltas,
    /// Selection mode the player was saved in
    pub mode: SelectionMode,
    /// Training metadata
    pub metadata: TrainingMetadata,
}

/// Metadata about the training process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Total episodes scored by the player, across resumed runs
    pub games_trained: usize,
    /// Opponent(s) trained against
    pub opponents: Vec<String>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
}

impl SavedTreePlayer {
    /// Current save format version
    pub const VERSION: u32 = 1;

    /// Snapshot a player. Any running episode is not part of the snapshot.
    pub fn from_player(player: &TreePlayer, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            tree: player.tree().clone(),
            deltas: player.deltas(),
            mode: player.mode(),
            metadata,
        }
    }

    /// Reconstruct a player from saved data.
    ///
    /// # Errors
    ///
    /// * [`Error::UnsupportedVersion`] for an unknown save format.
    /// * [`Error::CorruptTree`] when the stored tree breaks its invariants.
    pub fn into_player(self, name: impl Into<String>) -> Result<TreePlayer> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }

        let mut player = TreePlayer::builder()
            .name(name)
            .mode(self.mode)
            .deltas(self.deltas)
            .tree(self.tree)
            .build()?;
        player.episodes_completed = self.metadata.games_trained;
        Ok(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ports::Player,
        tictactoe::{Board, Outcome, Symbol},
    };

    #[test]
    fn snapshot_restores_tree_and_settings() {
        let mut player = TreePlayer::builder()
            .seed(1)
            .mode(SelectionMode::Exploit)
            .build()
            .unwrap();
        player.get_move(&Board::new(), Symbol::X).unwrap();
        player
            .report_winner(&Board::from_string("X...O....").unwrap(), Outcome::Draw)
            .unwrap();

        let metadata = TrainingMetadata {
            games_trained: player.episodes_completed(),
            ..TrainingMetadata::default()
        };
        let saved = SavedTreePlayer::from_player(&player, metadata);
        let restored = saved.into_player("restored").unwrap();

        assert_eq!(restored.tree(), player.tree());
        assert_eq!(restored.mode(), SelectionMode::Exploit);
        assert_eq!(restored.episodes_completed(), 1);
        assert!(!restored.is_tracking());
    }

    #[test]
    fn rejects_unknown_version() {
        let player = TreePlayer::new("p");
        let mut saved = SavedTreePlayer::from_player(&player, TrainingMetadata::default());
        saved.version = 7;
        assert!(matches!(
            saved.into_player("p"),
            Err(Error::UnsupportedVersion { found: 7, expected: 1 })
        ));
    }
}
