//! Loading and saving trained players from the command line

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::{
    adapters::MsgPackRepository,
    learner::{SavedTreePlayer, SelectionMode, TrainingMetadata, TreePlayer},
    pipeline::Seat,
    ports::TreeRepository,
};

/// Load a trained player from `path` and switch it to `mode`.
pub fn load_player(
    path: &Path,
    name: &str,
    mode: SelectionMode,
) -> Result<(TreePlayer, TrainingMetadata)> {
    let saved = MsgPackRepository::new()
        .load(path)
        .with_context(|| format!("failed to load model from {}", path.display()))?;
    let metadata = saved.metadata.clone();
    let mut player = saved
        .into_player(name)
        .with_context(|| format!("model {} cannot be restored", path.display()))?;
    player.set_mode(mode);
    Ok((player, metadata))
}

/// Save `player` with `metadata` to `path`.
pub fn save_player(player: &TreePlayer, metadata: TrainingMetadata, path: &Path) -> Result<()> {
    let saved = SavedTreePlayer::from_player(player, metadata);
    MsgPackRepository::new()
        .save(&saved, path)
        .with_context(|| format!("failed to save model to {}", path.display()))
}

/// Seat for `player` in a run: `requested` when given, otherwise the seat its
/// tree was grown from, otherwise `fallback`.
///
/// A tree only ever learns one side of the board, so asking a trained player
/// to take the other seat is an error.
pub fn resolve_seat(player: &TreePlayer, requested: Option<Seat>, fallback: Seat) -> Result<Seat> {
    let learned = player.symbol().map(Seat::of);
    match (requested, learned) {
        (Some(seat), Some(learned)) if seat != learned => {
            bail!("model learned from the {learned} seat and cannot play from the {seat} seat")
        }
        (Some(seat), _) => Ok(seat),
        (None, learned) => Ok(learned.unwrap_or(fallback)),
    }
}
