//! MessagePack implementation of the tree repository.
//!
//! This adapter implements the TreeRepository port using rmp_serde for
//! compact binary serialization.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, learner::SavedTreePlayer, ports::TreeRepository};

/// MessagePack-based tree repository.
///
/// Loading checks the save format version and the tree invariants, so a
/// successfully loaded player never starts from a corrupt tree.
///
/// # Examples
///
/// ```no_run
/// use tictree::adapters::MsgPackRepository;
/// use tictree::learner::{SavedTreePlayer, TrainingMetadata, TreePlayer};
/// use tictree::ports::TreeRepository;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let player = TreePlayer::new("learner");
/// let saved = SavedTreePlayer::from_player(&player, TrainingMetadata::default());
///
/// repo.save(&saved, Path::new("trained.msgpack"))?;
/// let loaded = repo.load(Path::new("trained.msgpack"))?;
/// # Ok::<(), tictree::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl TreeRepository for MsgPackRepository {
    fn save(&self, saved: &SavedTreePlayer, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, saved).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize tree to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {path:?}"),
            source,
        })
    }

    fn load(&self, path: &Path) -> Result<SavedTreePlayer> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedTreePlayer = rmp_serde::decode::from_read(BufReader::new(file))
            .map_err(|e| Error::SerializationContext {
                operation: "deserialize tree from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        if saved.version != SavedTreePlayer::VERSION {
            return Err(Error::UnsupportedVersion {
                found: saved.version,
                expected: SavedTreePlayer::VERSION,
            });
        }
        saved.tree.validate()?;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        learner::{TrainingMetadata, TreePlayer},
        ports::Player,
        tictactoe::{Board, Outcome, Symbol},
    };

    fn trained() -> SavedTreePlayer {
        let mut player = TreePlayer::builder().seed(3).build().unwrap();
        player.get_move(&Board::new(), Symbol::X).unwrap();
        player
            .report_winner(&Board::from_string("X.......O").unwrap(), Outcome::Win)
            .unwrap();
        SavedTreePlayer::from_player(
            &player,
            TrainingMetadata {
                games_trained: 1,
                opponents: vec!["random".to_string()],
                seed: Some(3),
            },
        )
    }

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("tree.msgpack");

        let repo = MsgPackRepository::new();
        let saved = trained();

        repo.save(&saved, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_load_rejects_future_version() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("tree.msgpack");

        let mut saved = trained();
        saved.version = SavedTreePlayer::VERSION + 1;
        let repo = MsgPackRepository::new();
        repo.save(&saved, &file_path).unwrap();

        assert!(matches!(
            repo.load(&file_path),
            Err(Error::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_load_garbage_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("garbage.msgpack");
        std::fs::write(&file_path, b"not a tree").unwrap();

        let result = MsgPackRepository::new().load(&file_path);
        assert!(matches!(result, Err(Error::SerializationContext { .. })));
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = MsgPackRepository::new();
        let result = repo.load(Path::new("/tmp/nonexistent_tictree_12345.msgpack"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = MsgPackRepository::new();
        let result = repo.save(&trained(), Path::new("/invalid_dir_12345/file.msgpack"));
        assert!(result.is_err());
    }
}
