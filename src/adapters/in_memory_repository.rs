//! In-memory tree repository for testing.
//!
//! This adapter provides a pure in-memory implementation of TreeRepository,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, error::Error, learner::SavedTreePlayer, ports::TreeRepository};

/// In-memory repository for testing.
///
/// Stores MessagePack-encoded players in a shared HashMap keyed by path, so
/// the same encoding is exercised as with the file adapter.
///
/// # Examples
///
/// ```
/// use tictree::adapters::InMemoryRepository;
/// use tictree::learner::{SavedTreePlayer, TrainingMetadata, TreePlayer};
/// use tictree::ports::TreeRepository;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let saved = SavedTreePlayer::from_player(&TreePlayer::new("p"), TrainingMetadata::default());
///
/// repo.save(&saved, Path::new("player"))?;
/// let loaded = repo.load(Path::new("player"))?;
/// assert_eq!(loaded, saved);
/// # Ok::<(), tictree::Error>(())
/// ```
///
/// # Thread Safety
///
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the number of players currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored players.
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Check if a player exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(path.to_string_lossy().as_ref())
    }
}

impl TreeRepository for InMemoryRepository {
    fn save(&self, saved: &SavedTreePlayer, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();

        let bytes = rmp_serde::to_vec(saved).map_err(|e| Error::SerializationContext {
            operation: "serialize tree for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedTreePlayer> {
        let storage = self.storage();
        let bytes = storage
            .get(path.to_string_lossy().as_ref())
            .ok_or_else(|| Error::Io {
                operation: format!("load tree from in-memory storage at {path:?}"),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "key not found in memory",
                ),
            })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize tree from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}
