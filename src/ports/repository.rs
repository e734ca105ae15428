//! Repository port for trained-player persistence.
//!
//! This module defines the trait boundary between the domain and infrastructure
//! layers for storing and retrieving trained tree players.

use std::path::Path;

use crate::{Result, learner::SavedTreePlayer};

/// Port for persisting and loading trained tree players.
///
/// # Examples
///
/// ```no_run
/// use tictree::ports::TreeRepository;
/// use tictree::learner::SavedTreePlayer;
/// use std::path::Path;
///
/// fn save_player<R: TreeRepository>(
///     repo: &R,
///     saved: &SavedTreePlayer,
///     path: &Path,
/// ) -> tictree::Result<()> {
///     repo.save(saved, path)
/// }
/// ```
pub trait TreeRepository {
    /// Save a trained player to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization fails.
    fn save(&self, saved: &SavedTreePlayer, path: &Path) -> Result<()>;

    /// Load a trained player from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be read, the data is corrupt,
    /// or the save format version is unsupported.
    fn load(&self, path: &Path) -> Result<SavedTreePlayer>;
}
