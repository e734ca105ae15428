//! Observer port - abstraction for game and training observation
//!
//! This port defines the interface for observing games as they are played,
//! allowing composable data collection without coupling the game loop to
//! specific output formats or metrics.

use crate::{
    Result,
    tictactoe::{Board, GameRecord, Symbol},
};

/// Observer trait for monitoring games and training runs
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - Once per training run
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - For each accepted move
///    - `on_game_end(game_num, record)`
/// 3. `on_training_end()` - Once at the end
///
/// A single game played outside a training run only produces the per-game
/// events.
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts, with the empty board already in place.
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move has been accepted by the board.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the current game
    /// * `step_num` - Ply number within the game (0-based)
    /// * `player` - Name of the player that moved
    /// * `symbol` - Symbol that was placed
    /// * `position` - Cell (0-8) that was marked
    /// * `board` - Board after the move
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _player: &str,
        _symbol: Symbol,
        _position: usize,
        _board: &Board,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once the game is decided and both players have been told.
    fn on_game_end(&mut self, _game_num: usize, _record: &GameRecord) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
