//! Player port - the two-call contract between a strategy and the game loop
//!
//! Every strategy the game loop can seat, whether the tree learner, the random
//! baseline or a human at the console, implements [`Player`]. The loop only
//! ever asks for a move and later reports the result; everything else about
//! the strategy stays behind this boundary.

use crate::{
    Result,
    tictactoe::{Board, Outcome, Symbol},
};

/// A participant in a game of Tic-Tac-Toe.
///
/// # Call sequence
///
/// For one game, the loop calls [`get_move`](Player::get_move) each time it is
/// this player's turn and then [`report_winner`](Player::report_winner) exactly
/// once with the final board. A player may be reused for any number of games.
///
/// # Examples
///
/// ```no_run
/// use tictree::{
///     ports::Player,
///     tictactoe::{Board, Outcome, Symbol},
/// };
///
/// struct FirstFree;
///
/// impl Player for FirstFree {
///     fn get_move(&mut self, board: &Board, _symbol: Symbol) -> tictree::Result<usize> {
///         board
///             .empty_positions()
///             .first()
///             .copied()
///             .ok_or(tictree::Error::NoValidMoves)
///     }
///
///     fn report_winner(&mut self, _board: &Board, _outcome: Outcome) -> tictree::Result<()> {
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "first-free"
///     }
/// }
/// ```
pub trait Player: Send {
    /// Choose the cell (0-8) to mark with `symbol` on `board`.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot produce a move, e.g. the board
    /// has no empty cell or the player's internal state is inconsistent with
    /// `board`.
    fn get_move(&mut self, board: &Board, symbol: Symbol) -> Result<usize>;

    /// Receive the final board and this player's result once the game ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the report contradicts the player's view of the game.
    fn report_winner(&mut self, board: &Board, outcome: Outcome) -> Result<()>;

    /// Get the player's name.
    ///
    /// Used for identification in summaries and logging.
    fn name(&self) -> &str;

    /// Seed the player's internal random number generator.
    ///
    /// Training pipelines call this method when supplied with a deterministic
    /// seed to ensure reproducible results. Deterministic players can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    /// Drop any per-game state after a game was aborted without a result.
    fn abandon_game(&mut self) {}
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn get_move(&mut self, board: &Board, symbol: Symbol) -> Result<usize> {
        (**self).get_move(board, symbol)
    }

    fn report_winner(&mut self, board: &Board, outcome: Outcome) -> Result<()> {
        (**self).report_winner(board, outcome)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        (**self).set_rng_seed(seed)
    }

    fn abandon_game(&mut self) {
        (**self).abandon_game()
    }
}
