//! Turn-alternating game driver

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    Error, Result,
    ports::{Observer, Player},
    tictactoe::{Board, GameOutcome, GameRecord, Move, Symbol},
};

/// How many rejected moves in a row a player may propose before the game is
/// abandoned. `None` keeps asking forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_invalid_moves: Option<usize>,
}

impl RetryPolicy {
    /// Keep asking until the player proposes a legal move
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn capped(max_invalid_moves: usize) -> Self {
        Self {
            max_invalid_moves: Some(max_invalid_moves),
        }
    }
}

/// Plays single games between two [`Player`]s.
///
/// The first player holds X and moves first. After every accepted move the
/// board is checked for a winner or a draw; once the game is decided both
/// players are told their result, first player first.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameLoop {
    retry: RetryPolicy,
}

impl GameLoop {
    pub fn new(retry: RetryPolicy) -> Self {
        Self { retry }
    }

    /// Play one game, see [`play_game`](Self::play_game).
    pub fn play(
        &self,
        first: &mut dyn Player,
        second: &mut dyn Player,
        observers: &mut [Box<dyn Observer>],
    ) -> Result<GameRecord> {
        self.play_game(0, first, second, observers)
    }

    /// Play one game numbered `game_num` for the observers.
    ///
    /// When a player fails, both players are told to abandon the game before
    /// the error is returned, so both can start the next game cleanly.
    ///
    /// # Errors
    ///
    /// Any error from a player or observer, and
    /// [`Error::RetryLimitExceeded`] when the retry policy runs out.
    pub fn play_game(
        &self,
        game_num: usize,
        first: &mut dyn Player,
        second: &mut dyn Player,
        observers: &mut [Box<dyn Observer>],
    ) -> Result<GameRecord> {
        let result = self.run_game(game_num, first, second, observers);
        if result.is_err() {
            first.abandon_game();
            second.abandon_game();
        }
        result
    }

    fn run_game(
        &self,
        game_num: usize,
        first: &mut dyn Player,
        second: &mut dyn Player,
        observers: &mut [Box<dyn Observer>],
    ) -> Result<GameRecord> {
        for observer in observers.iter_mut() {
            observer.on_game_start(game_num)?;
        }

        let mut board = Board::new();
        let mut moves = Vec::new();
        let mut symbol = Symbol::X;

        let outcome = loop {
            let player: &mut dyn Player = match symbol {
                Symbol::X => &mut *first,
                Symbol::O => &mut *second,
            };
            let position = self.accept_move(player, &mut board, symbol)?;
            moves.push(Move { position, symbol });

            for observer in observers.iter_mut() {
                observer.on_move(
                    game_num,
                    moves.len() - 1,
                    player.name(),
                    symbol,
                    position,
                    &board,
                )?;
            }

            if let Some(outcome) = GameOutcome::from_board(&board) {
                break outcome;
            }
            symbol = symbol.opponent();
        };

        first.report_winner(&board, outcome.for_symbol(Symbol::X))?;
        second.report_winner(&board, outcome.for_symbol(Symbol::O))?;
        debug!(game_num, %outcome, plies = moves.len(), "game finished");

        let record = GameRecord {
            moves,
            final_board: board,
            outcome,
        };
        for observer in observers.iter_mut() {
            observer.on_game_end(game_num, &record)?;
        }
        Ok(record)
    }

    /// Ask `player` for moves until the board accepts one.
    fn accept_move(
        &self,
        player: &mut dyn Player,
        board: &mut Board,
        symbol: Symbol,
    ) -> Result<usize> {
        let mut rejected = 0;
        loop {
            let position = player.get_move(board, symbol)?;
            match board.set_move(position, symbol) {
                Ok(()) => return Ok(position),
                Err(err @ (Error::InvalidMove { .. } | Error::InvalidPosition { .. })) => {
                    rejected += 1;
                    warn!(player = player.name(), position, rejected, "move rejected: {err}");
                    if self.retry.max_invalid_moves.is_some_and(|max| rejected >= max) {
                        return Err(Error::RetryLimitExceeded {
                            player: player.name().to_string(),
                            attempts: rejected,
                        });
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }
}
