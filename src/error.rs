//! Error types for the tictree crate

use thiserror::Error;

use crate::tictactoe::Symbol;

/// Main error type for the tictree crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: position {position} is already occupied")]
    InvalidMove { position: usize },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("board string must hold {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("received an empty board while an episode is still being tracked")]
    EpisodeInProgress,

    #[error("no episode is being tracked: {operation} requires a current node")]
    NoActiveEpisode { operation: String },

    #[error("player learned as {learned} and cannot be asked to play {requested}")]
    SeatChanged { learned: Symbol, requested: Symbol },

    #[error("board does not match tree node: expected '{expected}', got '{actual}'")]
    BoardMismatch { expected: String, actual: String },

    #[error("board '{actual}' is not a single placement after '{previous}'")]
    InconsistentBoard { previous: String, actual: String },

    #[error("node '{state}' has every move explored but no child to exploit")]
    NoExploitableChild { state: String },

    #[error("corrupt move tree: {message}")]
    CorruptTree { message: String },

    #[error("player '{player}' proposed {attempts} invalid moves in a row")]
    RetryLimitExceeded { player: String, attempts: usize },

    #[error("input closed before a move was entered")]
    InputClosed,

    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

impl Error {
    /// Whether the error signals a broken internal invariant rather than bad input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Error::EpisodeInProgress
                | Error::NoActiveEpisode { .. }
                | Error::SeatChanged { .. }
                | Error::BoardMismatch { .. }
                | Error::InconsistentBoard { .. }
                | Error::NoExploitableChild { .. }
                | Error::CorruptTree { .. }
        )
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
