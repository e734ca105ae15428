//! Tree-learning player and its building blocks
//!
//! [`TreePlayer`] composes the [`MoveTree`](crate::tree::MoveTree), the
//! move-selection engine and outcome backpropagation behind the
//! [`Player`](crate::ports::Player) port. Baseline players live alongside it.

pub mod baseline;
pub mod builder;
pub mod scoring;
pub mod selection;
pub mod serialization;
pub mod tree_player;

pub use baseline::{ConsolePlayer, RandomPlayer};
pub use builder::TreePlayerBuilder;
pub use scoring::ScoreDeltas;
pub use selection::{SelectionMode, select_move};
pub use serialization::{SavedTreePlayer, TrainingMetadata};
pub use tree_player::TreePlayer;
