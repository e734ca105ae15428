//! Game driving and training pipeline
//!
//! This module provides:
//! - A turn-alternating game loop with a configurable retry policy
//! - A training pipeline that plays many games and counts results
//! - Observers recording what happens during play

pub mod game_loop;
pub mod observers;
pub mod training;

pub use game_loop::{GameLoop, RetryPolicy};
pub use observers::{
    GameLine, JsonlObserver, MetricsObserver, MetricsSummary, OutcomeTally, ProgressObserver,
    TranscriptObserver,
};
pub use training::{Seat, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Observer, Player};
