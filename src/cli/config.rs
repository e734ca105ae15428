//! Shared configuration types for CLI commands

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::pipeline::Seat;

/// Common configuration shared across commands
#[derive(Args, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonConfig {
    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

/// Opponent a tree player is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    /// Uniform random moves
    Random,
    /// A second, independent tree player
    #[value(name = "self")]
    #[serde(rename = "self")]
    SelfPlay,
}

impl OpponentKind {
    pub fn label(self) -> &'static str {
        match self {
            OpponentKind::Random => "random",
            OpponentKind::SelfPlay => "self",
        }
    }
}

/// Command-line spelling of [`Seat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeatArg {
    First,
    Second,
}

impl From<SeatArg> for Seat {
    fn from(arg: SeatArg) -> Self {
        match arg {
            SeatArg::First => Seat::First,
            SeatArg::Second => Seat::Second,
        }
    }
}
