//! Training pipeline for tree players

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::game_loop::{GameLoop, RetryPolicy};
use crate::{
    Result,
    ports::{Observer, Player},
    tictactoe::{Outcome, Symbol},
};

/// Which side of the board the agent takes, for every game of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    /// Agent plays X and moves first
    #[default]
    First,
    /// Agent plays O
    Second,
}

impl Seat {
    /// Seat of the player holding `symbol`
    pub fn of(symbol: Symbol) -> Seat {
        match symbol {
            Symbol::X => Seat::First,
            Symbol::O => Seat::Second,
        }
    }

    /// Symbol played from this seat
    pub fn symbol(self) -> Symbol {
        match self {
            Seat::First => Symbol::X,
            Seat::Second => Symbol::O,
        }
    }

    pub fn opposite(self) -> Seat {
        Seat::of(self.symbol().opponent())
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::First => f.write_str("first"),
            Seat::Second => f.write_str("second"),
        }
    }
}

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training games
    pub num_games: usize,

    /// Random seed
    pub seed: Option<u64>,

    /// Seat taken by the agent
    pub agent_seat: Seat,

    /// Retry policy for rejected moves
    pub retry: RetryPolicy,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 500,
            seed: None,
            agent_seat: Seat::First,
            retry: RetryPolicy::default(),
        }
    }
}

/// Result of a training run, counted from the agent's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total games played
    pub total_games: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(total_games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline for a single agent against an opponent
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run training with the given agent and opponent
    pub fn run(
        &mut self,
        agent: &mut dyn Player,
        opponent: &mut dyn Player,
    ) -> Result<TrainingResult> {
        self.seed_pair(agent, opponent)?;

        let game_loop = GameLoop::new(self.config.retry);
        let num_games = self.config.num_games;
        let milestone = (num_games / 10).max(1);
        let (mut wins, mut draws, mut losses) = (0, 0, 0);

        for observer in &mut self.observers {
            observer.on_training_start(num_games)?;
        }

        let agent_symbol = self.config.agent_seat.symbol();
        for game_num in 0..num_games {
            let record = match agent_symbol {
                Symbol::X => game_loop.play_game(game_num, agent, opponent, &mut self.observers)?,
                Symbol::O => game_loop.play_game(game_num, opponent, agent, &mut self.observers)?,
            };

            match record.outcome.for_symbol(agent_symbol) {
                Outcome::Win => wins += 1,
                Outcome::Draw => draws += 1,
                Outcome::Lose => losses += 1,
            }

            if (game_num + 1).is_multiple_of(milestone) {
                info!(
                    games = game_num + 1,
                    total = num_games,
                    wins,
                    draws,
                    losses,
                    "training progress"
                );
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(num_games, wins, draws, losses))
    }

    fn seed_pair(&self, agent: &mut dyn Player, opponent: &mut dyn Player) -> Result<()> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
            opponent.set_rng_seed(seed.wrapping_add(1))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learner::{RandomPlayer, TreePlayer};

    #[test]
    fn test_training_pipeline() {
        let config = TrainingConfig {
            num_games: 10,
            seed: Some(42),
            ..TrainingConfig::default()
        };

        let mut pipeline = TrainingPipeline::new(config);
        let mut agent = RandomPlayer::new("Agent");
        let mut opponent = RandomPlayer::new("Opponent");

        let result = pipeline.run(&mut agent, &mut opponent).unwrap();

        assert_eq!(result.total_games, 10);
        assert_eq!(result.wins + result.draws + result.losses, 10);
    }

    #[test]
    fn seats_map_to_symbols() {
        assert_eq!(Seat::First.symbol(), Symbol::X);
        assert_eq!(Seat::Second.symbol(), Symbol::O);
        assert_eq!(Seat::of(Symbol::O), Seat::Second);
        assert_eq!(Seat::First.opposite(), Seat::Second);
    }

    #[test]
    fn tree_player_scores_every_game() {
        let config = TrainingConfig {
            num_games: 30,
            seed: Some(7),
            agent_seat: Seat::Second,
            ..TrainingConfig::default()
        };
        let mut agent = TreePlayer::new("tree");
        let mut opponent = RandomPlayer::new("random");
        TrainingPipeline::new(config)
            .run(&mut agent, &mut opponent)
            .unwrap();

        assert_eq!(agent.episodes_completed(), 30);
        assert_eq!(agent.symbol(), Some(Symbol::O));
        assert!(!agent.is_tracking());
        assert!(agent.tree().validate().is_ok());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = || {
            let config = TrainingConfig {
                num_games: 50,
                seed: Some(3),
                ..TrainingConfig::default()
            };
            let mut agent = TreePlayer::new("tree");
            let mut opponent = RandomPlayer::new("random");
            let result = TrainingPipeline::new(config)
                .run(&mut agent, &mut opponent)
                .unwrap();
            (result, agent.into_tree())
        };
        assert_eq!(run(), run());
    }
}
