//! Observer implementations for games and training runs
//!
//! Observers allow composable data collection during play without coupling
//! the game loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Observer,
    tictactoe::{Board, GameOutcome, GameRecord, LineAnalyzer, Symbol},
};

/// Counts of finished games by absolute result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl OutcomeTally {
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(Symbol::X) => self.x_wins += 1,
            GameOutcome::Win(Symbol::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }
}

/// Progress bar observer - Shows training progress
#[derive(Default)]
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    tally: OutcomeTally,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self::default()
    }

    fn message(&self) -> String {
        format!(
            "X:{} O:{} D:{}",
            self.tally.x_wins, self.tally.o_wins, self.tally.draws
        )
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, record: &GameRecord) -> Result<()> {
        self.tally.record(record.outcome);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks game results and lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    tally: OutcomeTally,
    game_lengths: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get average game length in plies
    pub fn avg_game_length(&self) -> f64 {
        if self.game_lengths.is_empty() {
            0.0
        } else {
            self.game_lengths.iter().sum::<usize>() as f64 / self.game_lengths.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.tally.total(),
            tally: self.tally,
            avg_game_length: self.avg_game_length(),
            shortest_game: self.game_lengths.iter().copied().min(),
            longest_game: self.game_lengths.iter().copied().max(),
        }
    }
}

/// Summary of observed games
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub tally: OutcomeTally,
    pub avg_game_length: f64,
    pub shortest_game: Option<usize>,
    pub longest_game: Option<usize>,
}

impl Observer for MetricsObserver {
    fn on_game_end(&mut self, _game_num: usize, record: &GameRecord) -> Result<()> {
        self.tally.record(record.outcome);
        self.game_lengths.push(record.len());
        Ok(())
    }
}

/// One finished game as written by [`JsonlObserver`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLine {
    pub game_num: usize,
    /// Players in seat order, X first
    pub players: Vec<String>,
    pub moves: Vec<usize>,
    pub final_board: String,
    pub outcome: String,
}

/// JSONL observer - Exports one JSON object per finished game
pub struct JsonlObserver {
    writer: BufWriter<File>,
    players: Vec<String>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            players: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.players.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        step_num: usize,
        player: &str,
        _symbol: Symbol,
        _position: usize,
        _board: &Board,
    ) -> Result<()> {
        if step_num < 2 {
            self.players.push(player.to_string());
        }
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, record: &GameRecord) -> Result<()> {
        let line = GameLine {
            game_num,
            players: std::mem::take(&mut self.players),
            moves: record.moves.iter().map(|mv| mv.position).collect(),
            final_board: record.final_board.encode(),
            outcome: record.outcome.to_string(),
        };

        serde_json::to_writer(&mut self.writer, &line)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Prints every position of a game with the cell-index guide.
pub struct TranscriptObserver<W> {
    out: W,
}

impl<W: Write> TranscriptObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TranscriptObserver<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Observer for TranscriptObserver<W> {
    fn on_move(
        &mut self,
        _game_num: usize,
        step_num: usize,
        player: &str,
        symbol: Symbol,
        position: usize,
        board: &Board,
    ) -> Result<()> {
        writeln!(
            self.out,
            "\nMove {}: {player} ({symbol}) plays {position}\n{}",
            step_num + 1,
            board.render_with_guide()
        )?;
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, record: &GameRecord) -> Result<()> {
        let line = match record.outcome {
            GameOutcome::Win(symbol) => {
                LineAnalyzer::completed_line(record.final_board.cells(), symbol)
            }
            GameOutcome::Draw => None,
        };
        match line {
            Some([a, b, c]) => writeln!(
                self.out,
                "\nResult: {} (cells {a}-{b}-{c})",
                record.outcome
            )?,
            None => writeln!(self.out, "\nResult: {}", record.outcome)?,
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{learner::RandomPlayer, pipeline::GameLoop};

    fn play_with(observers: &mut [Box<dyn Observer>]) -> GameRecord {
        let mut x = RandomPlayer::with_seed("rx", 1);
        let mut o = RandomPlayer::with_seed("ro", 2);
        GameLoop::default().play(&mut x, &mut o, observers).unwrap()
    }

    #[test]
    fn metrics_count_games() {
        let mut metrics = MetricsObserver::new();
        let record = play_with(&mut []);
        metrics.on_game_end(0, &record).unwrap();
        metrics.on_game_end(1, &record).unwrap();

        let summary = metrics.summary();
        assert_eq!(summary.total_games, 2);
        assert_eq!(summary.shortest_game, Some(record.len()));
        assert!((metrics.avg_game_length() - record.len() as f64).abs() < 1e-9);
    }

    #[test]
    fn jsonl_writes_one_line_per_game() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.jsonl");
        let mut observers: Vec<Box<dyn Observer>> =
            vec![Box::new(JsonlObserver::new(&path).unwrap())];
        let first = play_with(&mut observers);
        play_with(&mut observers);
        drop(observers);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<GameLine> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].players, vec!["rx".to_string(), "ro".to_string()]);
        assert_eq!(lines[0].moves.len(), first.len());
        assert_eq!(lines[0].final_board, first.final_board.encode());
    }

    #[test]
    fn transcript_shows_each_move() {
        let mut transcript = TranscriptObserver::new(Vec::new());
        let board = Board::from_string("....X....").unwrap();
        transcript
            .on_move(0, 0, "alice", Symbol::X, 4, &board)
            .unwrap();
        let text = String::from_utf8(transcript.into_inner()).unwrap();
        assert!(text.contains("Move 1: alice (X) plays 4"));
        assert!(text.contains(&board.render_with_guide()));
    }

    #[test]
    fn transcript_names_the_winning_line() {
        let mut transcript = TranscriptObserver::new(Vec::new());
        let record = GameRecord {
            moves: Vec::new(),
            final_board: Board::from_string("XXXOO....").unwrap(),
            outcome: GameOutcome::Win(Symbol::X),
        };
        transcript.on_game_end(0, &record).unwrap();
        let text = String::from_utf8(transcript.into_inner()).unwrap();
        assert!(text.contains("Result: X wins (cells 0-1-2)"), "got {text}");
    }
}
