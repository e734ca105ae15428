//! Baseline players: a uniform random mover and a human at a console.

use std::io::{BufRead, Write};

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    ports::Player,
    tictactoe::{Board, Outcome, Symbol},
};

/// Plays a uniformly random empty cell
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    /// Create a new random player
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, random())
    }

    /// Create a new random player with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn get_move(&mut self, board: &Board, _symbol: Symbol) -> Result<usize> {
        let moves = board.empty_positions();
        if moves.is_empty() {
            return Err(Error::NoValidMoves);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn report_winner(&mut self, _board: &Board, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Human player reading cell indices from `input` and prompting on `output`.
///
/// Input that is not a number in 0-8 is rejected locally and the prompt is
/// repeated. Occupied cells are passed through; the game loop rejects them
/// and asks again.
pub struct ConsolePlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|source| Error::Io {
                operation: "write to console".to_string(),
                source,
            })
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|source| Error::Io {
                operation: "read from console".to_string(),
                source,
            })?;
        Ok((read > 0).then_some(line))
    }
}

impl<R, W> Player for ConsolePlayer<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn get_move(&mut self, board: &Board, symbol: Symbol) -> Result<usize> {
        self.write(&format!("\n{}\n", board.render_with_guide()))?;
        loop {
            self.write(&format!("{} to move, enter a cell (0-8): ", symbol))?;
            let Some(line) = self.read_line()? else {
                return Err(Error::InputClosed);
            };
            match line.trim().parse::<usize>() {
                Ok(position) if position < 9 => return Ok(position),
                _ => self.write(&format!("'{}' is not a cell number\n", line.trim()))?,
            }
        }
    }

    fn report_winner(&mut self, board: &Board, outcome: Outcome) -> Result<()> {
        let message = match outcome {
            Outcome::Win => "You win!",
            Outcome::Draw => "It's a draw.",
            Outcome::Lose => "You lose.",
        };
        self.write(&format!("\n{board}\n{message}\n"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
