//! Play command - A human against a trained tree on the console

use std::{
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        config::SeatArg,
        model::{load_player, resolve_seat},
        output::print_kv,
    },
    learner::{ConsolePlayer, SelectionMode, TreePlayer},
    pipeline::{GameLoop, RetryPolicy, Seat},
    tictactoe::{GameOutcome, Symbol},
};

#[derive(Parser, Debug)]
#[command(about = "Play against a trained tree player")]
pub struct PlayArgs {
    /// Path to trained tree file; an untrained tree is used when omitted
    #[arg(long, short = 'm')]
    pub model: Option<PathBuf>,

    /// Seat taken by the human; defaults to the seat the model did not
    /// train from, or first
    #[arg(long, value_enum)]
    pub seat: Option<SeatArg>,

    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    /// Random seed for the tree player
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Games won by each side over a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayTally {
    pub human_wins: usize,
    pub tree_wins: usize,
    pub draws: usize,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let tally = run(&args, BufReader::new(io::stdin()), io::stdout())?;

    if args.games > 1 {
        println!();
        print_kv("You", &tally.human_wins.to_string());
        print_kv("Tree", &tally.tree_wins.to_string());
        print_kv("Draws", &tally.draws.to_string());
    }
    Ok(())
}

/// Play a session reading the human's moves from `input` and drawing the
/// board on `output`.
pub fn run<R, W>(args: &PlayArgs, input: R, output: W) -> Result<PlayTally>
where
    R: BufRead + Send,
    W: Write + Send,
{
    let mut tree = match &args.model {
        Some(path) => load_player(path, "tree", SelectionMode::Exploit)?.0,
        None => TreePlayer::builder()
            .name("tree")
            .mode(SelectionMode::Exploit)
            .build()?,
    };
    if let Some(seed) = args.seed {
        tree.reseed(seed);
    }

    let requested = args.seat.map(|human| Seat::from(human).opposite());
    let human_symbol = resolve_seat(&tree, requested, Seat::Second)?
        .opposite()
        .symbol();

    let mut human = ConsolePlayer::new("you", input, output);
    let game_loop = GameLoop::new(RetryPolicy::unbounded());
    let mut tally = PlayTally::default();

    for game_num in 0..args.games {
        let record = match human_symbol {
            Symbol::X => game_loop.play_game(game_num, &mut human, &mut tree, &mut [])?,
            Symbol::O => game_loop.play_game(game_num, &mut tree, &mut human, &mut [])?,
        };
        match record.outcome {
            GameOutcome::Draw => tally.draws += 1,
            GameOutcome::Win(winner) if winner == human_symbol => tally.human_wins += 1,
            GameOutcome::Win(_) => tally.tree_wins += 1,
        }
    }
    Ok(tally)
}
