//! Evaluate command - Play a trained tree in exploit mode

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        config::{CommonConfig, OpponentKind, SeatArg},
        model::{load_player, resolve_seat},
        output::{print_kv, print_result, print_section},
    },
    learner::{RandomPlayer, SelectionMode, TreePlayer},
    pipeline::{
        ProgressObserver, RetryPolicy, Seat, TrainingConfig, TrainingPipeline,
        TranscriptObserver,
    },
    ports::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained tree player")]
pub struct EvaluateArgs {
    /// Path to trained tree file
    #[arg(long, short = 'm')]
    pub model: PathBuf,

    /// Opponent to evaluate against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Random)]
    pub opponent: OpponentKind,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Seat taken by the evaluated player; defaults to the seat it was
    /// trained from
    #[arg(long, value_enum)]
    pub seat: Option<SeatArg>,

    #[command(flatten)]
    pub common: CommonConfig,

    /// Print every game move by move
    #[arg(long, default_value_t = false)]
    pub show_games: bool,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let (mut agent, metadata) = load_player(&args.model, "tree", SelectionMode::Exploit)?;

    print_section("Loaded Tree");
    print_kv("Model", &args.model.display().to_string());
    print_kv("Games trained", &metadata.games_trained.to_string());
    if !metadata.opponents.is_empty() {
        print_kv("Trained against", &metadata.opponents.join(", "));
    }
    print_kv("Tree nodes", &agent.tree().node_count().to_string());

    let seat = resolve_seat(&agent, args.seat.map(Seat::from), Seat::First)?;
    let mut opponent: Box<dyn Player> = match args.opponent {
        OpponentKind::Random => Box::new(RandomPlayer::new("random")),
        OpponentKind::SelfPlay => Box::new(TreePlayer::new("tree-opponent")),
    };

    let config = TrainingConfig {
        num_games: args.games,
        seed: args.common.seed,
        agent_seat: seat,
        retry: RetryPolicy::default(),
    };
    print_kv("Opponent", args.opponent.label());
    print_kv("Seat", &config.agent_seat.to_string());

    let mut pipeline = TrainingPipeline::new(config);
    if args.common.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if args.show_games {
        pipeline = pipeline.with_observer(Box::new(TranscriptObserver::stdout()));
    }
    let result = pipeline.run(&mut agent, opponent.as_mut())?;

    print_section("Evaluation Results");
    print_result(&result);

    if let Some(path) = &args.export {
        result.save(path)?;
        println!("\nResults exported to: {}", path.display());
    }
    Ok(())
}
