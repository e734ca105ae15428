//! Train command - Grow a tree player through repeated games

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{
        config::{CommonConfig, OpponentKind, SeatArg},
        model::{load_player, resolve_seat, save_player},
        output::{print_kv, print_result, print_section},
    },
    learner::{RandomPlayer, SelectionMode, TrainingMetadata, TreePlayer},
    pipeline::{
        JsonlObserver, ProgressObserver, RetryPolicy, Seat, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    ports::Player,
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    metadata: SummaryMetadata,
}

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    opponent: String,
    seat: Seat,
    seed: Option<u64>,
    games_trained_total: usize,
    tree_nodes: usize,
    resumed_from: Option<PathBuf>,
}

/// Summary target for a `--summary` argument: a trailing separator names a
/// directory, and a missing or foreign extension becomes `.json`.
fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a tree player")]
pub struct TrainArgs {
    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 500)]
    pub games: usize,

    /// Opponent to train against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Random)]
    pub opponent: OpponentKind,

    /// Seat taken by the trained player; defaults to the seat a resumed
    /// tree was grown from, or first
    #[arg(long, value_enum)]
    pub seat: Option<SeatArg>,

    #[command(flatten)]
    pub common: CommonConfig,

    /// Output file for the trained tree
    #[arg(long, short = 'O', default_value = "tree.msgpack")]
    pub output: PathBuf,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for one JSON line per game
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Abort a game after this many rejected moves in a row
    #[arg(long)]
    pub max_invalid_moves: Option<usize>,

    /// Continue training a previously saved tree
    #[arg(long)]
    pub resume: Option<PathBuf>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    if args.games == 0 {
        bail!("--games must be at least 1");
    }
    if args.max_invalid_moves == Some(0) {
        bail!("--max-invalid-moves must be at least 1");
    }

    let (mut agent, mut metadata) = match &args.resume {
        Some(path) => load_player(path, "tree", SelectionMode::Explore)?,
        None => (
            TreePlayer::builder().name("tree").build()?,
            TrainingMetadata::default(),
        ),
    };
    let starting_nodes = agent.tree().node_count();
    let seat = resolve_seat(&agent, args.seat.map(Seat::from), Seat::First)?;

    let mut opponent: Box<dyn Player> = match args.opponent {
        OpponentKind::Random => Box::new(RandomPlayer::new("random")),
        OpponentKind::SelfPlay => Box::new(TreePlayer::new("tree-opponent")),
    };

    let config = TrainingConfig {
        num_games: args.games,
        seed: args.common.seed,
        agent_seat: seat,
        retry: RetryPolicy {
            max_invalid_moves: args.max_invalid_moves,
        },
    };

    print_section("Training");
    print_kv("Opponent", args.opponent.label());
    print_kv("Seat", &config.agent_seat.to_string());
    print_kv("Games", &args.games.to_string());
    if let Some(seed) = args.common.seed {
        print_kv("Seed", &seed.to_string());
    }
    if let Some(path) = &args.resume {
        print_kv("Resumed from", &path.display().to_string());
    }

    let mut pipeline = TrainingPipeline::new(config);
    if args.common.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline.run(&mut agent, opponent.as_mut())?;

    print_section("Results");
    print_result(&result);
    print_kv(
        "Tree nodes",
        &format!(
            "{} (+{})",
            agent.tree().node_count(),
            agent.tree().node_count() - starting_nodes
        ),
    );

    metadata.games_trained = agent.episodes_completed();
    let opponent_label = args.opponent.label().to_string();
    if !metadata.opponents.contains(&opponent_label) {
        metadata.opponents.push(opponent_label.clone());
    }
    metadata.seed = args.common.seed.or(metadata.seed);
    let games_trained_total = metadata.games_trained;

    save_player(&agent, metadata, &args.output)?;
    println!("\nSaved trained tree to {}", args.output.display());

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let summary = TrainingSummaryFile {
            training: result,
            metadata: SummaryMetadata {
                opponent: opponent_label,
                seat: pipeline.config().agent_seat,
                seed: args.common.seed,
                games_trained_total,
                tree_nodes: agent.tree().node_count(),
                resumed_from: args.resume.clone(),
            },
        };
        let file = File::create(&path)
            .with_context(|| format!("failed to create summary file {}", path.display()))?;
        to_writer_pretty(file, &summary).context("failed to write training summary")?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}
