//! tictree CLI - train, evaluate and play against self-taught tree players
//!
//! This CLI provides a unified interface for:
//! - Training a tree player against a random or self-play opponent
//! - Evaluating a trained tree in exploit mode
//! - Playing against a trained tree on the console
//! - Inspecting what a tree has learned

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tictree")]
#[command(version, about = "Self-play tree learning for Tic-Tac-Toe", long_about = None)]
struct Cli {
    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a tree player
    Train(tictree::cli::commands::train::TrainArgs),

    /// Evaluate a trained tree against an opponent
    Evaluate(tictree::cli::commands::evaluate::EvaluateArgs),

    /// Play against a trained tree
    Play(tictree::cli::commands::play::PlayArgs),

    /// Show statistics of a trained tree
    Inspect(tictree::cli::commands::inspect::InspectArgs),
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Train(args) => tictree::cli::commands::train::execute(args),
        Commands::Evaluate(args) => tictree::cli::commands::evaluate::execute(args),
        Commands::Play(args) => tictree::cli::commands::play::execute(args),
        Commands::Inspect(args) => tictree::cli::commands::inspect::execute(args),
    }
}
