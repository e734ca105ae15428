//! Inspect command - Summarize a saved tree

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::{
        model::load_player,
        output::{format_number, print_kv, print_section, print_subsection},
    },
    learner::SelectionMode,
    tree::{MoveTree, NodeId},
};

#[derive(Parser, Debug)]
#[command(about = "Show statistics of a trained tree")]
pub struct InspectArgs {
    /// Path to trained tree file
    #[arg(long, short = 'm')]
    pub model: PathBuf,

    /// Number of root continuations to list
    #[arg(long, default_value_t = 9)]
    pub top: usize,
}

/// Own-move children of `node`, best score first, ties in creation order.
pub fn ranked_moves(tree: &MoveTree, node: NodeId) -> Vec<(usize, i64)> {
    let mut moves: Vec<(usize, i64)> = tree
        .children(node)
        .filter_map(|(_, child)| child.move_played().map(|played| (played, child.score())))
        .collect();
    moves.sort_by(|a, b| b.1.cmp(&a.1));
    moves
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let (player, metadata) = load_player(&args.model, "tree", SelectionMode::Exploit)?;
    let tree = player.tree();
    let stats = tree.stats();
    let root = tree.root();

    print_section(&format!("Tree {}", args.model.display()));
    print_kv("Games trained", &format_number(metadata.games_trained));
    if !metadata.opponents.is_empty() {
        print_kv("Trained against", &metadata.opponents.join(", "));
    }
    if let Some(seed) = metadata.seed {
        print_kv("Seed", &seed.to_string());
    }
    print_kv("Nodes", &format_number(stats.nodes));
    print_kv("Leaves", &format_number(stats.leaves));
    print_kv("Max depth", &stats.max_depth.to_string());
    print_kv("Own-move nodes", &format_number(stats.own_move_nodes));
    print_kv("Opponent nodes", &format_number(stats.opponent_nodes));
    print_kv("Root score", &tree.get(root).score().to_string());

    print_subsection("Opening moves (as X)");
    let ranked = ranked_moves(tree, root);
    if ranked.is_empty() {
        println!("  none recorded");
    }
    for (position, score) in ranked.into_iter().take(args.top) {
        println!("  cell {position}: score {score:>8}");
    }
    Ok(())
}
