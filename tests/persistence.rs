//! Saving and restoring trained trees.

use std::path::Path;

use tempfile::TempDir;
use tictree::{
    Error, RandomPlayer, SavedTreePlayer, SelectionMode, TreePlayer,
    adapters::{InMemoryRepository, MsgPackRepository},
    learner::TrainingMetadata,
    pipeline::{Seat, TrainingConfig, TrainingPipeline},
    ports::TreeRepository,
};

fn train(player: &mut TreePlayer, games: usize, seed: u64) {
    let config = TrainingConfig {
        num_games: games,
        seed: Some(seed),
        agent_seat: Seat::First,
        ..TrainingConfig::default()
    };
    let mut opponent = RandomPlayer::new("random");
    TrainingPipeline::new(config)
        .run(player, &mut opponent)
        .unwrap();
}

#[test]
fn trained_tree_survives_a_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.msgpack");
    let mut player = TreePlayer::new("tree");
    train(&mut player, 100, 1);

    let metadata = TrainingMetadata {
        games_trained: player.episodes_completed(),
        opponents: vec!["random".to_string()],
        seed: Some(1),
    };
    let repo = MsgPackRepository::new();
    repo.save(&SavedTreePlayer::from_player(&player, metadata.clone()), &path)
        .unwrap();

    let loaded = repo.load(&path).unwrap();
    assert_eq!(loaded.metadata, metadata);
    let restored = loaded.into_player("restored").unwrap();
    assert_eq!(restored.tree(), player.tree());
    assert_eq!(restored.episodes_completed(), 100);
}

#[test]
fn restored_tree_keeps_learning() {
    let repo = InMemoryRepository::new();
    let mut player = TreePlayer::new("tree");
    train(&mut player, 50, 2);
    let nodes_before = player.tree().node_count();
    repo.save(
        &SavedTreePlayer::from_player(&player, TrainingMetadata::default()),
        Path::new("tree"),
    )
    .unwrap();

    let mut resumed = repo
        .load(Path::new("tree"))
        .unwrap()
        .into_player("resumed")
        .unwrap();
    assert_eq!(resumed.mode(), SelectionMode::Explore);
    train(&mut resumed, 50, 3);
    assert!(resumed.tree().node_count() >= nodes_before);
    assert!(resumed.tree().validate().is_ok());
}

#[test]
fn corrupt_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.msgpack");
    std::fs::write(&path, [0xc1, 0x00, 0xff]).unwrap();
    let err = MsgPackRepository::new().load(&path).unwrap_err();
    assert!(matches!(err, Error::SerializationContext { .. }));
}
