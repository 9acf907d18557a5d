//! High-score persistence across sessions through the game loop

use std::path::PathBuf;

use neon_tetris::adapter::JsonFileHighScores;
use neon_tetris::core::{GameState, PieceQueue, SimpleRng};
use neon_tetris::engine::{GameLoop, HighScoreStore, ManualClock, ScriptedConfirmer};
use neon_tetris::types::{GameAction, Phase, PieceKind};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "neon_tetris_scores_{}_{}.json",
        name,
        std::process::id()
    ))
}

/// Top out quickly: a column blocks the spawn area after two drops
fn top_out<S: HighScoreStore>(game_loop: &mut GameLoop<ManualClock, S, ScriptedConfirmer>) {
    for y in 3..20 {
        game_loop
            .state_mut()
            .grid_mut()
            .set(4, y, Some(PieceKind::Z));
    }
    game_loop.command(GameAction::HardDrop);
    game_loop.command(GameAction::HardDrop);
}

fn opening() -> GameState {
    GameState::with_queue(PieceQueue::with_preset(
        &[PieceKind::I, PieceKind::O, PieceKind::O],
        SimpleRng::new(17),
    ))
}

#[test]
fn best_score_survives_a_new_store() {
    let path = temp_path("survives");
    let _ = std::fs::remove_file(&path);

    let mut game_loop = GameLoop::new(
        opening(),
        ManualClock::new(0),
        JsonFileHighScores::new(&path),
        ScriptedConfirmer::approving(),
    );
    game_loop.start();
    assert_eq!(game_loop.state().best_score(), 0);
    top_out(&mut game_loop);
    assert_eq!(game_loop.state().phase(), Phase::GameOver);
    let score = game_loop.state().score();
    assert!(score > 0);

    // A fresh process reads it back
    let mut next = GameLoop::new(
        GameState::new(1),
        ManualClock::new(0),
        JsonFileHighScores::new(&path),
        ScriptedConfirmer::approving(),
    );
    next.start();
    assert_eq!(next.snapshot().best_score, score);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn unreadable_store_does_not_block_play() {
    let path = temp_path("corrupt");
    std::fs::write(&path, "not json").unwrap();

    let mut game_loop = GameLoop::new(
        opening(),
        ManualClock::new(0),
        JsonFileHighScores::new(&path),
        ScriptedConfirmer::approving(),
    );
    game_loop.start();
    assert_eq!(game_loop.state().phase(), Phase::Playing);
    assert_eq!(game_loop.state().best_score(), 0);

    // Ending above zero overwrites the bad file
    top_out(&mut game_loop);
    let mut store = JsonFileHighScores::new(&path);
    assert_eq!(store.load_best().unwrap(), game_loop.state().score());
    let _ = std::fs::remove_file(&path);
}
