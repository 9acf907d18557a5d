//! Headless demo runs end to end

use std::path::PathBuf;
use std::time::Duration;

use neon_tetris::adapter::{AdapterConfig, LogRecord};
use neon_tetris::demo::{run_demo, DemoConfig, ScheduledPowerup};
use neon_tetris::types::PowerupKind;

fn temp_path(name: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "neon_tetris_demo_{}_{}.{}",
        name,
        std::process::id(),
        ext
    ))
}

fn offline_adapter(name: &str) -> AdapterConfig {
    let highscore_path = temp_path(name, "json");
    let _ = std::fs::remove_file(&highscore_path);
    AdapterConfig {
        payments_disabled: true,
        highscore_path,
        ..AdapterConfig::default()
    }
}

#[test]
fn same_seed_same_run() {
    let config = DemoConfig {
        seed: Some(31),
        frames: 1_500,
        ..DemoConfig::default()
    };
    let first = run_demo(&config, &offline_adapter("first")).unwrap();
    let second = run_demo(&config, &offline_adapter("second")).unwrap();

    assert_eq!(first.seed, 31);
    assert!(first.pieces_locked > 0);
    assert_eq!(first.frames, second.frames);
    assert_eq!(first.score, second.score);
    assert_eq!(first.lines, second.lines);
    assert_eq!(first.pieces_locked, second.pieces_locked);
    assert_eq!(first.phase, second.phase);
}

#[test]
fn purchased_powerup_is_applied_and_logged() {
    let log_path = temp_path("purchase", "jsonl");
    let _ = std::fs::remove_file(&log_path);
    let highscore_path = temp_path("purchase", "json");
    let _ = std::fs::remove_file(&highscore_path);
    let adapter = AdapterConfig {
        payment_delay: Duration::from_millis(5),
        highscore_path: highscore_path.clone(),
        log_path: Some(log_path.clone()),
        ..AdapterConfig::default()
    };
    let config = DemoConfig {
        seed: Some(8),
        frames: 300,
        powerups: vec![ScheduledPowerup {
            kind: PowerupKind::FutureSight,
            frame: 0,
        }],
        ..DemoConfig::default()
    };

    let summary = run_demo(&config, &adapter).unwrap();
    assert_eq!(summary.powerups_applied, vec![PowerupKind::FutureSight]);
    assert!(summary.powerups_declined.is_empty());

    let records: Vec<LogRecord> = std::fs::read_to_string(&log_path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records[0], LogRecord::SessionStarted { session_id: 1 });
    assert!(records.iter().any(|r| matches!(
        r,
        LogRecord::PaymentResolved { outcome, .. } if outcome == "confirmed"
    )));

    let _ = std::fs::remove_file(&log_path);
    let _ = std::fs::remove_file(&highscore_path);
}

#[test]
fn summary_prints_every_field() {
    let config = DemoConfig {
        seed: Some(2),
        frames: 60,
        ..DemoConfig::default()
    };
    let text = run_demo(&config, &offline_adapter("print")).unwrap().to_string();
    for label in ["seed:", "frames:", "phase:", "score:", "level:", "lines:", "pieces:"] {
        assert!(text.contains(label), "missing {} in\n{}", label, text);
    }
    assert!(text.contains("seed:      2"));
}
