//! Headless demo runner.
//!
//! Drives one seeded session with a scripted bot on a manual clock, buying
//! power-ups at chosen frames through the payment bridge, and reports a summary.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::adapter::{AdapterConfig, JsonFileHighScores, LogRecord, PaymentBridge};
use crate::core::{ActiveSnapshot, GameEvent, GameSnapshot, GameState, SimpleRng};
use crate::engine::{GameLoop, ManualClock};
use crate::types::{GameAction, Phase, PowerupKind, GRID_WIDTH, TICK_MS};

/// Frames between two bot actions
const ACTION_GAP_FRAMES: u32 = 4;

/// How long to let the event log drain on exit
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

type DemoLoop = GameLoop<ManualClock, JsonFileHighScores, PaymentBridge>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledPowerup {
    pub kind: PowerupKind,
    pub frame: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// None seeds from the clock
    pub seed: Option<u32>,
    pub frames: u64,
    pub powerups: Vec<ScheduledPowerup>,
    pub help: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frames: 3_600,
            powerups: Vec::new(),
            help: false,
        }
    }
}

pub const USAGE: &str = "\
usage: neon-tetris [--seed N] [--frames N] [--powerup KIND@FRAME]...

  --seed N            seed for the piece queue and the bot (default: clock)
  --frames N          frames to simulate at 16ms each (default: 3600)
  --powerup KIND@F    buy a power-up at frame F; KIND is bomb, freeze, hold or future";

pub fn parse_demo_args(args: &[String]) -> Result<DemoConfig> {
    let mut config = DemoConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--frames" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --frames"))?;
                config.frames = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("invalid --frames value: {}", v))?;
            }
            "--powerup" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --powerup"))?;
                config.powerups.push(parse_scheduled_powerup(v)?);
            }
            "-h" | "--help" => config.help = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(config)
}

fn parse_scheduled_powerup(value: &str) -> Result<ScheduledPowerup> {
    let (kind, frame) = value
        .split_once('@')
        .ok_or_else(|| anyhow!("expected KIND@FRAME, got: {}", value))?;
    let kind =
        PowerupKind::from_str(kind).ok_or_else(|| anyhow!("unknown power-up: {}", kind))?;
    let frame = frame
        .parse::<u64>()
        .map_err(|_| anyhow!("invalid frame in --powerup: {}", frame))?;
    Ok(ScheduledPowerup { kind, frame })
}

/// Plays by picking a random rotation and column for each piece
#[derive(Debug, Clone)]
pub struct Bot {
    rng: SimpleRng,
    plan: VecDeque<GameAction>,
    cooldown: u32,
}

impl Bot {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            plan: VecDeque::new(),
            cooldown: 0,
        }
    }

    pub fn next_action(&mut self, snap: &GameSnapshot) -> Option<GameAction> {
        if !snap.playable() {
            return None;
        }
        let active = snap.active?;
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }
        if self.plan.is_empty() {
            self.plan_for(active, snap.hold_unlocked && snap.can_hold);
        }
        self.cooldown = ACTION_GAP_FRAMES;
        self.plan.pop_front()
    }

    fn plan_for(&mut self, active: ActiveSnapshot, may_hold: bool) {
        if may_hold && self.rng.next_range(4) == 0 {
            self.plan.push_back(GameAction::Hold);
            return;
        }
        for _ in 0..self.rng.next_range(4) {
            self.plan.push_back(GameAction::Rotate);
        }
        let target = self.rng.next_range(GRID_WIDTH as u32) as i8;
        let step = if target < active.x {
            GameAction::MoveLeft
        } else {
            GameAction::MoveRight
        };
        for _ in 0..(target - active.x).unsigned_abs() {
            self.plan.push_back(step);
        }
        self.plan.push_back(GameAction::HardDrop);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoSummary {
    pub seed: u32,
    pub frames: u64,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub best_score: u32,
    pub phase: Phase,
    pub pieces_locked: u32,
    pub powerups_applied: Vec<PowerupKind>,
    pub powerups_declined: Vec<PowerupKind>,
}

impl DemoSummary {
    fn record(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::PieceLocked { .. } => self.pieces_locked += 1,
            GameEvent::PowerupApplied { kind } => self.powerups_applied.push(kind),
            GameEvent::PowerupDeclined { kind } => self.powerups_declined.push(kind),
            _ => {}
        }
    }
}

impl fmt::Display for DemoSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = |list: &[PowerupKind]| {
            list.iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(",")
        };
        writeln!(f, "seed:      {}", self.seed)?;
        writeln!(f, "frames:    {}", self.frames)?;
        writeln!(f, "phase:     {}", self.phase.as_str())?;
        writeln!(f, "score:     {} (best {})", self.score, self.best_score)?;
        writeln!(f, "level:     {}", self.level)?;
        writeln!(f, "lines:     {}", self.lines)?;
        writeln!(f, "pieces:    {}", self.pieces_locked)?;
        writeln!(f, "applied:   {}", kinds(&self.powerups_applied))?;
        write!(f, "declined:  {}", kinds(&self.powerups_declined))
    }
}

/// Run one session and report how it went
pub fn run_demo(config: &DemoConfig, adapter: &AdapterConfig) -> Result<DemoSummary> {
    let seed = config
        .seed
        .unwrap_or_else(|| SimpleRng::from_entropy().state());
    let bridge = PaymentBridge::start(adapter)?;
    let scores = JsonFileHighScores::new(adapter.highscore_path.clone());
    let clock = ManualClock::new(0);
    let mut game_loop = GameLoop::new(GameState::new(seed), clock.clone(), scores, bridge);
    let mut bot = Bot::new(seed.rotate_left(16) ^ 0x9e37_79b9);

    let mut summary = DemoSummary {
        seed,
        ..DemoSummary::default()
    };
    let mut snap = GameSnapshot::default();

    game_loop.start();
    forward_events(&mut game_loop, &mut summary);

    for frame in 0..config.frames {
        for scheduled in config.powerups.iter().filter(|p| p.frame == frame) {
            if !game_loop.request_powerup(scheduled.kind) {
                eprintln!(
                    "[Demo] {} refused at frame {}",
                    scheduled.kind.as_str(),
                    frame
                );
            }
        }

        game_loop.snapshot_into(&mut snap);
        if snap.pending_powerup.is_some() {
            // Confirmation runs on real time; wait it out one frame at a time
            std::thread::sleep(Duration::from_millis(TICK_MS));
        } else if let Some(action) = bot.next_action(&snap) {
            game_loop.command(action);
        }

        clock.advance(TICK_MS);
        game_loop.frame();

        forward_events(&mut game_loop, &mut summary);

        summary.frames = frame + 1;
        if game_loop.state().is_game_over() {
            break;
        }
    }

    let state = game_loop.state();
    summary.score = state.score();
    summary.level = state.level();
    summary.lines = state.lines();
    summary.best_score = state.best_score();
    summary.phase = state.phase();

    let (_, _, _, bridge) = game_loop.into_parts();
    bridge.shutdown(SHUTDOWN_GRACE);
    Ok(summary)
}

/// Count loop events into the summary and copy session-level ones to the event log
fn forward_events(game_loop: &mut DemoLoop, summary: &mut DemoSummary) {
    let session_id = game_loop.state().session_id();
    for event in game_loop.take_events() {
        summary.record(&event);
        if let (Some(log), Some(record)) = (
            game_loop.payments().event_log(),
            LogRecord::from_game_event(session_id, &event),
        ) {
            log.log(record);
        }
    }
}
