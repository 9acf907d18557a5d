//! Game loop - drives one [`GameState`] from a clock, a payment boundary, and a
//! high-score store.
//!
//! Everything runs on the caller's thread. Each [`GameLoop::frame`] reads the
//! clock once, settles any confirmed or cancelled power-ups, and advances the
//! core timers.

use crate::clock::Clock;
use crate::confirm::PowerupConfirmer;
use crate::core::{GameEvent, GameSnapshot, GameState};
use crate::highscore::HighScoreStore;
use crate::types::{GameAction, PowerupKind};

pub struct GameLoop<C, S, P> {
    state: GameState,
    clock: C,
    scores: S,
    payments: P,
    events: Vec<GameEvent>,
}

impl<C, S, P> GameLoop<C, S, P>
where
    C: Clock,
    S: HighScoreStore,
    P: PowerupConfirmer,
{
    pub fn new(state: GameState, clock: C, scores: S, payments: P) -> Self {
        Self {
            state,
            clock,
            scores,
            payments,
            events: Vec::new(),
        }
    }

    /// Start a fresh session, reading the previous best from the store
    pub fn start(&mut self) {
        match self.scores.load_best() {
            Ok(best) => {
                let best = best.max(self.state.best_score());
                self.state.set_best_score(best);
            }
            Err(e) => eprintln!("[Engine] Failed to load high score: {:#}", e),
        }
        let now = self.clock.now_ms();
        self.state.start(now);
        self.collect_events();
    }

    /// Apply a player command at the current time
    pub fn command(&mut self, action: GameAction) -> bool {
        if action == GameAction::Start {
            self.start();
            return true;
        }
        let now = self.clock.now_ms();
        let changed = self.state.apply_action(action, now);
        self.collect_events();
        changed
    }

    /// Ask for a power-up and hand the request to the payment boundary.
    ///
    /// Returns false if the core refused it.
    pub fn request_powerup(&mut self, kind: PowerupKind) -> bool {
        let now = self.clock.now_ms();
        let Some(request) = self.state.request_powerup(kind, now) else {
            return false;
        };
        self.payments.submit(request);
        self.collect_events();
        true
    }

    /// Run one frame. Returns true if anything visible changed.
    pub fn frame(&mut self) -> bool {
        let now = self.clock.now_ms();
        let mut changed = false;

        while let Some((request, outcome)) = self.payments.poll() {
            if !outcome.is_confirmed() {
                eprintln!(
                    "[Engine] Power-up {} not applied: {:?}",
                    request.kind.as_str(),
                    outcome
                );
            }
            self.state.resolve_powerup(&request, outcome, now);
            changed = true;
        }

        changed |= self.state.tick(now);
        self.collect_events();
        changed
    }

    /// Move new core events into the loop's buffer, persisting a new best score
    fn collect_events(&mut self) {
        for event in self.state.take_events() {
            if let GameEvent::GameOver {
                score,
                new_best: true,
            } = event
            {
                if let Err(e) = self.scores.save_best(score) {
                    eprintln!("[Engine] Failed to save high score {}: {:#}", score, e);
                }
            }
            self.events.push(event);
        }
    }

    /// Take all events since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot(self.clock.now_ms())
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out, self.clock.now_ms());
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    pub fn payments(&self) -> &P {
        &self.payments
    }

    pub fn payments_mut(&mut self) -> &mut P {
        &mut self.payments
    }

    /// Tear the loop apart, e.g. to shut the payment side down cleanly
    pub fn into_parts(self) -> (GameState, C, S, P) {
        (self.state, self.clock, self.scores, self.payments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::confirm::{ManualConfirmer, ScriptedConfirmer};
    use crate::core::{PieceQueue, PowerupOutcome, SimpleRng};
    use crate::highscore::MemoryHighScores;
    use crate::types::{Phase, PieceKind};

    fn game(preset: &[PieceKind]) -> GameState {
        GameState::with_queue(PieceQueue::with_preset(preset, SimpleRng::new(3)))
    }

    #[test]
    fn test_start_loads_best_score() {
        let mut game_loop = GameLoop::new(
            game(&[PieceKind::T]),
            ManualClock::new(0),
            MemoryHighScores::new(1_234),
            ScriptedConfirmer::approving(),
        );
        game_loop.start();
        let snap = game_loop.snapshot();
        assert_eq!(snap.phase, Phase::Playing);
        assert_eq!(snap.best_score, 1_234);
    }

    #[test]
    fn test_frame_applies_confirmed_powerup() {
        let clock = ManualClock::new(0);
        let mut game_loop = GameLoop::new(
            game(&[PieceKind::T]),
            clock.clone(),
            MemoryHighScores::default(),
            ScriptedConfirmer::approving(),
        );
        game_loop.start();
        assert!(game_loop.request_powerup(PowerupKind::FutureSight));
        assert_eq!(game_loop.state().phase(), Phase::Paused);

        clock.advance(16);
        assert!(game_loop.frame());
        let snap = game_loop.snapshot();
        assert!(snap.future_sight_unlocked);
        assert_eq!(snap.preview.len(), 3);
        assert_eq!(snap.phase, Phase::Playing);
    }

    #[test]
    fn test_session_waits_for_confirmation() {
        let clock = ManualClock::new(0);
        let mut game_loop = GameLoop::new(
            game(&[PieceKind::T]),
            clock.clone(),
            MemoryHighScores::default(),
            ManualConfirmer::new(),
        );
        game_loop.start();
        assert!(game_loop.request_powerup(PowerupKind::HoldUnlock));

        // Gravity does not run while waiting
        for _ in 0..200 {
            clock.advance(16);
            game_loop.frame();
        }
        assert_eq!(game_loop.state().active().map(|p| p.y), Some(0));
        assert!(!game_loop.command(GameAction::Resume));

        assert!(game_loop.payments_mut().settle(PowerupOutcome::Cancelled));
        clock.advance(16);
        game_loop.frame();
        assert_eq!(game_loop.state().phase(), Phase::Playing);
        assert!(!game_loop.state().powerups().hold_unlocked);
    }

    #[test]
    fn test_new_best_is_saved_once() {
        let mut game_loop = GameLoop::new(
            game(&[PieceKind::I, PieceKind::O, PieceKind::O]),
            ManualClock::new(0),
            MemoryHighScores::new(0),
            ScriptedConfirmer::approving(),
        );
        game_loop.start();
        for y in 3..20 {
            game_loop.state_mut().grid_mut().set(4, y, Some(PieceKind::Z));
        }
        game_loop.command(GameAction::HardDrop);
        game_loop.command(GameAction::HardDrop);
        assert_eq!(game_loop.state().phase(), Phase::GameOver);
        assert_eq!(game_loop.scores().best(), 4);
        assert_eq!(game_loop.scores().saves(), 1);

        // Further frames and commands after game over do not save again
        game_loop.frame();
        game_loop.command(GameAction::HardDrop);
        assert_eq!(game_loop.scores().saves(), 1);
    }

    #[test]
    fn test_lower_score_is_not_saved() {
        let mut game_loop = GameLoop::new(
            game(&[PieceKind::I, PieceKind::O, PieceKind::O]),
            ManualClock::new(0),
            MemoryHighScores::new(10_000),
            ScriptedConfirmer::approving(),
        );
        game_loop.start();
        for y in 3..20 {
            game_loop.state_mut().grid_mut().set(4, y, Some(PieceKind::Z));
        }
        game_loop.command(GameAction::HardDrop);
        game_loop.command(GameAction::HardDrop);
        assert_eq!(game_loop.state().phase(), Phase::GameOver);
        assert_eq!(game_loop.scores().saves(), 0);
        assert_eq!(game_loop.snapshot().best_score, 10_000);
    }
}
