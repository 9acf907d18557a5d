//! Game state module - one owned value holding the whole session
//!
//! This module ties together the grid, the active piece, the queue, the clear
//! engine, power-ups, and the session phase. Every timer is an explicit
//! timestamp: callers pass a monotonic `now` (milliseconds) to each operation
//! and the state never reads a clock itself.

use crate::clear::ClearEngine;
use crate::grid::Grid;
use crate::pieces::{self, Piece};
use crate::powerup::{PowerupOutcome, PowerupRequest, PowerupState};
use crate::rng::{PieceQueue, SimpleRng};
use crate::scoring::{drop_interval_ms, hard_drop_score, level_for_lines};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Discrete things that happened, drained by audio/haptic/log collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted { session_id: u32 },
    PieceLocked { kind: PieceKind },
    RotationRejected,
    LinesFlashing { count: u32 },
    LinesCleared { lines: u32, points: u32 },
    PowerupRequested { kind: PowerupKind },
    PowerupApplied { kind: PowerupKind },
    PowerupDeclined { kind: PowerupKind },
    GameOver { score: u32, new_best: bool },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    active: Option<Piece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    queue: PieceQueue,
    clear: ClearEngine,
    powerups: PowerupState,
    pending: Option<PowerupRequest>,
    phase: Phase,
    score: u32,
    level: u32,
    lines: u32,
    best_score: u32,
    /// Increments on every start; 0 before the first session
    session_id: u32,
    /// Gravity accumulator, reset on every spawn and every gravity step
    drop_elapsed_ms: u64,
    last_tick_at: Option<u64>,
    paused_at: Option<u64>,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_queue(PieceQueue::new(SimpleRng::new(seed)))
    }

    /// Create a new game drawing pieces from `queue`
    pub fn with_queue(queue: PieceQueue) -> Self {
        Self {
            grid: Grid::new(),
            active: None,
            hold: None,
            can_hold: true,
            queue,
            clear: ClearEngine::new(),
            powerups: PowerupState::new(),
            pending: None,
            phase: Phase::Start,
            score: 0,
            level: 1,
            lines: 0,
            best_score: 0,
            session_id: 0,
            drop_elapsed_ms: 0,
            last_tick_at: None,
            paused_at: None,
            events: Vec::new(),
        }
    }

    /// Begin a fresh session from any phase.
    ///
    /// Everything but the best score is reset. The first session draws from
    /// the queue as constructed; later sessions continue the same random
    /// stream with a fresh lookahead.
    pub fn start(&mut self, now: u64) {
        if self.session_id > 0 {
            self.queue.reset();
        }
        self.grid.clear();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.clear.reset();
        self.powerups = PowerupState::new();
        self.pending = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.session_id = self.session_id.wrapping_add(1);
        self.drop_elapsed_ms = 0;
        self.last_tick_at = Some(now);
        self.paused_at = None;
        self.events.clear();
        self.phase = Phase::Playing;
        self.events.push(GameEvent::SessionStarted {
            session_id: self.session_id,
        });
        self.spawn_next();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Seed the best score from a high-score store
    pub fn set_best_score(&mut self, best: u32) {
        self.best_score = best;
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the grid (for tests and scripted setups)
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn powerups(&self) -> &PowerupState {
        &self.powerups
    }

    pub fn pending_powerup(&self) -> Option<&PowerupRequest> {
        self.pending.as_ref()
    }

    pub fn is_flashing(&self) -> bool {
        self.clear.is_flashing()
    }

    pub fn flashing_rows(&self) -> &[u8] {
        self.clear.flashing_rows()
    }

    /// Session time at `now`: wall time stands still while paused
    fn session_now(&self, now: u64) -> u64 {
        self.paused_at.unwrap_or(now)
    }

    /// Current gravity interval, including the time-freeze multiplier
    pub fn drop_interval_ms(&self, now: u64) -> u64 {
        let frozen = self.powerups.is_freeze_active(self.session_now(now));
        drop_interval_ms(self.level, frozen)
    }

    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|piece| pieces::ghost_y(&piece, &self.grid))
    }

    /// Take all events queued since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn the next queued piece
    fn spawn_next(&mut self) -> bool {
        let kind = self.queue.next_piece();
        self.spawn_piece(kind)
    }

    /// Place `kind` at the spawn offset; a colliding spawn ends the session
    fn spawn_piece(&mut self, kind: PieceKind) -> bool {
        let piece = Piece::spawn(kind);
        self.drop_elapsed_ms = 0;
        if pieces::collides(&piece, &self.grid, 0, 0) {
            self.active = None;
            self.end_session();
            return false;
        }
        self.active = Some(piece);
        true
    }

    fn end_session(&mut self) {
        self.phase = Phase::GameOver;
        let new_best = self.score > self.best_score;
        if new_best {
            self.best_score = self.score;
        }
        self.events.push(GameEvent::GameOver {
            score: self.score,
            new_best,
        });
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if pieces::collides(piece, &self.grid, dx, dy) {
            return false;
        }
        piece.x += dx;
        piece.y += dy;
        true
    }

    fn try_rotate(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        match pieces::try_rotate(piece, &self.grid) {
            Some((shape, kick)) => {
                piece.shape = shape;
                piece.x += kick;
                true
            }
            None => {
                self.events.push(GameEvent::RotationRejected);
                false
            }
        }
    }

    fn hard_drop(&mut self, now: u64) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };
        let target = pieces::ghost_y(&piece, &self.grid);
        self.score = self
            .score
            .saturating_add(hard_drop_score((target - piece.y) as u32));
        piece.y = target;
        self.active = Some(piece);
        self.lock_active(now);
        true
    }

    /// Swap the active piece with the hold slot
    pub fn hold(&mut self) -> bool {
        if !self.is_playing() || !self.powerups.hold_unlocked || !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold.replace(active.kind) {
            Some(held) => self.spawn_piece(held),
            None => self.spawn_next(),
        };
        self.can_hold = false;
        true
    }

    /// Commit the active piece and either start a flash or spawn the next piece
    fn lock_active(&mut self, now: u64) {
        let Some(piece) = self.active.take() else {
            return;
        };
        pieces::lock(&piece, &mut self.grid);
        self.can_hold = true;
        self.events.push(GameEvent::PieceLocked { kind: piece.kind });

        if self.clear.scan(&self.grid, now) {
            self.events.push(GameEvent::LinesFlashing {
                count: self.clear.flashing_rows().len() as u32,
            });
        } else {
            self.spawn_next();
        }
    }

    /// Remove flashed rows, score them, and spawn the next piece
    fn finish_clear(&mut self) {
        let Some(result) = self.clear.finish(&mut self.grid, self.level) else {
            return;
        };
        self.score = self.score.saturating_add(result.points);
        self.lines = self.lines.saturating_add(result.lines);
        self.level = level_for_lines(self.level, self.lines);
        self.events.push(GameEvent::LinesCleared {
            lines: result.lines,
            points: result.points,
        });
        self.spawn_next();
    }

    /// Advance timers to `now`. Returns true if anything visible changed.
    ///
    /// A flash that elapses this tick finishes without a gravity step; the
    /// freshly spawned piece starts falling on the next tick.
    pub fn tick(&mut self, now: u64) -> bool {
        if !self.is_playing() {
            return false;
        }

        let delta = self
            .last_tick_at
            .map_or(0, |last| now.saturating_sub(last).min(MAX_FRAME_DELTA_MS));
        self.last_tick_at = Some(now);

        let mut changed = self.powerups.expire(now);

        if self.clear.is_flashing() {
            if self.clear.is_elapsed(now) {
                self.finish_clear();
                return true;
            }
            return changed;
        }

        if self.active.is_none() {
            return changed;
        }

        self.drop_elapsed_ms += delta;
        if self.drop_elapsed_ms >= self.drop_interval_ms(now) {
            self.drop_elapsed_ms = 0;
            if !self.try_move(0, 1) {
                self.lock_active(now);
            }
            changed = true;
        }

        changed
    }

    /// Apply a command. Returns true if the state changed.
    ///
    /// Gameplay commands are ignored unless Playing with an active piece.
    pub fn apply_action(&mut self, action: GameAction, now: u64) -> bool {
        match action {
            GameAction::Start => {
                self.start(now);
                return true;
            }
            GameAction::Pause => return self.pause(now),
            GameAction::Resume => return self.resume(now),
            _ => {}
        }

        if !self.is_playing() || self.active.is_none() {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            // Soft drop never locks and scores nothing
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => self.hard_drop(now),
            GameAction::Hold => self.hold(),
            GameAction::Start | GameAction::Pause | GameAction::Resume => false,
        }
    }

    /// Playing -> Paused
    pub fn pause(&mut self, now: u64) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.phase = Phase::Paused;
        self.paused_at = Some(now);
        true
    }

    /// Paused -> Playing, re-anchoring every timer to `now`.
    ///
    /// Ignored while a power-up confirmation is pending.
    pub fn resume(&mut self, now: u64) -> bool {
        if self.phase != Phase::Paused || self.pending.is_some() {
            return false;
        }
        let paused_ms = self
            .paused_at
            .take()
            .map_or(0, |at| now.saturating_sub(at));
        self.clear.shift(paused_ms);
        self.powerups.shift(paused_ms);
        self.last_tick_at = Some(now);
        self.phase = Phase::Playing;
        true
    }

    /// Ask for a power-up. Pauses the session until [`GameState::resolve_powerup`].
    ///
    /// Returns None when refused: outside Playing/Paused, another request is
    /// pending, or the kind's precondition fails.
    pub fn request_powerup(&mut self, kind: PowerupKind, now: u64) -> Option<PowerupRequest> {
        if self.pending.is_some() || !matches!(self.phase, Phase::Playing | Phase::Paused) {
            return None;
        }
        if !self.powerups.can_request(kind, self.session_now(now)) {
            return None;
        }

        let resume_on_finish = self.is_playing();
        if resume_on_finish {
            self.pause(now);
        }
        let request = PowerupRequest {
            kind,
            cost_cents: kind.cost_cents(),
            session_id: self.session_id,
            resume_on_finish,
        };
        self.pending = Some(request);
        self.events.push(GameEvent::PowerupRequested { kind });
        Some(request)
    }

    /// Settle the pending request. Returns true if the effect was applied.
    ///
    /// Results for anything but the current pending request are ignored.
    pub fn resolve_powerup(
        &mut self,
        request: &PowerupRequest,
        outcome: PowerupOutcome,
        now: u64,
    ) -> bool {
        if self.pending.as_ref() != Some(request) {
            return false;
        }
        self.pending = None;

        let applied = outcome.is_confirmed();
        if applied {
            self.apply_powerup(request.kind, self.session_now(now));
            self.events.push(GameEvent::PowerupApplied { kind: request.kind });
        } else {
            self.events.push(GameEvent::PowerupDeclined { kind: request.kind });
        }

        if request.resume_on_finish {
            self.resume(now);
        }
        applied
    }

    fn apply_powerup(&mut self, kind: PowerupKind, session_now: u64) {
        if kind == PowerupKind::Bomb {
            self.grid.remove_bottom_rows(BOMB_ROWS);
            self.clear.rows_removed_from_bottom(BOMB_ROWS);
        }
        self.powerups.apply(kind, session_now);
    }

    /// Fill `out` with the current state
    pub fn snapshot_into(&self, out: &mut GameSnapshot, now: u64) {
        self.grid.write_u8_grid(&mut out.grid);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold_unlocked = self.powerups.hold_unlocked;
        out.future_sight_unlocked = self.powerups.future_sight_unlocked;
        out.hold = if out.hold_unlocked { self.hold } else { None };
        out.can_hold = self.can_hold;
        let lookahead = if out.future_sight_unlocked {
            PREVIEW_FUTURE_SIGHT
        } else {
            PREVIEW_BASIC
        };
        out.preview.clear();
        out.preview.extend(self.queue.peek(lookahead));
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.best_score = self.best_score;
        out.phase = self.phase;
        out.flashing_rows.clear();
        out.flashing_rows
            .extend(self.clear.flashing_rows().iter().copied());
        out.freeze_remaining_secs = self
            .powerups
            .freeze_remaining_secs(self.session_now(now));
        out.pending_powerup = self.pending.map(|p| p.kind);
        out.session_id = self.session_id;
    }

    pub fn snapshot(&self, now: u64) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out, now);
        out
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
