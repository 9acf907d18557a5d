//! Power-up state - unlock flags, the time-freeze window, and the pending request
//!
//! Effects are applied only after the payment side reports a confirmation.
//! Requesting a power-up pauses the session; resolving it resumes the session
//! if it was running when the request was made.

use crate::types::{PowerupKind, TIME_FREEZE_MS};

/// Result of a payment confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowerupOutcome {
    Confirmed,
    Cancelled,
    Failed(String),
}

impl PowerupOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, PowerupOutcome::Confirmed)
    }
}

/// A power-up waiting for payment confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerupRequest {
    pub kind: PowerupKind,
    pub cost_cents: u32,
    /// Session the request was made in
    pub session_id: u32,
    /// Whether the session was Playing (and should resume) when the request was made
    pub resume_on_finish: bool,
}

impl PowerupRequest {
    pub fn cost_usd(&self) -> f64 {
        self.cost_cents as f64 / 100.0
    }
}

/// Per-session power-up flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerupState {
    pub hold_unlocked: bool,
    pub future_sight_unlocked: bool,
    /// Monotonic ms when the time freeze ends
    pub freeze_until: Option<u64>,
}

impl PowerupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_freeze_active(&self, now: u64) -> bool {
        self.freeze_until.is_some_and(|until| now < until)
    }

    /// Whole seconds left on the freeze, rounded up (0 when inactive)
    pub fn freeze_remaining_secs(&self, now: u64) -> u32 {
        match self.freeze_until {
            Some(until) if now < until => (until - now).div_ceil(1000) as u32,
            _ => 0,
        }
    }

    /// Drop an expired freeze. Returns true if it just expired.
    pub fn expire(&mut self, now: u64) -> bool {
        match self.freeze_until {
            Some(until) if now >= until => {
                self.freeze_until = None;
                true
            }
            _ => false,
        }
    }

    /// Push the freeze deadline forward by a paused duration
    pub fn shift(&mut self, paused_ms: u64) {
        if let Some(until) = self.freeze_until.as_mut() {
            *until = until.saturating_add(paused_ms);
        }
    }

    /// Whether `kind`'s precondition holds
    pub fn can_request(&self, kind: PowerupKind, now: u64) -> bool {
        match kind {
            PowerupKind::Bomb => true,
            PowerupKind::TimeFreeze => !self.is_freeze_active(now),
            PowerupKind::HoldUnlock => !self.hold_unlocked,
            PowerupKind::FutureSight => !self.future_sight_unlocked,
        }
    }

    /// Apply the flag side of an effect. The bomb's grid mutation is done by
    /// the caller, which owns the grid.
    pub fn apply(&mut self, kind: PowerupKind, now: u64) {
        match kind {
            PowerupKind::Bomb => {}
            PowerupKind::TimeFreeze => self.freeze_until = Some(now + TIME_FREEZE_MS),
            PowerupKind::HoldUnlock => self.hold_unlocked = true,
            PowerupKind::FutureSight => self.future_sight_unlocked = true,
        }
    }
}
