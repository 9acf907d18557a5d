//! RNG module - seedable random source and the lookahead queue
//!
//! Piece kinds are drawn uniformly and independently (no 7-bag), so repeats
//! and droughts are possible. The random source is injected at construction:
//! tests pass a fixed seed, production seeds from the clock.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{PieceKind, QUEUE_MIN_LEN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Seed from the system clock
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        Self::new((nanos as u32) ^ ((nanos >> 32) as u32))
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales from the high bits; the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Lookahead queue of upcoming piece kinds
#[derive(Debug, Clone)]
pub struct PieceQueue {
    upcoming: VecDeque<PieceKind>,
    rng: SimpleRng,
    seed: u32,
}

impl PieceQueue {
    /// Create a queue filled with uniform draws from `rng`
    pub fn new(rng: SimpleRng) -> Self {
        Self::with_preset(&[], rng)
    }

    /// Create a queue whose first pieces are `preset`, followed by uniform draws.
    ///
    /// Used by tests and demos that need a known opening sequence.
    pub fn with_preset(preset: &[PieceKind], rng: SimpleRng) -> Self {
        let mut queue = Self {
            upcoming: preset.iter().copied().collect(),
            seed: rng.state(),
            rng,
        };
        queue.refill();
        queue
    }

    fn random_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    fn refill(&mut self) {
        while self.upcoming.len() < QUEUE_MIN_LEN {
            let kind = self.random_kind();
            self.upcoming.push_back(kind);
        }
    }

    /// Pop the front piece and refill back to the minimum length
    pub fn next_piece(&mut self) -> PieceKind {
        // refill() keeps the queue non-empty between calls
        let kind = match self.upcoming.pop_front() {
            Some(kind) => kind,
            None => self.random_kind(),
        };
        self.refill();
        kind
    }

    /// Drop the lookahead and refill it with fresh draws
    pub fn reset(&mut self) {
        self.upcoming.clear();
        self.refill();
    }

    /// Peek at the next `n` pieces without consuming them
    pub fn peek(&self, n: usize) -> impl Iterator<Item = PieceKind> + '_ {
        self.upcoming.iter().copied().take(n)
    }

    /// Number of pieces currently queued
    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }

    /// RNG state the queue was created with (for replaying a session)
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(SimpleRng::new(1))
    }
}
