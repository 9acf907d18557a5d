//! High-score store boundary.
//!
//! The loop reads the previous best when a session starts and writes a new best
//! when a session ends above it. Store failures never affect the session.

use anyhow::Result;

pub trait HighScoreStore {
    /// Best score recorded so far (0 if none)
    fn load_best(&mut self) -> Result<u32>;

    fn save_best(&mut self, score: u32) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScores {
    best: u32,
    saves: u32,
}

impl MemoryHighScores {
    pub fn new(best: u32) -> Self {
        Self { best, saves: 0 }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Number of successful writes
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryHighScores {
    fn load_best(&mut self) -> Result<u32> {
        Ok(self.best)
    }

    fn save_best(&mut self, score: u32) -> Result<()> {
        self.best = score;
        self.saves += 1;
        Ok(())
    }
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn load_best(&mut self) -> Result<u32> {
        (**self).load_best()
    }

    fn save_best(&mut self, score: u32) -> Result<()> {
        (**self).save_best(score)
    }
}
