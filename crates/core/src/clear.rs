//! Clear engine - line detection, the flash window, and row removal
//!
//! `Idle -> Flashing -> Idle`. While flashing the rows stay on the grid so
//! renderers can highlight them; they are removed once [`FLASH_MS`] has passed.

use crate::grid::{Grid, RowSet};
use crate::scoring::line_clear_score;
use crate::types::{FLASH_MS, GRID_HEIGHT};

/// Completed rows waiting out the flash window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashSet {
    pub rows: RowSet,
    /// Monotonic ms when the flash began
    pub started_at: u64,
}

/// Outcome of a finished flash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearResult {
    pub lines: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ClearEngine {
    flash: Option<FlashSet>,
}

impl ClearEngine {
    pub fn new() -> Self {
        Self { flash: None }
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    pub fn flash(&self) -> Option<&FlashSet> {
        self.flash.as_ref()
    }

    /// Rows currently flashing (empty when idle)
    pub fn flashing_rows(&self) -> &[u8] {
        self.flash.as_ref().map_or(&[][..], |f| f.rows.as_slice())
    }

    /// Scan the grid after a lock. Returns true if a flash started.
    pub fn scan(&mut self, grid: &Grid, now: u64) -> bool {
        let rows = grid.full_rows();
        if rows.is_empty() {
            return false;
        }
        self.flash = Some(FlashSet {
            rows,
            started_at: now,
        });
        true
    }

    /// Whether the flash window has run out at `now`
    pub fn is_elapsed(&self, now: u64) -> bool {
        self.flash
            .as_ref()
            .is_some_and(|f| now.saturating_sub(f.started_at) >= FLASH_MS)
    }

    /// Remove the flashed rows and score them at `level`.
    ///
    /// Returns None when idle.
    pub fn finish(&mut self, grid: &mut Grid, level: u32) -> Option<ClearResult> {
        let flash = self.flash.take()?;
        let lines = grid.remove_rows(&flash.rows);
        Some(ClearResult {
            lines: lines as u32,
            points: line_clear_score(lines, level),
        })
    }

    /// Push the flash start forward by a paused duration
    pub fn shift(&mut self, paused_ms: u64) {
        if let Some(flash) = self.flash.as_mut() {
            flash.started_at = flash.started_at.saturating_add(paused_ms);
        }
    }

    /// Follow the grid after the bottom `count` rows were removed: flashed rows
    /// inside the removed band are dropped, the rest move down with the grid.
    pub fn rows_removed_from_bottom(&mut self, count: usize) {
        let Some(flash) = self.flash.as_mut() else {
            return;
        };
        let cutoff = GRID_HEIGHT as usize - count.min(GRID_HEIGHT as usize);
        flash.rows = flash
            .rows
            .iter()
            .filter(|&&y| (y as usize) < cutoff)
            .map(|&y| y + count as u8)
            .collect();
    }

    pub fn reset(&mut self) {
        self.flash = None;
    }
}
