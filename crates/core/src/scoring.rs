//! Scoring module - line-clear points, hard-drop points, level curve, gravity
//!
//! All values use the level *before* the clear is applied.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL,
    LINE_SCORES, TIME_FREEZE_FACTOR,
};

/// Calculate line clear score
/// lines: number of lines cleared (anything above 4 scores as 4)
/// level: current level (1-based)
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES[lines.min(4)].saturating_mul(level)
}

/// Points for a hard drop over `rows` rows
pub fn hard_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level after a clear: never decreases, otherwise `lines / 10 + 1`
pub fn level_for_lines(current_level: u32, total_lines: u32) -> u32 {
    current_level.max(total_lines / LINES_PER_LEVEL + 1)
}

/// Gravity interval for a level, quadrupled while time freeze is active
pub fn drop_interval_ms(level: u32, frozen: bool) -> u64 {
    let speedup = (level.saturating_sub(1) as u64).saturating_mul(DROP_STEP_MS);
    let interval = BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS);
    if frozen {
        interval * TIME_FREEZE_FACTOR
    } else {
        interval
    }
}
