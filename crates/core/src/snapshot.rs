use arrayvec::ArrayVec;

use crate::grid::RowSet;
use crate::pieces::Piece;
use crate::types::{
    Phase, PieceKind, PowerupKind, Shape, GRID_HEIGHT, GRID_WIDTH, PREVIEW_FUTURE_SIGHT,
};

pub type Preview = ArrayVec<PieceKind, PREVIEW_FUTURE_SIGHT>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of a session for renderers and collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Piece codes per cell, 0 = empty (see [`PieceKind::code`])
    pub grid: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    /// Held piece; always None until hold is unlocked
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    /// One piece, or three with future sight
    pub preview: Preview,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub best_score: u32,
    pub phase: Phase,
    pub flashing_rows: RowSet,
    pub freeze_remaining_secs: u32,
    pub hold_unlocked: bool,
    pub future_sight_unlocked: bool,
    pub pending_powerup: Option<PowerupKind>,
    pub session_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.hold = None;
        self.can_hold = true;
        self.preview.clear();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.best_score = 0;
        self.phase = Phase::Start;
        self.flashing_rows.clear();
        self.freeze_remaining_secs = 0;
        self.hold_unlocked = false;
        self.future_sight_unlocked = false;
        self.pending_powerup = None;
        self.session_id = 0;
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing && self.pending_powerup.is_none()
    }

    /// Kind stored at `(x, y)`, None if empty or out of bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<PieceKind> {
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .and_then(|&code| PieceKind::from_code(code))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            can_hold: true,
            preview: Preview::new(),
            score: 0,
            level: 1,
            lines: 0,
            best_score: 0,
            phase: Phase::Start,
            flashing_rows: RowSet::new(),
            freeze_remaining_secs: 0,
            hold_unlocked: false,
            future_sight_unlocked: false,
            pending_powerup: None,
            session_id: 0,
        };
        s.clear();
        s
    }
}
