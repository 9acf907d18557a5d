//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, game loop, payment adapter, renderers).
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: horizontally centred on the shape, y = 0
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Target frame interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity at level 1 |
//! | `DROP_STEP_MS` | 100 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity floor |
//! | `FLASH_MS` | 200 | Line-clear flash window |
//! | `TIME_FREEZE_MS` | 15000 | Time-freeze power-up window |
//! | `MAX_FRAME_DELTA_MS` | 100 | Cap on one frame's contribution to gravity |
//!
//! # Examples
//!
//! ```
//! use neon_tetris_types::{GameAction, PieceKind, PowerupKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.shape().width(), 3);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(PowerupKind::Bomb.cost_cents(), 10);
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Target frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u64 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u64 = 1000;

/// Gravity speed-up per level above 1
pub const DROP_STEP_MS: u64 = 100;

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u64 = 100;

/// Longest slice of wall-clock time a single frame may feed into gravity.
///
/// A stalled frame (debugger, suspended tab, slow host) only advances gravity
/// by this much, so the active piece never teleports after a hiccup.
pub const MAX_FRAME_DELTA_MS: u64 = 100;

/// Duration of the line-clear flash before rows are removed
pub const FLASH_MS: u64 = 200;

/// Duration of the time-freeze power-up window
pub const TIME_FREEZE_MS: u64 = 15_000;

/// Drop interval multiplier while time freeze is active
pub const TIME_FREEZE_FACTOR: u64 = 4;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Minimum number of upcoming pieces kept in the queue
pub const QUEUE_MIN_LEN: usize = 3;

/// Lookahead shown without future sight
pub const PREVIEW_BASIC: usize = 1;

/// Lookahead shown with future sight unlocked
pub const PREVIEW_FUTURE_SIGHT: usize = 3;

/// Horizontal kick offsets tried in order when a rotation collides
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// Points per row travelled on hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Rows removed from the bottom by the bomb power-up
pub const BOMB_ROWS: usize = 3;

/// Line clear scoring table, indexed by rows cleared and multiplied by level
///
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Largest edge of any shape matrix
pub const SHAPE_MAX: usize = 4;

/// RGB colour used by renderers for a piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Occupancy matrix of a piece, stored in a fixed 4x4 buffer.
///
/// Only the top-left `height x width` corner is meaningful. Row 0 is the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    rows: [[bool; SHAPE_MAX]; SHAPE_MAX],
}

impl Shape {
    /// Build a shape from row-major 0/1 rows.
    ///
    /// Rows longer than [`SHAPE_MAX`] or more than [`SHAPE_MAX`] rows are truncated.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len().min(SHAPE_MAX);
        let width = rows
            .iter()
            .take(height)
            .map(|r| r.len())
            .max()
            .unwrap_or(0)
            .min(SHAPE_MAX);
        let mut out = [[false; SHAPE_MAX]; SHAPE_MAX];
        for (y, row) in rows.iter().take(height).enumerate() {
            for (x, &v) in row.iter().take(width).enumerate() {
                out[y][x] = v != 0;
            }
        }
        Self {
            width: width as u8,
            height: height as u8,
            rows: out,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the cell at column `x`, row `y` is filled (false outside the shape)
    pub fn get(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height && self.rows[y as usize][x as usize]
    }

    /// Iterate `(dx, dy)` offsets of the filled cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.rows[y as usize][x as usize])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Rotate 90° clockwise.
    ///
    /// For an `h x w` shape the result is `w x h` with `out[x][h - 1 - y] = in[y][x]`.
    pub fn rotate_cw(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut out = [[false; SHAPE_MAX]; SHAPE_MAX];
        for y in 0..h {
            for x in 0..w {
                out[x][h - 1 - y] = self.rows[y][x];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            rows: out,
        }
    }
}

/// The seven tetromino piece kinds
///
/// Each kind carries its canonical shape matrix and display colour:
/// - **I**: Cyan, horizontal bar
/// - **O**: Gold, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order (the order the uniform generator indexes into)
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Canonical (spawn) shape matrix
    pub fn shape(&self) -> Shape {
        match self {
            PieceKind::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
            PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
            PieceKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
            PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
            PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
            PieceKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
            PieceKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
        }
    }

    /// Display colour
    pub fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(0x00, 0xf0, 0xff),
            PieceKind::O => Rgb::new(0xff, 0xd7, 0x00),
            PieceKind::T => Rgb::new(0xa8, 0x55, 0xf7),
            PieceKind::S => Rgb::new(0x22, 0xc5, 0x5e),
            PieceKind::Z => Rgb::new(0xef, 0x44, 0x44),
            PieceKind::J => Rgb::new(0x3b, 0x82, 0xf6),
            PieceKind::L => Rgb::new(0xf9, 0x73, 0x16),
        }
    }

    /// Compact grid code (1..=7); 0 is reserved for empty cells
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Commands accepted by the game state
///
/// The first six are gameplay commands and are ignored outside `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (no score, never locks)
    SoftDrop,
    /// Rotate piece 90° clockwise with horizontal kicks
    Rotate,
    /// Drop to the ghost position, score, and lock
    HardDrop,
    /// Swap with the hold slot (requires the hold unlock)
    Hold,
    /// Playing -> Paused
    Pause,
    /// Paused -> Playing
    Resume,
    /// Begin a fresh session from any phase
    Start,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::Start => "start",
        }
    }
}

/// Paid power-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerupKind {
    /// Remove the bottom three rows
    Bomb,
    /// Quadruple the drop interval for 15 seconds
    TimeFreeze,
    /// Enable the hold slot for the rest of the session
    HoldUnlock,
    /// Show three lookahead pieces instead of one
    FutureSight,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 4] = [
        PowerupKind::Bomb,
        PowerupKind::TimeFreeze,
        PowerupKind::HoldUnlock,
        PowerupKind::FutureSight,
    ];

    /// Price in US cents
    pub fn cost_cents(&self) -> u32 {
        match self {
            PowerupKind::Bomb => 10,
            PowerupKind::TimeFreeze => 30,
            PowerupKind::HoldUnlock => 50,
            PowerupKind::FutureSight => 50,
        }
    }

    /// Price in US dollars
    pub fn cost_usd(&self) -> f64 {
        self.cost_cents() as f64 / 100.0
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bomb" | "tnt" => Some(PowerupKind::Bomb),
            "freeze" | "timefreeze" => Some(PowerupKind::TimeFreeze),
            "hold" | "holdunlock" => Some(PowerupKind::HoldUnlock),
            "future" | "futuresight" => Some(PowerupKind::FutureSight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Bomb => "bomb",
            PowerupKind::TimeFreeze => "freeze",
            PowerupKind::HoldUnlock => "hold",
            PowerupKind::FutureSight => "future",
        }
    }
}

/// Session phase
///
/// `Start -> Playing <-> Paused`, `Playing -> GameOver`. A new session can be
/// started from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Start,
    Playing,
    Paused,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::GameOver => "gameover",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;
