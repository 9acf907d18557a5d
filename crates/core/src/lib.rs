//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on rendering, payments, or I/O, making it:
//!
//! - **Deterministic**: Same seed (and same timestamps) produce identical games
//! - **Testable**: Every timer is driven by the caller's `now`, no real clock involved
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 playfield with row removal and compaction
//! - [`pieces`]: the active piece, collision test, rotation with horizontal kicks, ghost
//! - [`rng`]: seedable LCG and the uniform lookahead queue
//! - [`scoring`]: line-clear table, hard-drop points, level curve, gravity curve
//! - [`clear`]: line detection and the 200ms flash window
//! - [`powerup`]: unlock flags, time freeze, pending payment requests
//! - [`game_state`]: the session state machine tying it all together
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use neon_tetris_core::GameState;
//! use neon_tetris_types::{GameAction, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.start(0);
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! game.apply_action(GameAction::MoveRight, 0);
//! game.apply_action(GameAction::Rotate, 0);
//! game.apply_action(GameAction::HardDrop, 0);
//!
//! assert!(game.score() > 0); // Hard drop awards two points per row
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) once per frame with the
//! current monotonic time in milliseconds:
//! - **Gravity**: 1000ms at level 1, 100ms faster per level, floor of 100ms
//! - **Time freeze**: gravity interval x4 for 15 seconds
//! - **Line clear**: completed rows flash for 200ms before removal

pub mod clear;
pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod powerup;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use neon_tetris_types as types;

// Re-export commonly used types for convenience
pub use clear::{ClearEngine, ClearResult, FlashSet};
pub use game_state::{GameEvent, GameState};
pub use grid::{Grid, RowSet};
pub use pieces::{collides, ghost_y, lock, try_rotate, Piece};
pub use powerup::{PowerupOutcome, PowerupRequest, PowerupState};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{drop_interval_ms, hard_drop_score, level_for_lines, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot, Preview};
