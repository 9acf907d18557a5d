//! Engine module - the cooperative game loop around the core state
//!
//! The core is pure: it takes `now` as an argument and never touches I/O.
//! This crate supplies the collaborators the core needs at runtime:
//!
//! - [`clock`]: monotonic and hand-driven time sources
//! - [`confirm`]: the payment confirmation boundary polled once per frame
//! - [`highscore`]: the best-score store boundary
//! - [`game_loop`]: [`GameLoop`] wiring the three around a [`GameState`](crate::core::GameState)
//!
//! # Example
//!
//! ```
//! use neon_tetris_core::GameState;
//! use neon_tetris_engine::{GameLoop, ManualClock, MemoryHighScores, ScriptedConfirmer};
//! use neon_tetris_types::{GameAction, TICK_MS};
//!
//! let clock = ManualClock::new(0);
//! let mut game_loop = GameLoop::new(
//!     GameState::new(7),
//!     clock.clone(),
//!     MemoryHighScores::default(),
//!     ScriptedConfirmer::approving(),
//! );
//! game_loop.start();
//! for _ in 0..120 {
//!     clock.advance(TICK_MS);
//!     game_loop.frame();
//! }
//! game_loop.command(GameAction::HardDrop);
//! assert!(game_loop.snapshot().score > 0);
//! ```

pub mod clock;
pub mod confirm;
pub mod game_loop;
pub mod highscore;

pub use neon_tetris_core as core;
pub use neon_tetris_types as types;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use confirm::{ManualConfirmer, PowerupConfirmer, ScriptedConfirmer};
pub use game_loop::GameLoop;
pub use highscore::{HighScoreStore, MemoryHighScores};
