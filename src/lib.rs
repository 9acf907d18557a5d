//! Neon Tetris (workspace facade crate).
//!
//! Re-exports the member crates as `neon_tetris::{types,core,engine,adapter}` and
//! hosts the headless demo runner used by the default binary.

pub mod demo;

pub use neon_tetris_adapter as adapter;
pub use neon_tetris_core as core;
pub use neon_tetris_engine as engine;
pub use neon_tetris_types as types;
