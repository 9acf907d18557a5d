//! Adapter module - the game's outside collaborators
//!
//! Everything here touches the world beyond the pure core: payment
//! confirmation, high-score persistence, and structured logging. The game loop
//! stays synchronous; async work runs on a tokio runtime owned by
//! [`PaymentBridge`] and results are handed back through channels.
//!
//! # Components
//!
//! - [`config`]: [`AdapterConfig::from_env`]
//! - [`payments`]: the [`PaymentGateway`] trait and a simulated gateway
//! - [`runtime`]: [`PaymentBridge`], the engine's payment confirmer
//! - [`highscores`]: a JSON file implementation of the high-score store
//! - [`event_log`]: JSON-lines event log written by a background task
//!
//! # Environment Variables
//!
//! - `NEON_TETRIS_PAYMENTS_DISABLED`: "1" or "true" cancels every power-up request
//! - `NEON_TETRIS_PAYMENT_DELAY_MS`: simulated confirmation latency (default: 1500)
//! - `NEON_TETRIS_PAYMENT_TIMEOUT_MS`: confirmation deadline (default: 30000)
//! - `NEON_TETRIS_PAYMENT_AUTO_APPROVE`: simulated verdict (default: true)
//! - `NEON_TETRIS_HIGHSCORE_PATH`: high-score file (default: "neon_tetris_highscore.json")
//! - `NEON_TETRIS_LOG_PATH`: JSON-lines event log (default: none)
//!
//! # Event Log Format
//!
//! ```text
//! {"type":"session_started","session_id":1}
//! {"type":"payment_requested","session_id":1,"kind":"freeze","cost_cents":30}
//! {"type":"payment_resolved","session_id":1,"kind":"freeze","outcome":"confirmed"}
//! {"type":"session_ended","session_id":1,"score":4200,"new_best":true}
//! ```

pub mod config;
pub mod event_log;
pub mod highscores;
pub mod payments;
pub mod runtime;

pub use neon_tetris_core as core;
pub use neon_tetris_engine as engine;
pub use neon_tetris_types as types;

pub use config::AdapterConfig;
pub use event_log::{EventLog, LogRecord};
pub use highscores::JsonFileHighScores;
pub use payments::{confirm_powerup, PaymentGateway, PaymentIntent, PaymentStatus, SimulatedGateway};
pub use runtime::PaymentBridge;
