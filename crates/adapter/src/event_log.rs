//! JSON-lines event log.
//!
//! Records are queued on an unbounded channel and written by a background
//! task, so the game loop never waits on the file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{GameEvent, PowerupOutcome, PowerupRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    SessionStarted {
        session_id: u32,
    },
    LinesCleared {
        session_id: u32,
        lines: u32,
        points: u32,
    },
    PaymentRequested {
        session_id: u32,
        kind: String,
        cost_cents: u32,
    },
    PaymentResolved {
        session_id: u32,
        kind: String,
        outcome: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    SessionEnded {
        session_id: u32,
        score: u32,
        new_best: bool,
    },
}

impl LogRecord {
    pub fn payment_requested(request: &PowerupRequest) -> Self {
        LogRecord::PaymentRequested {
            session_id: request.session_id,
            kind: request.kind.as_str().to_string(),
            cost_cents: request.cost_cents,
        }
    }

    pub fn payment_resolved(request: &PowerupRequest, outcome: &PowerupOutcome) -> Self {
        let (outcome, reason) = match outcome {
            PowerupOutcome::Confirmed => ("confirmed", None),
            PowerupOutcome::Cancelled => ("cancelled", None),
            PowerupOutcome::Failed(reason) => ("failed", Some(reason.clone())),
        };
        LogRecord::PaymentResolved {
            session_id: request.session_id,
            kind: request.kind.as_str().to_string(),
            outcome: outcome.to_string(),
            reason,
        }
    }

    /// Record for a core event, if it is one worth logging
    pub fn from_game_event(session_id: u32, event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::SessionStarted { session_id } => {
                Some(LogRecord::SessionStarted { session_id })
            }
            GameEvent::LinesCleared { lines, points } => Some(LogRecord::LinesCleared {
                session_id,
                lines,
                points,
            }),
            GameEvent::GameOver { score, new_best } => Some(LogRecord::SessionEnded {
                session_id,
                score,
                new_best,
            }),
            _ => None,
        }
    }
}

/// Handle for queueing records. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventLog {
    tx: mpsc::UnboundedSender<LogRecord>,
}

impl EventLog {
    /// Spawn the writer task on `handle`, appending to `path`.
    ///
    /// The task ends once every handle is dropped and the queue is drained.
    pub fn spawn(handle: &Handle, path: PathBuf) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<LogRecord>();
        let task = handle.spawn(async move {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            let mut file = match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .await
            {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("[EventLog] Cannot open {}: {}", path.display(), e);
                    return;
                }
            };

            let mut buf: Vec<u8> = Vec::with_capacity(256);

            while let Some(record) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &record).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if file.write_all(&buf).await.is_err() {
                    break;
                }
            }

            let _ = file.flush().await;
        });
        (Self { tx }, task)
    }

    pub fn log(&self, record: LogRecord) {
        let _ = self.tx.send(record);
    }
}
