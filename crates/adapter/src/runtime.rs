//! Payment bridge.
//!
//! Bridges the sync game loop with async payment confirmation: requests are
//! spawned on an owned tokio runtime, and outcomes come back through a channel
//! the loop drains once per frame.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::AdapterConfig;
use crate::core::{PowerupOutcome, PowerupRequest};
use crate::engine::PowerupConfirmer;
use crate::event_log::{EventLog, LogRecord};
use crate::payments::{confirm_powerup, PaymentGateway, SimulatedGateway};

type Settled = (PowerupRequest, PowerupOutcome);

/// Running bridge instance.
pub struct PaymentBridge {
    rt: Runtime,
    gateway: Arc<dyn PaymentGateway>,
    timeout: Duration,
    disabled: bool,
    result_tx: mpsc::UnboundedSender<Settled>,
    result_rx: mpsc::UnboundedReceiver<Settled>,
    log: Option<EventLog>,
    log_task: Option<JoinHandle<()>>,
}

impl PaymentBridge {
    /// Start with the simulated gateway described by `config`
    pub fn start(config: &AdapterConfig) -> Result<Self> {
        let gateway = SimulatedGateway::new(config.payment_delay, config.auto_approve);
        Self::with_gateway(Arc::new(gateway), config)
    }

    pub fn with_gateway(gateway: Arc<dyn PaymentGateway>, config: &AdapterConfig) -> Result<Self> {
        let rt = Runtime::new().context("Failed to create tokio runtime")?;
        let (result_tx, result_rx) = mpsc::unbounded_channel::<Settled>();

        if config.payments_disabled {
            eprintln!("[Payments] Power-up payments disabled (NEON_TETRIS_PAYMENTS_DISABLED)");
        }

        let (log, log_task) = match config.log_path.clone() {
            Some(path) => {
                let (log, task) = EventLog::spawn(rt.handle(), path);
                (Some(log), Some(task))
            }
            None => (None, None),
        };

        Ok(Self {
            rt,
            gateway,
            timeout: config.payment_timeout,
            disabled: config.payments_disabled,
            result_tx,
            result_rx,
            log,
            log_task,
        })
    }

    /// Runtime handle, for collaborators that need to spawn on the same runtime
    pub fn handle(&self) -> &Handle {
        self.rt.handle()
    }

    /// Event log attached to this bridge, if one is configured
    pub fn event_log(&self) -> Option<&EventLog> {
        self.log.as_ref()
    }

    /// Stop the bridge, giving the event log up to `grace` to drain.
    ///
    /// Confirmations still in flight are abandoned.
    pub fn shutdown(mut self, grace: Duration) {
        self.log = None;
        if let Some(task) = self.log_task.take() {
            let _ = self
                .rt
                .block_on(async { tokio::time::timeout(grace, task).await });
        }
    }

    fn settle(&self, request: PowerupRequest, outcome: PowerupOutcome) {
        if let Some(log) = self.log.as_ref() {
            log.log(LogRecord::payment_resolved(&request, &outcome));
        }
        let _ = self.result_tx.send((request, outcome));
    }
}

impl PowerupConfirmer for PaymentBridge {
    fn submit(&mut self, request: PowerupRequest) {
        if let Some(log) = self.log.as_ref() {
            log.log(LogRecord::payment_requested(&request));
        }

        if self.disabled {
            self.settle(request, PowerupOutcome::Cancelled);
            return;
        }

        eprintln!(
            "[Payments] Requesting {} for ${:.2}",
            request.kind.as_str(),
            request.cost_usd()
        );

        let gateway = Arc::clone(&self.gateway);
        let timeout = self.timeout;
        let tx = self.result_tx.clone();
        let log = self.log.clone();
        self.rt.spawn(async move {
            let outcome = confirm_powerup(gateway.as_ref(), &request, timeout).await;
            match &outcome {
                PowerupOutcome::Confirmed => {
                    eprintln!("[Payments] {} confirmed", request.kind.as_str())
                }
                PowerupOutcome::Cancelled => {
                    eprintln!("[Payments] {} cancelled", request.kind.as_str())
                }
                PowerupOutcome::Failed(reason) => {
                    eprintln!("[Payments] {} failed: {}", request.kind.as_str(), reason)
                }
            }
            if let Some(log) = log {
                log.log(LogRecord::payment_resolved(&request, &outcome));
            }
            let _ = tx.send((request, outcome));
        });
    }

    fn poll(&mut self) -> Option<Settled> {
        self.result_rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PowerupKind;
    use std::time::Instant;

    fn request(kind: PowerupKind) -> PowerupRequest {
        PowerupRequest {
            kind,
            cost_cents: kind.cost_cents(),
            session_id: 1,
            resume_on_finish: true,
        }
    }

    fn wait_for(bridge: &mut PaymentBridge) -> Option<Settled> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(settled) = bridge.poll() {
                return Some(settled);
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        None
    }

    #[test]
    fn test_disabled_bridge_cancels_immediately() {
        let config = AdapterConfig {
            payments_disabled: true,
            ..AdapterConfig::default()
        };
        let mut bridge = PaymentBridge::start(&config).unwrap();
        bridge.submit(request(PowerupKind::Bomb));
        let (req, outcome) = bridge.poll().unwrap();
        assert_eq!(req.kind, PowerupKind::Bomb);
        assert_eq!(outcome, PowerupOutcome::Cancelled);
    }

    #[test]
    fn test_bridge_delivers_confirmation() {
        let config = AdapterConfig {
            payment_delay: Duration::from_millis(10),
            ..AdapterConfig::default()
        };
        let mut bridge = PaymentBridge::start(&config).unwrap();
        assert!(bridge.poll().is_none());
        bridge.submit(request(PowerupKind::TimeFreeze));
        let (req, outcome) = wait_for(&mut bridge).unwrap();
        assert_eq!(req.kind, PowerupKind::TimeFreeze);
        assert_eq!(outcome, PowerupOutcome::Confirmed);
    }

    #[test]
    fn test_bridge_times_out_slow_gateway() {
        let config = AdapterConfig {
            payment_delay: Duration::from_secs(30),
            payment_timeout: Duration::from_millis(20),
            ..AdapterConfig::default()
        };
        let mut bridge = PaymentBridge::start(&config).unwrap();
        bridge.submit(request(PowerupKind::HoldUnlock));
        let (_, outcome) = wait_for(&mut bridge).unwrap();
        assert!(matches!(outcome, PowerupOutcome::Failed(_)));
    }
}
