//! Payment gateway boundary.
//!
//! A gateway turns a power-up purchase into a confirmation future. The real
//! wallet flow lives outside this repository; [`SimulatedGateway`] stands in
//! for it with a configurable delay and verdict.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::core::{PowerupOutcome, PowerupRequest};
use crate::types::PowerupKind;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// What is being paid for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentIntent {
    pub kind: &'static str,
    pub cost_cents: u32,
    pub cost_usd: f64,
    pub session_id: u32,
}

impl From<&PowerupRequest> for PaymentIntent {
    fn from(request: &PowerupRequest) -> Self {
        Self {
            kind: request.kind.as_str(),
            cost_cents: request.cost_cents,
            cost_usd: request.cost_usd(),
            session_id: request.session_id,
        }
    }
}

/// Gateway verdict for a payment that did not error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Settled; carries the gateway's reference
    Confirmed(String),
    /// The player backed out
    Cancelled,
}

pub trait PaymentGateway: Send + Sync + 'static {
    /// Start a payment. Errors mean the payment failed (declined, network, ...).
    fn confirm(&self, intent: PaymentIntent) -> BoxFuture<Result<PaymentStatus>>;
}

/// Stand-in gateway: waits `delay`, then approves or declines
#[derive(Debug)]
pub struct SimulatedGateway {
    delay: Duration,
    approve: bool,
    counter: AtomicU64,
}

impl SimulatedGateway {
    pub fn new(delay: Duration, approve: bool) -> Self {
        Self {
            delay,
            approve,
            counter: AtomicU64::new(0),
        }
    }

    /// Number of payments started so far
    pub fn attempts(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

impl PaymentGateway for SimulatedGateway {
    fn confirm(&self, intent: PaymentIntent) -> BoxFuture<Result<PaymentStatus>> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.delay;
        let approve = self.approve;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            if approve {
                Ok(PaymentStatus::Confirmed(format!(
                    "sim-{}-{}-{}",
                    intent.session_id, intent.kind, n
                )))
            } else {
                Err(anyhow!(
                    "payment of ${:.2} for {} declined",
                    intent.cost_usd,
                    intent.kind
                ))
            }
        })
    }
}

/// Run one confirmation to completion, mapping every way it can end to an outcome
pub async fn confirm_powerup(
    gateway: &dyn PaymentGateway,
    request: &PowerupRequest,
    timeout: Duration,
) -> PowerupOutcome {
    let intent = PaymentIntent::from(request);
    match tokio::time::timeout(timeout, gateway.confirm(intent)).await {
        Ok(Ok(PaymentStatus::Confirmed(_))) => PowerupOutcome::Confirmed,
        Ok(Ok(PaymentStatus::Cancelled)) => PowerupOutcome::Cancelled,
        Ok(Err(e)) => PowerupOutcome::Failed(format!("{:#}", e)),
        Err(_) => PowerupOutcome::Failed(format!(
            "confirmation timed out after {}ms",
            timeout.as_millis()
        )),
    }
}

/// Display price, e.g. `$0.30`
pub fn price_label(kind: PowerupKind) -> String {
    format!("${:.2}", kind.cost_usd())
}
