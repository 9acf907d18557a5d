//! Payment confirmation boundary.
//!
//! The loop submits a [`PowerupRequest`] and polls for its outcome once per
//! frame. Implementations may resolve immediately or from another thread.

use std::collections::VecDeque;

use crate::core::{PowerupOutcome, PowerupRequest};

pub trait PowerupConfirmer {
    fn submit(&mut self, request: PowerupRequest);

    /// Next settled request, if any. Must not block.
    fn poll(&mut self) -> Option<(PowerupRequest, PowerupOutcome)>;
}

/// Settles requests on the next poll with scripted outcomes.
///
/// Once the script runs out every request gets the fallback outcome.
#[derive(Debug, Clone)]
pub struct ScriptedConfirmer {
    script: VecDeque<PowerupOutcome>,
    fallback: PowerupOutcome,
    settled: VecDeque<(PowerupRequest, PowerupOutcome)>,
    submitted: Vec<PowerupRequest>,
}

impl ScriptedConfirmer {
    pub fn new(fallback: PowerupOutcome) -> Self {
        Self {
            script: VecDeque::new(),
            fallback,
            settled: VecDeque::new(),
            submitted: Vec::new(),
        }
    }

    /// Approve everything
    pub fn approving() -> Self {
        Self::new(PowerupOutcome::Confirmed)
    }

    pub fn with_script(mut self, outcomes: impl IntoIterator<Item = PowerupOutcome>) -> Self {
        self.script.extend(outcomes);
        self
    }

    /// Every request submitted so far
    pub fn submitted(&self) -> &[PowerupRequest] {
        &self.submitted
    }
}

impl PowerupConfirmer for ScriptedConfirmer {
    fn submit(&mut self, request: PowerupRequest) {
        let outcome = self
            .script
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        self.submitted.push(request);
        self.settled.push_back((request, outcome));
    }

    fn poll(&mut self) -> Option<(PowerupRequest, PowerupOutcome)> {
        self.settled.pop_front()
    }
}

/// Holds requests until the test settles them by hand
#[derive(Debug, Clone, Default)]
pub struct ManualConfirmer {
    pending: VecDeque<PowerupRequest>,
    settled: VecDeque<(PowerupRequest, PowerupOutcome)>,
}

impl ManualConfirmer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Settle the oldest pending request. Returns false if none is pending.
    pub fn settle(&mut self, outcome: PowerupOutcome) -> bool {
        match self.pending.pop_front() {
            Some(request) => {
                self.settled.push_back((request, outcome));
                true
            }
            None => false,
        }
    }
}

impl PowerupConfirmer for ManualConfirmer {
    fn submit(&mut self, request: PowerupRequest) {
        self.pending.push_back(request);
    }

    fn poll(&mut self) -> Option<(PowerupRequest, PowerupOutcome)> {
        self.settled.pop_front()
    }
}

impl<T: PowerupConfirmer + ?Sized> PowerupConfirmer for Box<T> {
    fn submit(&mut self, request: PowerupRequest) {
        (**self).submit(request)
    }

    fn poll(&mut self) -> Option<(PowerupRequest, PowerupOutcome)> {
        (**self).poll()
    }
}
