//! Debounced render synchronization
//!
//! Trailing-edge debounce with cancel-and-reschedule semantics. The clock is
//! passed in by the caller (GUI frame loop or the script runtime), so there is
//! never more than one pending deadline and no background thread.

use std::time::{Duration, Instant};
use tracing::{debug, error};

use crate::config::model::Configuration;
use crate::render::engine::RenderEngine;
use crate::render::snapshot::normalize;

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, deadline: None }
    }

    /// Replace any pending deadline with `now + quiet`
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// True exactly once per schedule, after the quiet interval has elapsed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the pending push, `None` when idle
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Pushes normalized snapshots to an engine after bursts of edits settle
pub struct RenderSynchronizer<E> {
    engine: E,
    debouncer: Debouncer,
    pushes: u64,
}

impl<E: RenderEngine> RenderSynchronizer<E> {
    pub fn new(engine: E, quiet: Duration) -> Self {
        Self {
            engine,
            debouncer: Debouncer::new(quiet),
            pushes: 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn pushes(&self) -> u64 {
        self.pushes
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// A mutation happened: drop the pending push and start a new quiet interval
    pub fn notify(&mut self, now: Instant) {
        self.debouncer.schedule(now);
    }

    /// Push if the quiet interval elapsed. Returns whether a push happened.
    pub fn tick(&mut self, now: Instant, config: &Configuration) -> bool {
        if self.debouncer.poll(now) {
            self.push(config);
            true
        } else {
            false
        }
    }

    /// Push a pending snapshot immediately, skipping the rest of the interval
    pub fn flush(&mut self, config: &Configuration) -> bool {
        if self.debouncer.is_pending() {
            self.debouncer.cancel();
            self.push(config);
            true
        } else {
            false
        }
    }

    /// Unconditional push, used for the initial render
    pub fn push(&mut self, config: &Configuration) {
        let snapshot = normalize(config);
        self.pushes += 1;
        debug!(push = self.pushes, "Pushing snapshot to render engine");
        if let Err(err) = self.engine.update(&snapshot) {
            error!(error = ?err, "Render engine rejected snapshot");
        }
    }
}
