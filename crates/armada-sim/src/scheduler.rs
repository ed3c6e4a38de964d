//! Fixed-interval scheduler for the faction AI decision pass.
//!
//! Time-driven rather than timer-driven: the owner polls it with the
//! current simulation time, so it is deterministic under test.

use armada_core::constants::TIME_EPSILON;

/// Decides when the next AI pass is due.
#[derive(Debug, Clone)]
pub struct AiScheduler {
    interval_secs: f64,
    next_due_secs: f64,
    passes: u64,
    stopped: bool,
}

impl AiScheduler {
    /// The first poll fires immediately.
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval_secs,
            next_due_secs: 0.0,
            passes: 0,
            stopped: false,
        }
    }

    /// True when a pass is due at `now`. Fires at most once per call; if
    /// the caller fell a whole interval behind, the schedule restarts from
    /// `now` instead of replaying missed passes.
    pub fn poll(&mut self, now: f64) -> bool {
        if self.stopped || now + TIME_EPSILON < self.next_due_secs {
            return false;
        }
        self.next_due_secs += self.interval_secs;
        if self.next_due_secs <= now {
            self.next_due_secs = now + self.interval_secs;
        }
        self.passes += 1;
        true
    }

    /// Teardown hook. A stopped scheduler never fires again.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    pub fn next_due_secs(&self) -> f64 {
        self.next_due_secs
    }

    /// Passes fired so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }
}
