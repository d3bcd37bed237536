//! Restart-on-activity deadline tracking.
//!
//! [`Debouncer`] is the timing core of the emission timer. It never sleeps
//! or spawns anything: callers pass the current [`Instant`] and ask whether
//! the quiet period has run out.

use std::time::Duration;
use web_time::Instant;

/// Tracks a single-shot deadline that every restart pushes back.
///
/// A burst of restarts leaves one deadline, a quiet period after the last
/// one. Elapse is reported once per armed deadline.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// How long activity must stop before the deadline elapses.
    quiet_period: Duration,

    /// When the armed deadline elapses, if armed.
    deadline: Option<Instant>,

    /// Restarts since the deadline was last armed from idle.
    coalesced: u32,
}

impl Debouncer {
    /// Create an idle debouncer.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
            coalesced: 0,
        }
    }

    /// Quiet period of this debouncer.
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Stop, then start: arm the deadline a quiet period after `now`.
    pub fn restart_at(&mut self, now: Instant) {
        if self.deadline.is_some() {
            self.coalesced = self.coalesced.saturating_add(1);
        } else {
            self.coalesced = 0;
        }
        self.deadline = Some(now + self.quiet_period);
        log::trace!("Debouncer: restarted ({} coalesced)", self.coalesced);
    }

    /// Disarm without elapsing.
    pub fn stop(&mut self) {
        if self.deadline.take().is_some() {
            log::trace!("Debouncer: stopped");
        }
    }

    /// Whether a deadline is armed.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Restarts absorbed into the currently armed deadline.
    pub fn coalesced(&self) -> u32 {
        self.coalesced
    }

    /// Time left until the deadline, `None` when idle.
    ///
    /// Returns `Duration::ZERO` once the deadline has passed.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Report and disarm an elapsed deadline.
    ///
    /// Returns true exactly once per armed deadline, at or after it passes.
    pub fn take_elapsed_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
