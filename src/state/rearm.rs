//! Cancelable, self-rearming deadline slot
//!
//! A `RearmTimer` holds at most one pending deadline. The owner arms it,
//! polls `fire` from its event loop, and disarms it synchronously the moment
//! the state it gates changes, so a stale deadline can never fire afterwards.
//! Deadlines are anchored to the previous deadline rather than to the time a
//! firing was handled, which keeps handler latency from accumulating.

use std::time::Duration;
use tokio::time::Instant;

/// What to do with firings the event loop woke up too late for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missed {
    /// Deliver every overdue firing, one per `fire` call
    Burst,
    /// Deliver one firing and move the deadline past `now`
    Skip,
}

#[derive(Debug, Clone)]
pub struct RearmTimer {
    period: Duration,
    missed: Missed,
    deadline: Option<Instant>,
    /// Unelapsed part of the period at the last suspend
    banked: Option<Duration>,
}

impl RearmTimer {
    pub fn new(period: Duration, missed: Missed) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            missed,
            deadline: None,
            banked: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Arm the slot. A suspended period resumes with whatever was left of it.
    /// Arming an armed slot does nothing.
    pub fn arm(&mut self, now: Instant) {
        if self.deadline.is_some() {
            return;
        }
        let wait = self.banked.take().unwrap_or(self.period);
        self.deadline = Some(now + wait);
    }

    /// Disarm but remember how much of the current period was left
    pub fn suspend(&mut self, now: Instant) {
        if let Some(deadline) = self.deadline.take() {
            self.banked = Some(deadline.saturating_duration_since(now));
        }
    }

    /// Disarm and forget any suspended period. Idempotent.
    pub fn disarm(&mut self) {
        self.deadline = None;
        self.banked = None;
    }

    /// Consume one due firing and re-arm for the next period
    pub fn fire(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if deadline > now {
            return false;
        }

        let mut next = deadline + self.period;
        if self.missed == Missed::Skip {
            while next <= now {
                next += self.period;
            }
        }
        self.deadline = Some(next);
        true
    }
}
