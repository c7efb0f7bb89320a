// SPDX-License-Identifier: MPL-2.0
//! Trailing-edge rate limiter for high-frequency callbacks.
//!
//! A [`Throttle`] never runs anything itself. Callers record calls with
//! [`Throttle::call`] and collect deliveries with [`Throttle::poll`], passing
//! the current instant explicitly so the behavior is deterministic under test.
//!
//! Guarantees, for an interval `I`:
//! - the first call after an idle period is delivered `I` later,
//! - calls landing before that delivery coalesce, and only the latest
//!   arguments are delivered, exactly once,
//! - no call waits longer than `I` to be represented by a delivery.

use crate::domain::player::UpdateInterval;
use tokio::time::{Duration, Instant};

#[derive(Debug)]
struct Pending<T> {
    args: T,
    due: Instant,
}

/// Coalesces calls so at most one delivery happens per interval.
#[derive(Debug)]
pub struct Throttle<T> {
    interval: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Throttle<T> {
    #[must_use]
    pub fn new(interval: UpdateInterval) -> Self {
        Self {
            interval: interval.as_duration(),
            pending: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records a call. The delivery time is fixed by the first undelivered
    /// call; later calls only replace the arguments.
    pub fn call(&mut self, now: Instant, args: T) {
        match &mut self.pending {
            Some(pending) => pending.args = args,
            None => {
                self.pending = Some(Pending {
                    args,
                    due: now + self.interval,
                });
            }
        }
    }

    /// Returns the latest arguments if their delivery time has come.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.args),
            _ => None,
        }
    }

    /// Instant of the next delivery, if a call is waiting.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Discards the waiting call, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
