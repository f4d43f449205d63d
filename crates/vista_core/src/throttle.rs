//! Call coalescing
//!
//! A [`Throttle`] limits deliveries to at most one per interval. The first
//! call after a quiet period goes through immediately (leading edge); calls
//! arriving inside the interval collapse into a single trailing delivery
//! that carries the most recent payload and becomes due once the interval
//! since the last delivery has elapsed.
//!
//! The throttle never reads the clock itself. Callers pass `now`, which
//! keeps hosts in charge of timing and makes tests deterministic.

use std::time::{Duration, Instant};

/// Leading + trailing edge throttle over payloads of type `T`
#[derive(Clone, Debug)]
pub struct Throttle<T> {
    interval: Duration,
    last_fire: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Offer a call made at `now`.
    ///
    /// Returns the payload if it should be delivered right away. Otherwise
    /// the payload replaces any queued trailing call and `None` is returned.
    pub fn offer(&mut self, payload: T, now: Instant) -> Option<T> {
        match self.last_fire {
            Some(last) if now.saturating_duration_since(last) < self.interval => {
                tracing::trace!(interval = ?self.interval, "throttle: deferring call");
                self.pending = Some(payload);
                None
            }
            _ => {
                self.last_fire = Some(now);
                self.pending = None;
                Some(payload)
            }
        }
    }

    /// When the queued trailing call becomes due, if there is one
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref()?;
        self.last_fire.map(|last| last + self.interval)
    }

    /// Take the trailing call if it is due at `now`
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.last_fire = Some(now);
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Queue a payload whose delivery could not happen, unless a newer call
    /// is already queued. It becomes due one interval after the last fire.
    pub fn requeue(&mut self, payload: T) {
        if self.pending.is_none() {
            self.pending = Some(payload);
        }
    }

    /// Drop any queued trailing call
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
