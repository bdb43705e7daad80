//! Debouncing for search input.
//!
//! Typing fires one event per keystroke, but only the value the user settles on
//! should trigger a recompute. [`Debouncer`] holds at most one pending value.
//! Scheduling a new one replaces it and restarts the wait, so only the last
//! event of a burst survives, and it fires once the input has been quiet for
//! the whole delay.
//!
//! Time is passed in rather than read from a clock. Callers use
//! `Instant::now()`; tests use fixed instants.

use std::time::{Duration, Instant};

/// Quiet period before pending search input is applied.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any pending value with `value`, due `delay` after `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// The pending value, if its deadline has passed. Fires at most once.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((due, _)) if now >= *due => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Take the pending value regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
