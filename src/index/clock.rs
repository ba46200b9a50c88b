// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Wall-clock source for build timeouts.
//!
//! `std::time::Instant` panics on `wasm32-unknown-unknown`, so the browser
//! binding supplies its own clock built on `Date.now()`.

use std::time::Instant;

/// Monotonic-enough milliseconds since some fixed origin.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> f64;
}

/// Native clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Tracks one build's budget against a clock.
pub(crate) struct Deadline<'a> {
    clock: &'a dyn Clock,
    started_ms: f64,
    timeout_ms: u64,
}

impl<'a> Deadline<'a> {
    pub(crate) fn start(clock: &'a dyn Clock, timeout_ms: u64) -> Self {
        Self {
            clock,
            started_ms: clock.now_ms(),
            timeout_ms,
        }
    }

    /// `Some(elapsed)` once strictly more than the budget has passed.
    pub(crate) fn exceeded(&self) -> Option<u64> {
        let elapsed = self.clock.now_ms() - self.started_ms;
        if elapsed > self.timeout_ms as f64 {
            Some(elapsed.max(0.0) as u64)
        } else {
            None
        }
    }

    pub(crate) fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}
