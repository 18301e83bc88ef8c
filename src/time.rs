// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wraparound-safe timing on free-running 32-bit counters.
//!
//! Both the µs and the ms counter roll over (after ~71 min and ~49 days respectively), so every
//! elapsed-time computation goes through [`elapsed`] instead of a plain subtraction.

/// Ticks elapsed from `since` to `now` on a wrapping 32-bit counter.
#[inline]
pub fn elapsed(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Fixed-minimum-period gate for a polled loop.
///
/// The gate opens once `period` ticks have passed since the last recorded run, or as soon as the
/// counter is seen below the last run (the counter wrapped, so at least one period has passed).
#[derive(Copy, Clone, Debug)]
pub struct TickGate {
    period: u32,
    last_run: Option<u32>,
}

impl TickGate {
    pub const fn new(period: u32) -> Self {
        Self {
            period,
            last_run: None,
        }
    }

    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Returns true if a new run is due at `now`. Never due twice without [`mark`](Self::mark).
    pub fn is_due(&self, now: u32) -> bool {
        match self.last_run {
            None => true,
            Some(last) => elapsed(now, last) >= self.period || now < last,
        }
    }

    /// Record that a run finished at `now`.
    #[inline]
    pub fn mark(&mut self, now: u32) {
        self.last_run = Some(now);
    }

    /// Forget the last run so the next poll fires immediately.
    #[inline]
    pub fn reset(&mut self) {
        self.last_run = None;
    }
}
