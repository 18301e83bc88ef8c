// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pre-race countdown, polled from the main loop.
//!
//! The last [`ALIGN_WINDOW_MS`] of the countdown is spent aligning on the line (pre-start), after
//! which the race starts.

use crate::config::{ALIGN_WINDOW_MS, COUNTDOWN_MS};
use crate::time::elapsed;

/// What the countdown asks for at a given time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountdownStep {
    /// Keep waiting, vehicle still.
    Hold,
    /// Inside the alignment window.
    Align,
    /// Countdown over, start the race.
    Go,
}

#[derive(Copy, Clone, Debug)]
pub struct Countdown {
    started_at: u32,
    duration_ms: u32,
    align_ms: u32,
}

impl Countdown {
    /// Countdown of the standard length, starting at `now_ms`.
    pub fn new(now_ms: u32) -> Self {
        Self::with_durations(now_ms, COUNTDOWN_MS, ALIGN_WINDOW_MS)
    }

    /// Countdown of `duration_ms`, the last `align_ms` of which are the alignment window.
    pub fn with_durations(now_ms: u32, duration_ms: u32, align_ms: u32) -> Self {
        Self {
            started_at: now_ms,
            duration_ms,
            align_ms: align_ms.min(duration_ms),
        }
    }

    /// Milliseconds left before `Go`.
    pub fn remaining_ms(&self, now_ms: u32) -> u32 {
        self.duration_ms
            .saturating_sub(elapsed(now_ms, self.started_at))
    }

    pub fn poll(&self, now_ms: u32) -> CountdownStep {
        let remaining = self.remaining_ms(now_ms);
        if remaining == 0 {
            CountdownStep::Go
        } else if remaining <= self.align_ms {
            CountdownStep::Align
        } else {
            CountdownStep::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        let cd = Countdown::new(1_000);
        assert_eq!(cd.poll(1_000), CountdownStep::Hold);
        assert_eq!(cd.poll(2_999), CountdownStep::Hold);
        assert_eq!(cd.poll(3_000), CountdownStep::Align);
        assert_eq!(cd.poll(3_999), CountdownStep::Align);
        assert_eq!(cd.poll(4_000), CountdownStep::Go);
        assert_eq!(cd.poll(9_000), CountdownStep::Go);
    }

    #[test]
    fn test_remaining_across_wrap() {
        let cd = Countdown::new(u32::MAX - 499);
        assert_eq!(cd.remaining_ms(500), 2_000);
    }

    #[test]
    fn test_align_window_capped() {
        let cd = Countdown::with_durations(0, 500, 2_000);
        assert_eq!(cd.poll(0), CountdownStep::Align);
        assert_eq!(cd.poll(500), CountdownStep::Go);
    }
}
