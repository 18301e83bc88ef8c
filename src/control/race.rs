// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Race state machine.
//!
//! ```text
//!   Idle ──begin_pre_start──▶ PreStart ──start──▶ Racing ──stop──▶ Stopped ──(grace)──▶ Idle
//!     └───────────────────────start──────────────────▲
//! ```
//!
//! The state decides which control loop variant runs and whether the wheels may be driven. It
//! only changes through explicit calls; the control loop reads it, and the line-lost path goes
//! through [`LineFollower::stop`](crate::control::LineFollower::stop) like any other stop.

use crate::config::ACTUATION_GRACE_MS;
use crate::time::elapsed;

/// Vehicle mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RacePhase {
    /// Waiting; wheels disabled.
    Idle,
    /// Aligning on the line before the start; steering only.
    PreStart,
    /// Full control loop running.
    Racing,
    /// Just stopped; wheels may still brake until the grace window expires.
    Stopped,
}

/// Current race mode plus transition timestamps (ms counter).
#[derive(Copy, Clone, Debug)]
pub struct RaceState {
    phase: RacePhase,
    started_at: Option<u32>,
    stopped_at: Option<u32>,
}

impl RaceState {
    pub const fn new() -> Self {
        Self {
            phase: RacePhase::Idle,
            started_at: None,
            stopped_at: None,
        }
    }

    #[inline]
    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    #[inline]
    pub fn is_racing(&self) -> bool {
        self.phase == RacePhase::Racing
    }

    #[inline]
    pub fn is_pre_start(&self) -> bool {
        self.phase == RacePhase::PreStart
    }

    /// Time the last race started.
    #[inline]
    pub fn started_at(&self) -> Option<u32> {
        self.started_at
    }

    /// Time the last race (or alignment) was stopped.
    #[inline]
    pub fn stopped_at(&self) -> Option<u32> {
        self.stopped_at
    }

    /// Enter the alignment window. Only valid while not racing.
    ///
    /// Returns false if the transition was rejected.
    pub fn begin_pre_start(&mut self) -> bool {
        match self.phase {
            RacePhase::Idle | RacePhase::Stopped => {
                self.phase = RacePhase::PreStart;
                true
            }
            RacePhase::PreStart => true,
            RacePhase::Racing => false,
        }
    }

    /// Leave the alignment window without starting.
    pub fn cancel_pre_start(&mut self) {
        if self.phase == RacePhase::PreStart {
            self.phase = RacePhase::Idle;
        }
    }

    /// Start racing at `now_ms`. Returns false if a race is already running.
    pub fn start(&mut self, now_ms: u32) -> bool {
        if self.phase == RacePhase::Racing {
            return false;
        }
        self.phase = RacePhase::Racing;
        self.started_at = Some(now_ms);
        true
    }

    /// Stop at `now_ms`. Returns true if this call ended a race or an alignment window.
    ///
    /// Stopping while idle or already stopped changes nothing.
    pub fn stop(&mut self, now_ms: u32) -> bool {
        match self.phase {
            RacePhase::Racing | RacePhase::PreStart => {
                self.phase = RacePhase::Stopped;
                self.stopped_at = Some(now_ms);
                true
            }
            RacePhase::Idle | RacePhase::Stopped => false,
        }
    }

    /// Whether the wheels may be driven at `now_ms`.
    pub fn actuation_enabled(&self, now_ms: u32) -> bool {
        match self.phase {
            RacePhase::Racing | RacePhase::PreStart => true,
            RacePhase::Stopped => self
                .stopped_at
                .map_or(false, |t| elapsed(now_ms, t) < ACTUATION_GRACE_MS),
            RacePhase::Idle => false,
        }
    }

    /// Settle `Stopped` into `Idle` once the grace window has passed.
    pub fn poll(&mut self, now_ms: u32) {
        if self.phase == RacePhase::Stopped && !self.actuation_enabled(now_ms) {
            self.phase = RacePhase::Idle;
        }
    }
}

impl Default for RaceState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boots_idle_and_disabled() {
        let race = RaceState::new();
        assert_eq!(race.phase(), RacePhase::Idle);
        assert!(!race.actuation_enabled(0));
        assert!(!race.actuation_enabled(500));
    }

    #[test]
    fn test_start_from_idle() {
        let mut race = RaceState::new();
        assert!(race.start(1200));
        assert!(race.is_racing());
        assert_eq!(race.started_at(), Some(1200));
        assert!(!race.start(1300));
        assert_eq!(race.started_at(), Some(1200));
    }

    #[test]
    fn test_pre_start_then_start_clears_pre_start() {
        let mut race = RaceState::new();
        assert!(race.begin_pre_start());
        assert!(race.is_pre_start());
        assert!(race.actuation_enabled(0));

        race.start(10);
        assert!(race.is_racing());
        assert!(!race.is_pre_start());
        assert!(!race.begin_pre_start());
    }

    #[test]
    fn test_cancel_pre_start() {
        let mut race = RaceState::new();
        race.begin_pre_start();
        race.cancel_pre_start();
        assert_eq!(race.phase(), RacePhase::Idle);
    }

    #[test]
    fn test_grace_window_after_stop() {
        let mut race = RaceState::new();
        race.start(0);
        assert!(race.stop(5_000));
        assert_eq!(race.phase(), RacePhase::Stopped);
        assert_eq!(race.stopped_at(), Some(5_000));

        assert!(race.actuation_enabled(5_000));
        assert!(race.actuation_enabled(5_999));
        assert!(!race.actuation_enabled(6_000));
        assert!(!race.actuation_enabled(7_000));
    }

    #[test]
    fn test_grace_window_across_counter_wrap() {
        let mut race = RaceState::new();
        race.start(u32::MAX - 2_000);
        race.stop(u32::MAX - 200);
        assert!(race.actuation_enabled(300));
        assert!(!race.actuation_enabled(900));
    }

    #[test]
    fn test_stopped_settles_to_idle() {
        let mut race = RaceState::new();
        race.start(0);
        race.stop(100);
        race.poll(600);
        assert_eq!(race.phase(), RacePhase::Stopped);
        race.poll(1_100);
        assert_eq!(race.phase(), RacePhase::Idle);
        assert!(race.start(2_000));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut race = RaceState::new();
        race.start(0);
        assert!(race.stop(100));
        assert!(!race.stop(400));
        assert_eq!(race.stopped_at(), Some(100));
        assert!(!RaceState::new().stop(5));
    }
}
