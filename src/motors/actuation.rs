// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Actuation mapper: percent commands in, native actuator signals out.
//!
//! Wheel commands pass a safety gate tied to the race state; the turbine and [`stop`] do not.
//!
//! [`stop`]: Actuation::stop

use crate::config::PwmRange;
use crate::control::RaceState;
use crate::drivers::{Esc, Rz7886};
use crate::hw::io::{ActuatorOutputs, OutputChannel};

/// Both traction motors plus the turbine, bound to one output sink.
pub struct Actuation<O> {
    out: O,
    left: Rz7886,
    right: Rz7886,
    fan: Esc,
}

impl<O: ActuatorOutputs> Actuation<O> {
    /// Wire the standard channels and ranges, and park every output at idle.
    pub fn new(out: O) -> Self {
        Self::with_ranges(out, PwmRange::MOTOR, PwmRange::ESC)
    }

    /// Same as [`new`](Self::new) with explicit signal ranges.
    pub fn with_ranges(out: O, motor: PwmRange, esc: PwmRange) -> Self {
        let mut actuation = Self {
            out,
            left: Rz7886::new(OutputChannel::LeftA, OutputChannel::LeftB, motor),
            right: Rz7886::new(OutputChannel::RightA, OutputChannel::RightB, motor),
            fan: Esc::new(OutputChannel::Fan, esc),
        };
        actuation.stop();
        actuation
    }

    /// Drive both wheels, in percent (-100..=100, clamped).
    ///
    /// Outside racing, pre-start and the post-stop grace window both wheels get the stop
    /// pattern whatever was requested.
    pub fn drive(&mut self, race: &RaceState, now_ms: u32, left_pct: f32, right_pct: f32) {
        if race.actuation_enabled(now_ms) {
            self.left.set_speed(&mut self.out, left_pct);
            self.right.set_speed(&mut self.out, right_pct);
        } else {
            self.left.stop(&mut self.out);
            self.right.stop(&mut self.out);
        }
    }

    /// Set turbine thrust in percent (0..=100, clamped).
    pub fn thrust(&mut self, pct: i32) {
        self.fan.set_thrust(&mut self.out, pct);
    }

    /// Idle every output, regardless of race state.
    pub fn stop(&mut self) {
        self.left.stop(&mut self.out);
        self.right.stop(&mut self.out);
        self.fan.stop(&mut self.out);
    }

    #[inline]
    pub fn outputs(&self) -> &O {
        &self.out
    }

    #[inline]
    pub fn outputs_mut(&mut self) -> &mut O {
        &mut self.out
    }

    pub fn free(self) -> O {
        self.out
    }
}
