// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hobby ESC driving the suction turbine.
//!
//! Servo protocol at 50 Hz: a 1000 µs pulse is off, 2000 µs is full throttle. With an 11-bit
//! timer over the 20 ms period that is duty 102 (off) to 204 (full).
//!
//! Most ESCs arm only after seeing the off pulse for a couple of seconds at power-up, so the
//! channel should be parked at idle before calibration starts.

use crate::config::PwmRange;
use crate::hw::io::{ActuatorOutputs, OutputChannel};

#[derive(Copy, Clone, Debug)]
pub struct Esc {
    channel: OutputChannel,
    range: PwmRange,
}

impl Esc {
    pub const fn new(channel: OutputChannel, range: PwmRange) -> Self {
        Self { channel, range }
    }

    /// Pulse value for `thrust_pct`, clamped to 0..=100. 0 is the idle pulse.
    pub fn encode(&self, thrust_pct: i32) -> u16 {
        let pct = thrust_pct.clamp(0, 100) as u32;
        if pct == 0 {
            return self.range.idle;
        }
        let value = self.range.min as u32 + pct * self.range.span() as u32 / 100;
        self.range.clamp(value as u16)
    }

    pub fn set_thrust<O: ActuatorOutputs>(&self, out: &mut O, thrust_pct: i32) {
        out.write_channel(self.channel, self.encode(thrust_pct));
    }

    pub fn stop<O: ActuatorOutputs>(&self, out: &mut O) {
        out.write_channel(self.channel, self.range.idle);
    }
}
