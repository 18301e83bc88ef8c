// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! RZ7886 dual-input H-bridge driving one traction motor.
//!
//! Input truth table:
//! - Forward: A held high, PWM on B (B duty falls as speed rises)
//! - Reverse: PWM on A, B held high
//! - Both high: brake
//! - Both low: stop (outputs off)
//!
//! Both inputs are PWM channels so either can be held high (full duty) or modulated.

use crate::config::PwmRange;
use crate::hw::io::{ActuatorOutputs, OutputChannel};

/// Logical drive direction for the motor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
    Stop,
}

/// One motor on an RZ7886, bound to its two PWM channels.
#[derive(Copy, Clone, Debug)]
pub struct Rz7886 {
    in_a: OutputChannel,
    in_b: OutputChannel,
    range: PwmRange,
}

impl Rz7886 {
    pub const fn new(in_a: OutputChannel, in_b: OutputChannel, range: PwmRange) -> Self {
        Self { in_a, in_b, range }
    }

    /// Direction a speed command resolves to.
    pub fn direction(speed_pct: f32) -> Direction {
        if speed_pct > 0.0 {
            Direction::Forward
        } else if speed_pct < 0.0 {
            Direction::Reverse
        } else {
            Direction::Stop
        }
    }

    /// Input values `(A, B)` for a speed in percent; clamped to -100..=100.
    pub fn encode(&self, speed_pct: f32) -> (u16, u16) {
        let speed = speed_pct.clamp(-100.0, 100.0);
        let max = self.range.max;

        match Self::direction(speed) {
            Direction::Forward => (max, self.modulated(speed)),
            Direction::Reverse => (self.modulated(-speed), max),
            Direction::Stop => (self.range.idle, self.range.idle),
        }
    }

    /// Duty of the modulated input for `magnitude` percent of drive.
    fn modulated(&self, magnitude: f32) -> u16 {
        let drop = self.range.span() as f32 * magnitude / 100.0;
        self.range.clamp((self.range.max as f32 - drop) as u16)
    }

    /// Drive the motor at `speed_pct` (-100 full reverse .. 100 full forward).
    pub fn set_speed<O: ActuatorOutputs>(&self, out: &mut O, speed_pct: f32) {
        let (a, b) = self.encode(speed_pct);
        out.write_channel(self.in_a, a);
        out.write_channel(self.in_b, b);
    }

    /// Put both inputs in the stop pattern.
    pub fn stop<O: ActuatorOutputs>(&self, out: &mut O) {
        out.write_channel(self.in_a, self.range.idle);
        out.write_channel(self.in_b, self.range.idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::mock::MockOutputs;

    fn left() -> Rz7886 {
        Rz7886::new(OutputChannel::LeftA, OutputChannel::LeftB, PwmRange::MOTOR)
    }

    #[test]
    fn test_forward_encoding() {
        let m = left();
        assert_eq!(m.encode(100.0), (1023, 0));
        assert_eq!(m.encode(50.0), (1023, 511));
        assert_eq!(m.encode(0.5), (1023, 1017));
    }

    #[test]
    fn test_reverse_encoding() {
        let m = left();
        assert_eq!(m.encode(-100.0), (0, 1023));
        assert_eq!(m.encode(-50.0), (511, 1023));
    }

    #[test]
    fn test_zero_is_stop_not_zero_drive() {
        let m = left();
        assert_eq!(Rz7886::direction(0.0), Direction::Stop);
        assert_eq!(m.encode(0.0), (0, 0));
        // Forward at a tiny speed keeps A high: a distinct pattern from stop.
        assert_ne!(m.encode(0.01), m.encode(0.0));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let m = left();
        assert_eq!(m.encode(150.0), m.encode(100.0));
        assert_eq!(m.encode(-150.0), m.encode(-100.0));
    }

    #[test]
    fn test_writes_both_inputs() {
        let m = left();
        let mut out = MockOutputs::new();
        m.set_speed(&mut out, -25.0);
        assert_eq!(out.get(OutputChannel::LeftA), Some(767));
        assert_eq!(out.get(OutputChannel::LeftB), Some(1023));
        assert_eq!(out.get(OutputChannel::RightA), None);

        m.stop(&mut out);
        assert_eq!(out.get(OutputChannel::LeftA), Some(0));
        assert_eq!(out.get(OutputChannel::LeftB), Some(0));
    }
}
