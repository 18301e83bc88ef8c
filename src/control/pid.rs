// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Steering controller for line following.
//!
//! Proportional-derivative only: the line position is already an error signal centered on 0,
//! and the loop runs at a fixed period, so the derivative is taken per tick rather than per
//! second. Works in `no_std` and does not allocate memory.

use crate::config::PidGains;

/// PD controller turning a line position error into a steering correction.
#[derive(Clone, Debug)]
pub struct Pid {
    /// Proportional gain
    kp: f32,
    /// Derivative gain
    kd: f32,

    /// Error seen on the previous call
    last_error: i32,
}

impl Pid {
    /// Create a new controller with zeroed history.
    pub fn new(gains: PidGains) -> Self {
        Self {
            kp: gains.kp,
            kd: gains.kd,
            last_error: 0,
        }
    }

    /// Clear the derivative history.
    #[inline]
    pub fn reset(&mut self) {
        self.last_error = 0;
    }

    #[inline]
    pub fn gains(&self) -> PidGains {
        PidGains {
            kp: self.kp,
            kd: self.kd,
        }
    }

    /// Compute the correction for `error` and remember it for the next derivative term.
    pub fn correction(&mut self, error: i32) -> f32 {
        let p = self.kp * error as f32;
        let d = self.kd * (error - self.last_error) as f32;
        self.last_error = error;
        p + d
    }
}

impl Default for Pid {
    fn default() -> Self {
        Self::new(PidGains::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KP: f32 = PidGains::DEFAULT.kp;
    const KD: f32 = PidGains::DEFAULT.kd;

    #[test]
    fn test_first_step_from_rest() {
        let mut pid = Pid::default();
        assert_eq!(pid.correction(10), KP * 10.0 + KD * 10.0);
    }

    #[test]
    fn test_derivative_uses_previous_error() {
        let mut pid = Pid::default();
        pid.correction(10);
        assert_eq!(pid.correction(5), KP * 5.0 + KD * (5 - 10) as f32);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut pid = Pid::default();
        pid.correction(200);
        pid.reset();
        assert_eq!(pid.correction(10), KP * 10.0 + KD * 10.0);
    }

    #[test]
    fn test_reproducible_sequence() {
        let errors = [0, 40, 120, 255, -30, -255, 7];
        let mut a = Pid::default();
        let mut b = Pid::default();
        for &e in errors.iter() {
            assert_eq!(a.correction(e).to_bits(), b.correction(e).to_bits());
        }
    }

    #[test]
    fn test_steady_error_is_proportional_only() {
        let mut pid = Pid::new(PidGains { kp: 0.5, kd: 2.0 });
        pid.correction(-40);
        assert_eq!(pid.correction(-40), -20.0);
    }
}
