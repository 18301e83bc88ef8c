// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Board and Race Configuration
//!
//! Compile-time constants for the sensor array, the control loop timing and the actuator signal
//! ranges, plus the small amount of race tuning that can change at runtime ([`RaceConfig`]).

use log::info;

/// Number of optical line sensors in the array (left to right).
pub const SENSOR_COUNT: usize = 16;

/// Resolution of the sensor ADC in bits.
pub const ADC_BITS: u32 = 12;

/// Largest raw sample the ADC can report.
pub const ADC_MAX: u16 = ((1u32 << ADC_BITS) - 1) as u16;

/// Line position range is `-POSITION_MAX..=POSITION_MAX`, 0 being centered.
pub const POSITION_MAX: i32 = 255;

/// Length of the sensor calibration window (ms).
pub const CALIBRATION_MS: u32 = 3000;

/// Minimum time between two sensor array refreshes (µs).
pub const SENSOR_REFRESH_US: u32 = 1000;

/// Target period of the control loop (µs).
pub const CONTROL_PERIOD_US: u32 = 1000;

/// Time without seeing the line before the race is aborted (ms).
pub const LINE_LOST_TIMEOUT_MS: u32 = 250;

/// Wheels may still be driven this long after a stop, so braking is not cut short (ms).
pub const ACTUATION_GRACE_MS: u32 = 1000;

/// Forward speed the acceleration ramp starts from (%).
pub const RAMP_FLOOR_PCT: i32 = 20;

/// Total length of the pre-race countdown (ms).
pub const COUNTDOWN_MS: u32 = 3000;

/// Final part of the countdown spent aligning on the line (ms).
pub const ALIGN_WINDOW_MS: u32 = 1000;

/// Minimum `max - min` spread a calibrated sensor needs for a usable threshold.
///
/// The reference figure is 1000 counts on a 12-bit converter; other resolutions scale it.
pub const fn contrast_floor(adc_bits: u32) -> u16 {
    let adc_max = (1u32 << adc_bits) - 1;
    (adc_max * 1000 / 4095) as u16
}

/// Native signal range of one actuator output channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PwmRange {
    /// Lowest value the channel accepts.
    pub min: u16,
    /// Highest value the channel accepts.
    pub max: u16,
    /// Value that leaves the actuator stopped.
    pub idle: u16,
}

impl PwmRange {
    /// Traction motor channels: 10-bit duty at 5 kHz.
    pub const MOTOR: Self = Self {
        min: 0,
        max: 1023,
        idle: 0,
    };

    /// Turbine ESC channel: 11-bit duty at 50 Hz, 102 = 1000 µs (off), 204 = 2000 µs (full).
    pub const ESC: Self = Self {
        min: 102,
        max: 204,
        idle: 102,
    };

    /// Width of the usable range.
    #[inline]
    pub fn span(&self) -> u16 {
        self.max - self.min
    }

    /// Clamp a raw value into the channel range.
    #[inline]
    pub fn clamp(&self, value: u16) -> u16 {
        value.clamp(self.min, self.max)
    }
}

/// Steering controller gains.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PidGains {
    pub kp: f32,
    pub kd: f32,
}

impl PidGains {
    /// Gains tuned for the current chassis.
    pub const DEFAULT: Self = Self { kp: 0.2, kd: 0.80 };
}

impl Default for PidGains {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Race tuning that can be adjusted between races. All values are percentages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RaceConfig {
    base_speed: i32,
    base_accel_speed: i32,
    fan_speed: i32,
}

impl RaceConfig {
    pub const fn new() -> Self {
        Self {
            base_speed: 30,
            base_accel_speed: 60,
            fan_speed: 80,
        }
    }

    /// Cruise speed the ramp converges to.
    #[inline]
    pub fn base_speed(&self) -> i32 {
        self.base_speed
    }

    /// Ramp slope in percent per second.
    #[inline]
    pub fn base_accel_speed(&self) -> i32 {
        self.base_accel_speed
    }

    /// Turbine thrust while racing; 0 leaves the turbine off.
    #[inline]
    pub fn fan_speed(&self) -> i32 {
        self.fan_speed
    }

    pub fn set_base_speed(&mut self, speed: i32) {
        self.base_speed = speed.clamp(0, 100);
        info!("base speed: {}", self.base_speed);
    }

    pub fn set_base_accel_speed(&mut self, accel_speed: i32) {
        self.base_accel_speed = accel_speed.clamp(0, 100);
        info!("base accel speed: {}", self.base_accel_speed);
    }

    pub fn set_fan_speed(&mut self, speed: i32) {
        self.fan_speed = speed.clamp(0, 100);
        info!("fan speed: {}", self.fan_speed);
    }
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self::new()
    }
}
