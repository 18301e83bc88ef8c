// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Single optical sensor: latest sample plus its calibration bounds.

use crate::config::ADC_MAX;

/// One reflectance sensor of the array.
///
/// `min`/`max` start inverted (`ADC_MAX`/0) and only widen while calibrating. The on-line
/// threshold sits two thirds of the way from `min` to `max`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SensorChannel {
    raw: u16,
    min: u16,
    max: u16,
    threshold: u16,
}

impl SensorChannel {
    pub const fn new() -> Self {
        Self {
            raw: 0,
            min: ADC_MAX,
            max: 0,
            threshold: 0,
        }
    }

    /// Latest sample, in `0..=ADC_MAX`.
    #[inline]
    pub fn raw(&self) -> u16 {
        self.raw
    }

    #[inline]
    pub fn min(&self) -> u16 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> u16 {
        self.max
    }

    #[inline]
    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// True if the latest sample reads as line.
    #[inline]
    pub fn on_line(&self) -> bool {
        self.raw >= self.threshold
    }

    /// Binarized sample: `ADC_MAX` over the line, 0 otherwise.
    #[inline]
    pub fn line_value(&self) -> u16 {
        if self.on_line() {
            ADC_MAX
        } else {
            0
        }
    }

    /// Spread between the calibration bounds (0 before any calibration sample).
    #[inline]
    pub fn contrast(&self) -> u16 {
        self.max.saturating_sub(self.min)
    }

    /// Store a new sample, clamped to the ADC range.
    #[inline]
    pub(crate) fn set_raw(&mut self, raw: u16) {
        self.raw = raw.min(ADC_MAX);
    }

    /// Widen the bounds to include the latest sample and recompute the threshold.
    pub fn calibrate_sample(&mut self) {
        self.min = self.min.min(self.raw);
        self.max = self.max.max(self.raw);

        let span = (self.max - self.min) as u32;
        self.threshold = self.min + (span * 2 / 3) as u16;
    }
}

impl Default for SensorChannel {
    fn default() -> Self {
        Self::new()
    }
}
