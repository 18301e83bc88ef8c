// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Sensor array acquisition and line position estimate.
//!
//! The 16 sensors sit behind two 8:1 analog multiplexers sharing their select lines. Each
//! multiplexer state yields one sample per group, so a sweep is 8 selections × 2 reads, scanned
//! from the center outward (sensors 8/9 first, 1/16 last).
//!
//! The position is a weighted centroid of the binarized sensors, rescaled to
//! `-POSITION_MAX..=POSITION_MAX`. When no sensor (line lost) or every sensor (crossing,
//! saturation) reads line, the estimate sticks to the side the vehicle was last on.

use core::fmt;

use log::{debug, info, warn};

use crate::config::{contrast_floor, ADC_BITS, ADC_MAX, POSITION_MAX, SENSOR_COUNT, SENSOR_REFRESH_US};
use crate::hw::io::{Clock, SensorBus, SensorGroup};
use crate::sensors::SensorChannel;
use crate::time::{elapsed, TickGate};

/// Multiplexer state and the sensor indices it exposes on the left and right groups.
const SCAN_ORDER: [(u8, usize, usize); 8] = [
    (0, 7, 8),
    (1, 6, 9),
    (2, 5, 10),
    (3, 4, 11),
    (4, 3, 12),
    (5, 2, 13),
    (6, 1, 14),
    (7, 0, 15),
];

/// Centroid value of the middle of the array, in sensor-pitch × 1000 units.
const CENTER_OFFSET: i32 = (1000 * (SENSOR_COUNT as i32 + 1)) / 2;

/// Result of reducing one frame to a line position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PositionEstimate {
    /// Position in `-POSITION_MAX..=POSITION_MAX`, 0 = centered.
    pub position: i32,
    /// Whether this frame actually saw the line (as opposed to the last-side fallback).
    pub line_seen: bool,
}

/// Reduce a frame to a line position.
///
/// `last_position` only matters when the frame carries no usable line (no sensor or all sensors
/// over the line): the result is then pinned to the edge on the side of `last_position`.
pub fn line_position(channels: &[SensorChannel; SENSOR_COUNT], last_position: i32) -> PositionEstimate {
    let mut weight_sum: i64 = 0;
    let mut mass: i64 = 0;
    let mut count = 0;

    for (i, ch) in channels.iter().enumerate() {
        if ch.on_line() {
            count += 1;
        }
        let value = ch.line_value() as i64;
        weight_sum += (i as i64 + 1) * value * 1000;
        mass += value;
    }

    let line_seen = count > 0 && count < SENSOR_COUNT;
    let raw_position = if line_seen {
        (weight_sum / mass) as i32 - CENTER_OFFSET
    } else if last_position >= 0 {
        CENTER_OFFSET
    } else {
        -CENTER_OFFSET
    };

    PositionEstimate {
        position: rescale(raw_position, -CENTER_OFFSET, CENTER_OFFSET, -POSITION_MAX, POSITION_MAX),
        line_seen,
    }
}

/// Integer linear map of `x` from `[in_min, in_max]` to `[out_min, out_max]`.
fn rescale(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    let x = x as i64;
    let scaled = (x - in_min as i64) * (out_max - out_min) as i64 / (in_max - in_min) as i64;
    (scaled + out_min as i64) as i32
}

/// Outcome of a calibration window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CalibrationReport {
    /// Per sensor: did it see enough contrast for a reliable threshold?
    pub contrast_ok: [bool; SENSOR_COUNT],
    /// Number of sensors with enough contrast.
    pub count_ok: usize,
}

impl CalibrationReport {
    #[inline]
    pub fn all_ok(&self) -> bool {
        self.count_ok == SENSOR_COUNT
    }
}

/// The 16-sensor reflectance array.
pub struct SensorArray<B> {
    bus: B,
    channels: [SensorChannel; SENSOR_COUNT],
    refresh: TickGate,
    last_line_seen_ms: Option<u32>,
}

impl<B: SensorBus> SensorArray<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            channels: [SensorChannel::new(); SENSOR_COUNT],
            refresh: TickGate::new(SENSOR_REFRESH_US),
            last_line_seen_ms: None,
        }
    }

    /// Release the sensor bus.
    pub fn free(self) -> B {
        self.bus
    }

    /// Expose the underlying sensor bus.
    #[inline]
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    #[inline]
    pub fn channels(&self) -> &[SensorChannel; SENSOR_COUNT] {
        &self.channels
    }

    /// Sweep all sensors, unless the previous sweep is less than 1 ms old.
    pub fn sample_all<C: Clock>(&mut self, clock: &C) -> &[SensorChannel; SENSOR_COUNT] {
        if self.refresh.is_due(clock.now_us()) {
            self.sweep();
            self.refresh.mark(clock.now_us());
        }
        &self.channels
    }

    fn sweep(&mut self) {
        for &(state, left, right) in SCAN_ORDER.iter() {
            self.bus.select_channel(state);
            let l = self.bus.read_raw(SensorGroup::Left);
            let r = self.bus.read_raw(SensorGroup::Right);
            self.channels[left].set_raw(l);
            self.channels[right].set_raw(r);
        }
        self.bus.select_channel(0);
    }

    /// Latest raw sample of one sensor.
    pub fn raw<C: Clock>(&mut self, clock: &C, sensor: usize) -> Option<u16> {
        if sensor >= SENSOR_COUNT {
            return None;
        }
        Some(self.sample_all(clock)[sensor].raw())
    }

    /// Latest binarized sample of one sensor (`ADC_MAX` over the line, 0 otherwise).
    pub fn calibrated<C: Clock>(&mut self, clock: &C, sensor: usize) -> Option<u16> {
        if sensor >= SENSOR_COUNT {
            return None;
        }
        Some(self.sample_all(clock)[sensor].line_value())
    }

    /// Refresh the sensors and estimate the line position.
    ///
    /// Frames that actually see the line update [`last_line_seen_ms`](Self::last_line_seen_ms).
    pub fn position<C: Clock>(&mut self, clock: &C, last_position: i32) -> i32 {
        self.sample_all(clock);
        let estimate = line_position(&self.channels, last_position);
        if estimate.line_seen {
            self.last_line_seen_ms = Some(clock.now_ms());
        }
        estimate.position
    }

    /// Time (ms counter) of the last frame that saw the line.
    #[inline]
    pub fn last_line_seen_ms(&self) -> Option<u32> {
        self.last_line_seen_ms
    }

    /// Collect calibration bounds for `duration_ms` while the vehicle is swept over the line.
    ///
    /// Blocks for the whole window. Sensors that never see enough contrast are reported, not
    /// rejected: their threshold is kept as computed.
    pub fn calibrate<C: Clock>(&mut self, clock: &C, duration_ms: u32) -> CalibrationReport {
        info!("calibrating sensors for {} ms", duration_ms);

        let start = clock.now_ms();
        loop {
            self.sample_all(clock);
            for ch in self.channels.iter_mut() {
                ch.calibrate_sample();
            }
            if elapsed(clock.now_ms(), start) >= duration_ms {
                break;
            }
        }

        let floor = contrast_floor(ADC_BITS);
        let mut report = CalibrationReport {
            contrast_ok: [false; SENSOR_COUNT],
            count_ok: 0,
        };
        for (i, ch) in self.channels.iter().enumerate() {
            report.contrast_ok[i] = ch.contrast() >= floor;
            if report.contrast_ok[i] {
                report.count_ok += 1;
            }
        }

        info!("sensors with good contrast: {}/{}", report.count_ok, SENSOR_COUNT);
        info!("S# | Min  | Max  | Thr");
        for (i, ch) in self.channels.iter().enumerate() {
            info!("{:>2} | {:>4} | {:>4} | {:>4}", i + 1, ch.min(), ch.max(), ch.threshold());
        }
        if !report.all_ok() {
            warn!("some sensors lack contrast ({} below {})", SENSOR_COUNT - report.count_ok, floor);
        }

        report
    }

    /// Refresh the sensors and dump the raw samples at debug level.
    pub fn log_raw<C: Clock>(&mut self, clock: &C) {
        self.sample_all(clock);
        debug!("RAW: {}", RawDump(&self.channels));
    }

    /// Refresh the sensors and dump the binarized samples at debug level.
    pub fn log_calibrated<C: Clock>(&mut self, clock: &C) {
        self.sample_all(clock);
        debug!("CAL: {}", LineDump(&self.channels));
    }
}

struct RawDump<'a>(&'a [SensorChannel; SENSOR_COUNT]);

impl fmt::Display for RawDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ch) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\t")?;
            }
            write!(f, "{}", ch.raw())?;
        }
        Ok(())
    }
}

struct LineDump<'a>(&'a [SensorChannel; SENSOR_COUNT]);

impl fmt::Display for LineDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ch) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(if ch.line_value() == ADC_MAX { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::mock::{MockClock, MockSensorBus};

    const LOW: u16 = 200;
    const HIGH: u16 = 3800;

    /// Array calibrated so that every sensor thresholds at 2600.
    fn calibrated_array(values: [u16; SENSOR_COUNT]) -> (SensorArray<MockSensorBus>, MockClock) {
        let bus = MockSensorBus::with_frames(vec![[LOW; SENSOR_COUNT], [HIGH; SENSOR_COUNT]]);
        let mut array = SensorArray::new(bus);
        let clock = MockClock::with_step(600);
        array.calibrate(&clock, 50);
        array.bus.set_values(values);
        clock.advance_ms(5);
        (array, clock)
    }

    fn frame_with_line(on: &[usize]) -> [u16; SENSOR_COUNT] {
        let mut values = [LOW; SENSOR_COUNT];
        for &i in on {
            values[i] = HIGH;
        }
        values
    }

    #[test]
    fn test_scan_order_center_out() {
        let mut array = SensorArray::new(MockSensorBus::new([0; SENSOR_COUNT]));
        let clock = MockClock::new();
        array.sample_all(&clock);

        assert_eq!(array.bus.selections, vec![0, 1, 2, 3, 4, 5, 6, 7, 0]);
        assert_eq!(
            array.bus.read_order,
            vec![7, 8, 6, 9, 5, 10, 4, 11, 3, 12, 2, 13, 1, 14, 0, 15]
        );
    }

    #[test]
    fn test_refresh_is_rate_limited() {
        let mut array = SensorArray::new(MockSensorBus::new([1234; SENSOR_COUNT]));
        let clock = MockClock::new();

        array.sample_all(&clock);
        clock.advance_us(400);
        array.sample_all(&clock);
        assert_eq!(array.bus.sweeps(), 1);

        clock.advance_us(600);
        array.sample_all(&clock);
        assert_eq!(array.bus.sweeps(), 2);
        assert_eq!(array.channels()[3].raw(), 1234);
    }

    #[test]
    fn test_indexed_access() {
        let mut values = [0; SENSOR_COUNT];
        values[4] = 999;
        let mut array = SensorArray::new(MockSensorBus::new(values));
        let clock = MockClock::new();

        assert_eq!(array.raw(&clock, 4), Some(999));
        assert_eq!(array.raw(&clock, SENSOR_COUNT), None);
        assert_eq!(array.calibrated(&clock, 16), None);
        // Uncalibrated threshold is 0: everything reads as line.
        assert_eq!(array.calibrated(&clock, 0), Some(ADC_MAX));
    }

    #[test]
    fn test_calibration_widens_bounds() {
        let (array, _clock) = calibrated_array([LOW; SENSOR_COUNT]);
        for ch in array.channels() {
            assert_eq!(ch.min(), LOW);
            assert_eq!(ch.max(), HIGH);
            assert_eq!(ch.threshold(), LOW + (HIGH - LOW) * 2 / 3);
        }
    }

    #[test]
    fn test_calibration_reports_low_contrast() {
        let mut dull = [HIGH; SENSOR_COUNT];
        dull[2] = 900;
        dull[11] = 1000;
        let bus = MockSensorBus::with_frames(vec![[LOW; SENSOR_COUNT], dull]);
        let mut array = SensorArray::new(bus);
        let clock = MockClock::with_step(600);

        let report = array.calibrate(&clock, 50);

        assert_eq!(report.count_ok, 14);
        assert!(!report.all_ok());
        assert!(!report.contrast_ok[2]);
        assert!(!report.contrast_ok[11]);
        assert!(report.contrast_ok[0]);
        // Thresholds are still usable for the dull sensors.
        assert_eq!(array.channels()[2].threshold(), LOW + (900 - LOW) * 2 / 3);
    }

    #[test]
    fn test_calibration_takes_at_least_one_sample() {
        let mut array = SensorArray::new(MockSensorBus::new([LOW; SENSOR_COUNT]));
        let clock = MockClock::new();
        array.calibrate(&clock, 0);
        assert_eq!(array.channels()[0].min(), LOW);
        assert_eq!(array.channels()[0].max(), LOW);
    }

    #[test]
    fn test_position_centered() {
        let (mut array, clock) = calibrated_array(frame_with_line(&[7, 8]));
        assert_eq!(array.position(&clock, 0), 0);
    }

    #[test]
    fn test_position_single_sensor_edges() {
        let (mut array, clock) = calibrated_array(frame_with_line(&[0]));
        assert_eq!(array.position(&clock, 0), -225);

        array.bus.set_values(frame_with_line(&[15]));
        clock.advance_ms(2);
        assert_eq!(array.position(&clock, 0), 225);
    }

    #[test]
    fn test_position_follows_centroid() {
        // Sensors 10 and 11 (indices 9, 10): centroid 10.5 → 2000 above center.
        let (mut array, clock) = calibrated_array(frame_with_line(&[9, 10]));
        assert_eq!(array.position(&clock, -40), (10_500 * 510) / 17_000 - 255);
    }

    #[test]
    fn test_position_in_range_for_every_partial_frame() {
        let mut channels = [SensorChannel::new(); SENSOR_COUNT];
        for ch in channels.iter_mut() {
            ch.set_raw(LOW);
            ch.calibrate_sample();
            ch.set_raw(HIGH);
            ch.calibrate_sample();
        }

        // Every contiguous run of 1..15 sensors.
        for start in 0..SENSOR_COUNT {
            for len in 1..SENSOR_COUNT {
                if start + len > SENSOR_COUNT {
                    break;
                }
                for (i, ch) in channels.iter_mut().enumerate() {
                    let on = i >= start && i < start + len;
                    ch.set_raw(if on { HIGH } else { LOW });
                }
                let a = line_position(&channels, 100);
                let b = line_position(&channels, -100);
                assert!(a.line_seen);
                assert_eq!(a, b, "partial frame must not depend on last position");
                assert!((-POSITION_MAX..=POSITION_MAX).contains(&a.position));
            }
        }
    }

    #[test]
    fn test_lost_line_holds_last_side() {
        let (mut array, clock) = calibrated_array(frame_with_line(&[]));
        assert_eq!(array.position(&clock, 0), POSITION_MAX);
        clock.advance_ms(2);
        assert_eq!(array.position(&clock, 37), POSITION_MAX);
        clock.advance_ms(2);
        assert_eq!(array.position(&clock, -1), -POSITION_MAX);
        assert_eq!(array.last_line_seen_ms(), None);
    }

    #[test]
    fn test_saturated_frame_holds_last_side() {
        let (mut array, clock) = calibrated_array([HIGH; SENSOR_COUNT]);
        assert_eq!(array.position(&clock, -200), -POSITION_MAX);
        clock.advance_ms(2);
        assert_eq!(array.position(&clock, 200), POSITION_MAX);
        assert_eq!(array.last_line_seen_ms(), None);
    }

    #[test]
    fn test_dumps_refresh_samples() {
        let (mut array, clock) = calibrated_array([LOW; SENSOR_COUNT]);
        array.log_raw(&clock);
        assert_eq!(array.channels()[5].raw(), LOW);

        array.bus.set_values([1234; SENSOR_COUNT]);
        clock.advance_ms(2);
        array.log_calibrated(&clock);
        assert_eq!(array.channels()[5].raw(), 1234);
        assert_eq!(array.channels()[5].line_value(), 0);
    }

    #[test]
    fn test_dump_display() {
        let mut channels = [SensorChannel::new(); SENSOR_COUNT];
        for (i, ch) in channels.iter_mut().enumerate() {
            ch.set_raw(i as u16 * 10);
        }
        let mut line = String::new();
        core::fmt::write(&mut line, format_args!("{}", RawDump(&channels))).unwrap();
        assert!(line.starts_with("0\t10\t20\t"));
        assert!(line.ends_with("\t150"));
    }

    #[test]
    fn test_line_seen_timestamp() {
        let (mut array, clock) = calibrated_array(frame_with_line(&[5, 6]));
        clock.set_us(1_000_000);
        array.position(&clock, 0);
        let seen = array.last_line_seen_ms().unwrap();
        assert!((1000..1002).contains(&seen));
    }
}
