// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! In-memory stand-ins for the board I/O, used by the unit tests.

use core::cell::Cell;

use crate::config::SENSOR_COUNT;
use crate::hw::io::{ActuatorOutputs, Clock, OutputChannel, SensorBus, SensorGroup};

/// Manually driven clock. Optionally advances by `step_us` on every read so that loops waiting
/// on the clock terminate.
pub struct MockClock {
    us: Cell<u64>,
    step_us: u64,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            us: Cell::new(0),
            step_us: 0,
        }
    }

    pub fn with_step(step_us: u64) -> Self {
        Self {
            us: Cell::new(0),
            step_us,
        }
    }

    pub fn set_us(&self, us: u64) {
        self.us.set(us);
    }

    pub fn advance_us(&self, us: u64) {
        self.us.set(self.us.get() + us);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }

    fn tick(&self) -> u64 {
        let now = self.us.get();
        self.us.set(now + self.step_us);
        now
    }
}

impl Clock for MockClock {
    fn now_us(&self) -> u32 {
        self.tick() as u32
    }

    fn now_ms(&self) -> u32 {
        (self.tick() / 1000) as u32
    }
}

/// Sensor bus replaying one or more frames of raw values (indexed by sensor position).
///
/// The frame advances after every full sweep of 16 reads, cycling through `frames`.
pub struct MockSensorBus {
    frames: Vec<[u16; SENSOR_COUNT]>,
    frame: usize,
    selected: u8,
    reads: usize,
    /// Every multiplexer state selected, in order.
    pub selections: Vec<u8>,
    /// Sensor index of every sample taken, in order.
    pub read_order: Vec<usize>,
}

impl MockSensorBus {
    pub fn new(values: [u16; SENSOR_COUNT]) -> Self {
        Self::with_frames(vec![values])
    }

    pub fn with_frames(frames: Vec<[u16; SENSOR_COUNT]>) -> Self {
        assert!(!frames.is_empty());
        Self {
            frames,
            frame: 0,
            selected: 0,
            reads: 0,
            selections: Vec::new(),
            read_order: Vec::new(),
        }
    }

    /// Replace the values returned from now on.
    pub fn set_values(&mut self, values: [u16; SENSOR_COUNT]) {
        self.frames = vec![values];
        self.frame = 0;
    }

    /// Number of full 16-sample sweeps performed.
    pub fn sweeps(&self) -> usize {
        self.reads / SENSOR_COUNT
    }
}

impl SensorBus for MockSensorBus {
    fn select_channel(&mut self, channel: u8) {
        self.selected = channel;
        self.selections.push(channel);
    }

    fn read_raw(&mut self, group: SensorGroup) -> u16 {
        let index = match group {
            SensorGroup::Left => 7 - self.selected as usize,
            SensorGroup::Right => 8 + self.selected as usize,
        };
        self.read_order.push(index);
        let value = self.frames[self.frame][index];

        self.reads += 1;
        if self.reads % SENSOR_COUNT == 0 {
            self.frame = (self.frame + 1) % self.frames.len();
        }
        value
    }
}

/// Output sink remembering the latest value per channel and every write.
pub struct MockOutputs {
    values: [Option<u16>; 5],
    pub writes: Vec<(OutputChannel, u16)>,
}

impl MockOutputs {
    pub fn new() -> Self {
        Self {
            values: [None; 5],
            writes: Vec::new(),
        }
    }

    /// Latest value written to `channel`, if any.
    pub fn get(&self, channel: OutputChannel) -> Option<u16> {
        self.values[channel.index()]
    }

    /// Latest values of all channels, in [`OutputChannel::ALL`] order.
    pub fn snapshot(&self) -> [Option<u16>; 5] {
        self.values
    }
}

impl ActuatorOutputs for MockOutputs {
    fn write_channel(&mut self, channel: OutputChannel, value: u16) {
        self.values[channel.index()] = Some(value);
        self.writes.push((channel, value));
    }
}
