// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board-independent I/O seams between the control core and the hardware.
//!
//! The firmware implements these on top of STM32F7 peripherals; host tests use the mocks in
//! `hw::mock`.

/// One of the two analog inputs behind the sensor multiplexers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SensorGroup {
    /// Sensors 1–8 (left half).
    Left,
    /// Sensors 9–16 (right half).
    Right,
}

/// Time-multiplexed access to the sensor array.
pub trait SensorBus {
    /// Drive the multiplexer select lines (`channel` in 0..8) and let the output settle.
    fn select_channel(&mut self, channel: u8);

    /// Sample the analog input of one multiplexer group.
    fn read_raw(&mut self, group: SensorGroup) -> u16;
}

/// Actuator signal channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputChannel {
    LeftA,
    LeftB,
    RightA,
    RightB,
    Fan,
}

impl OutputChannel {
    pub const ALL: [OutputChannel; 5] = [
        OutputChannel::LeftA,
        OutputChannel::LeftB,
        OutputChannel::RightA,
        OutputChannel::RightB,
        OutputChannel::Fan,
    ];

    /// Dense index, usable for per-channel tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Sink for actuator signal values, in each channel's native range.
pub trait ActuatorOutputs {
    fn write_channel(&mut self, channel: OutputChannel, value: u16);
}

/// Monotonic, wrap-around-prone time source.
pub trait Clock {
    fn now_us(&self) -> u32;
    fn now_ms(&self) -> u32;
}

/// Logical-level digital input (true = active).
pub trait DigitalInput {
    fn is_high(&mut self) -> bool;
}

impl<T: SensorBus + ?Sized> SensorBus for &mut T {
    fn select_channel(&mut self, channel: u8) {
        (**self).select_channel(channel)
    }

    fn read_raw(&mut self, group: SensorGroup) -> u16 {
        (**self).read_raw(group)
    }
}

impl<T: ActuatorOutputs + ?Sized> ActuatorOutputs for &mut T {
    fn write_channel(&mut self, channel: OutputChannel, value: u16) {
        (**self).write_channel(channel, value)
    }
}
