// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Analog multiplexer front end for the sensor array.
//!
//! Two 8:1 multiplexers share three select lines (S0..S2). The left group output lands on one ADC
//! channel and the right group on another, so one select state yields one sample per group.

use stm32f7xx_hal::hal::digital::v2::OutputPin;

use crate::hw::adc::Adc;
use crate::hw::io::{SensorBus, SensorGroup};

/// Core cycles to wait after switching the select lines (~10 µs at 16 MHz).
const SETTLE_CYCLES: u32 = 160;

pub struct MuxBus<S0, S1, S2> {
    adc: Adc,
    s0: S0,
    s1: S1,
    s2: S2,
    left_channel: u8,
    right_channel: u8,
}

impl<S0, S1, S2> MuxBus<S0, S1, S2>
where
    S0: OutputPin,
    S1: OutputPin,
    S2: OutputPin,
{
    /// `left_channel` / `right_channel` are the ADC1 inputs wired to each multiplexer output.
    pub fn new(adc: Adc, s0: S0, s1: S1, s2: S2, left_channel: u8, right_channel: u8) -> Self {
        let mut bus = Self {
            adc,
            s0,
            s1,
            s2,
            left_channel,
            right_channel,
        };
        bus.select_channel(0);
        bus
    }

    fn drive<P: OutputPin>(pin: &mut P, high: bool) {
        if high {
            pin.set_high().ok();
        } else {
            pin.set_low().ok();
        }
    }
}

impl<S0, S1, S2> SensorBus for MuxBus<S0, S1, S2>
where
    S0: OutputPin,
    S1: OutputPin,
    S2: OutputPin,
{
    fn select_channel(&mut self, channel: u8) {
        Self::drive(&mut self.s0, channel & 0b001 != 0);
        Self::drive(&mut self.s1, channel & 0b010 != 0);
        Self::drive(&mut self.s2, channel & 0b100 != 0);
        cortex_m::asm::delay(SETTLE_CYCLES);
    }

    fn read_raw(&mut self, group: SensorGroup) -> u16 {
        let channel = match group {
            SensorGroup::Left => self.left_channel,
            SensorGroup::Right => self.right_channel,
        };
        self.adc.read(channel)
    }
}
