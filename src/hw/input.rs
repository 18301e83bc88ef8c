// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Digital inputs: the external start signal and the on-board button.

use stm32f7xx_hal::hal::digital::v2::InputPin;

use crate::hw::io::DigitalInput;
use crate::hw::led::ActiveLevel;

/// Input pin read as a logical level, with read errors treated as inactive.
pub struct Signal<PIN: InputPin> {
    pin: PIN,
    active: ActiveLevel,
}

impl<PIN: InputPin> Signal<PIN> {
    pub fn active_high(pin: PIN) -> Self {
        Self {
            pin,
            active: ActiveLevel::High,
        }
    }

    pub fn active_low(pin: PIN) -> Self {
        Self {
            pin,
            active: ActiveLevel::Low,
        }
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

impl<PIN: InputPin> DigitalInput for Signal<PIN> {
    fn is_high(&mut self) -> bool {
        match self.active {
            ActiveLevel::High => self.pin.is_high().unwrap_or(false),
            ActiveLevel::Low => self.pin.is_low().unwrap_or(false),
        }
    }
}
