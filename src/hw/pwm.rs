// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! PWM outputs via STM32F7 timers in PWM mode 1.
//!
//! - TIM4 CH1..CH4: traction motor inputs, 10-bit (ARR 1023) at ~5 kHz
//! - TIM3 CH1: turbine ESC, 11-bit (ARR 2047) at ~50 Hz
//!
//! Prescalers assume the default 16 MHz APB1 timer clock.

use stm32f7xx_hal::pac;

use crate::hw::io::{ActuatorOutputs, OutputChannel};

const MOTOR_ARR: u32 = 1023;
const MOTOR_PSC: u32 = 2;

const ESC_ARR: u32 = 2047;
const ESC_PSC: u32 = 155;

/// OCxM = PWM mode 1 with preload, for both channels of one CCMR register.
const CCMR_PWM1_PRELOAD: u32 = 0x6868;

pub struct PwmOutputs {
    wheels: pac::TIM4,
    fan: pac::TIM3,
}

impl PwmOutputs {
    /// Configure both timers and start them with every compare at 0.
    pub fn new(tim4: pac::TIM4, tim3: pac::TIM3) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr
            .modify(|_, w| w.tim3en().set_bit().tim4en().set_bit());

        // Disable counters while configuring
        tim4.cr1.modify(|_, w| w.cen().clear_bit());
        tim3.cr1.modify(|_, w| w.cen().clear_bit());

        tim4.psc.write(|w| unsafe { w.bits(MOTOR_PSC) });
        tim4.arr.write(|w| unsafe { w.bits(MOTOR_ARR) });
        tim4.ccmr1_output().write(|w| unsafe { w.bits(CCMR_PWM1_PRELOAD) });
        tim4.ccmr2_output().write(|w| unsafe { w.bits(CCMR_PWM1_PRELOAD) });
        tim4.ccr1.write(|w| unsafe { w.bits(0) });
        tim4.ccr2.write(|w| unsafe { w.bits(0) });
        tim4.ccr3.write(|w| unsafe { w.bits(0) });
        tim4.ccr4.write(|w| unsafe { w.bits(0) });
        // CC1E..CC4E, active high
        tim4.ccer.write(|w| unsafe { w.bits(0x1111) });

        tim3.psc.write(|w| unsafe { w.bits(ESC_PSC) });
        tim3.arr.write(|w| unsafe { w.bits(ESC_ARR) });
        tim3.ccmr1_output().write(|w| unsafe { w.bits(CCMR_PWM1_PRELOAD & 0x00FF) });
        tim3.ccr1.write(|w| unsafe { w.bits(0) });
        tim3.ccer.write(|w| unsafe { w.bits(0x0001) });

        // Latch prescaler/ARR, then run with auto-reload preload
        tim4.egr.write(|w| w.ug().set_bit());
        tim3.egr.write(|w| w.ug().set_bit());
        tim4.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());
        tim3.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());

        Self {
            wheels: tim4,
            fan: tim3,
        }
    }

    #[inline]
    pub fn free(self) -> (pac::TIM4, pac::TIM3) {
        (self.wheels, self.fan)
    }
}

impl ActuatorOutputs for PwmOutputs {
    fn write_channel(&mut self, channel: OutputChannel, value: u16) {
        let value = value as u32;
        match channel {
            OutputChannel::LeftA => self.wheels.ccr1.write(|w| unsafe { w.bits(value) }),
            OutputChannel::LeftB => self.wheels.ccr2.write(|w| unsafe { w.bits(value) }),
            OutputChannel::RightA => self.wheels.ccr3.write(|w| unsafe { w.bits(value) }),
            OutputChannel::RightB => self.wheels.ccr4.write(|w| unsafe { w.bits(value) }),
            OutputChannel::Fan => self.fan.ccr1.write(|w| unsafe { w.bits(value) }),
        }
    }
}
