// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! ADC1 support using direct PAC register access.
//!
//! Blocking single-channel conversions, 12-bit right-aligned, software triggered. Used by the
//! sensor multiplexer to sample both sensor groups.

use stm32f7xx_hal::pac;

/// Sample time code applied to every converted channel (56 cycles).
const SAMPLE_TIME: u32 = 0b011;

pub struct Adc {
    adc: pac::ADC1,
}

impl Adc {
    /// Power up and configure ADC1.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        // ADC prescaler: PCLK2 / 4
        common.ccr.modify(|_, w| w.adcpre().div4());

        // Power off to configure
        adc1.cr2.modify(|_, w| w.adon().clear_bit());

        // 12-bit, right-aligned, single conversion, software trigger
        adc1.cr1.modify(|_, w| w.res().bits(0b00));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });

        // Sequence length = 1 conversion
        adc1.sqr1.modify(|_, w| w.l().bits(0));

        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc: adc1 }
    }

    #[inline]
    pub fn free(self) -> pac::ADC1 {
        self.adc
    }

    /// Convert one channel (0..=18) and return the raw 12-bit result.
    pub fn read(&mut self, channel: u8) -> u16 {
        let channel = channel & 0x1F;

        // SMPR2 holds channels 0..=9, SMPR1 holds 10..=18
        if channel <= 9 {
            let shift = 3 * channel as u32;
            self.adc.smpr2.modify(|r, w| unsafe {
                w.bits((r.bits() & !(0b111 << shift)) | (SAMPLE_TIME << shift))
            });
        } else {
            let shift = 3 * (channel as u32 - 10);
            self.adc.smpr1.modify(|r, w| unsafe {
                w.bits((r.bits() & !(0b111 << shift)) | (SAMPLE_TIME << shift))
            });
        }

        self.adc.sqr3.modify(|_, w| unsafe { w.sq1().bits(channel) });

        self.adc.cr2.modify(|_, w| w.swstart().set_bit());
        while self.adc.sr.read().eoc().bit_is_clear() {}

        self.adc.dr.read().data().bits() as u16
    }
}
