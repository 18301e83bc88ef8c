// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running microsecond and millisecond counters.
//!
//! TIM2 and TIM5 are the two 32-bit timers; each is prescaled to its tick rate and left counting
//! over the full 32-bit range, so both counters wrap the same way `u32` arithmetic does.

use stm32f7xx_hal::pac;

use crate::hw::io::Clock;

/// APB1 timer clock with the default (HSI) clock tree.
const TIMER_CLOCK_HZ: u32 = 16_000_000;

pub struct Timebase {
    us: pac::TIM2,
    ms: pac::TIM5,
}

/// Prescale a 32-bit timer to `$tick_hz` and start it from zero over the full range.
macro_rules! start_counter {
    ($tim:expr, $tick_hz:expr) => {{
        let tim = &$tim;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| unsafe { w.bits(TIMER_CLOCK_HZ / $tick_hz - 1) });
        // Auto-reload: max 32-bit
        tim.arr.write(|w| unsafe { w.bits(0xFFFF_FFFF) });

        // Latch the prescaler, then reset the counter
        tim.egr.write(|w| w.ug().set_bit());
        tim.cnt.write(|w| unsafe { w.bits(0) });

        tim.cr1.modify(|_, w| w.cen().set_bit());
    }};
}

impl Timebase {
    /// Configure TIM2 at 1 MHz and TIM5 at 1 kHz and start both from zero.
    pub fn new(tim2: pac::TIM2, tim5: pac::TIM5) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr
            .modify(|_, w| w.tim2en().set_bit().tim5en().set_bit());

        start_counter!(tim2, 1_000_000);
        start_counter!(tim5, 1_000);

        Self { us: tim2, ms: tim5 }
    }

    #[inline]
    pub fn free(self) -> (pac::TIM2, pac::TIM5) {
        (self.us, self.ms)
    }
}

impl Clock for Timebase {
    #[inline]
    fn now_us(&self) -> u32 {
        self.us.cnt.read().bits()
    }

    #[inline]
    fn now_ms(&self) -> u32 {
        self.ms.cnt.read().bits()
    }
}
