// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 line tracer board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, gpiod, gpioe, Alternate, Analog, Input, Output, PullDown, PullUp, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```text
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub led: gpiod::PD9<Output<PushPull>>,
    pub usart1: Usart1Pins,
    pub sensors: SensorPins,
    pub motors: MotorPins,
    pub fan: gpioa::PA6<Alternate<2>>, // TIM3_CH1 (ESC)
    pub start_signal: gpioa::PA2<Input<PullDown>>,
    pub button: gpioa::PA3<Input<PullUp>>,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// Multiplexer select lines and the two group outputs.
pub struct SensorPins {
    pub s0: gpioe::PE7<Output<PushPull>>,
    pub s1: gpioe::PE8<Output<PushPull>>,
    pub s2: gpioe::PE9<Output<PushPull>>,
    pub left: gpioc::PC0<Analog>,  // ADC1_IN10
    pub right: gpioc::PC1<Analog>, // ADC1_IN11
}

/// RZ7886 inputs for both traction motors.
pub struct MotorPins {
    pub left_a: gpiod::PD12<Alternate<2>>,  // TIM4_CH1
    pub left_b: gpiod::PD13<Alternate<2>>,  // TIM4_CH2
    pub right_a: gpiod::PD14<Alternate<2>>, // TIM4_CH3
    pub right_b: gpiod::PD15<Alternate<2>>, // TIM4_CH4
}

/// ADC1 input wired to the left multiplexer output.
pub const LEFT_ADC_CHANNEL: u8 = 10;
/// ADC1 input wired to the right multiplexer output.
pub const RIGHT_ADC_CHANNEL: u8 = 11;

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            led: gpiod.pd9.into_push_pull_output(),

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            sensors: SensorPins {
                s0: gpioe.pe7.into_push_pull_output(),
                s1: gpioe.pe8.into_push_pull_output(),
                s2: gpioe.pe9.into_push_pull_output(),
                left: gpioc.pc0.into_analog(),
                right: gpioc.pc1.into_analog(),
            },

            motors: MotorPins {
                left_a: gpiod.pd12.into_alternate::<2>(),
                left_b: gpiod.pd13.into_alternate::<2>(),
                right_a: gpiod.pd14.into_alternate::<2>(),
                right_b: gpiod.pd15.into_alternate::<2>(),
            },

            fan: gpioa.pa6.into_alternate::<2>(),
            start_signal: gpioa.pa2.into_pull_down_input(),
            button: gpioa.pa3.into_pull_up_input(),
        }
    }
}
