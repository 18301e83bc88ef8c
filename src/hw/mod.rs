// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Layer
//!
//! [`io`] defines the board I/O seams the rest of the crate is written against. Everything else
//! here implements them for the STM32F777 and is only built with the `stm32` feature.
//!
//! ## Modules
//!
//! - [`io`] - Sensor bus, actuator output, clock and digital input traits.
//! - `adc` - ADC1 single-channel conversions.
//! - `mux` - Multiplexed sensor array front end.
//! - `pwm` - Motor and ESC PWM timers.
//! - `timebase` - Free-running µs/ms counters.
//! - `input` - Start signal and button.
//! - `led` - Status LED.
//! - `usart` / `logger` - Debug terminal and `log` backend.
//! - `pins` - Board pin map.

pub mod io;

#[cfg(test)]
pub mod mock;

#[cfg(feature = "stm32")]
pub mod adc;
#[cfg(feature = "stm32")]
pub mod input;
#[cfg(feature = "stm32")]
pub mod led;
#[cfg(feature = "stm32")]
pub mod logger;
#[cfg(feature = "stm32")]
pub mod mux;
#[cfg(feature = "stm32")]
pub mod pins;
#[cfg(feature = "stm32")]
pub mod pwm;
#[cfg(feature = "stm32")]
pub mod timebase;
#[cfg(feature = "stm32")]
pub mod usart;

pub use io::{ActuatorOutputs, Clock, DigitalInput, OutputChannel, SensorBus, SensorGroup};

#[cfg(feature = "stm32")]
pub use adc::Adc;
#[cfg(feature = "stm32")]
pub use input::Signal;
#[cfg(feature = "stm32")]
pub use led::Led;
#[cfg(feature = "stm32")]
pub use mux::MuxBus;
#[cfg(feature = "stm32")]
pub use pins::BoardPins;
#[cfg(feature = "stm32")]
pub use pwm::PwmOutputs;
#[cfg(feature = "stm32")]
pub use timebase::Timebase;
#[cfg(feature = "stm32")]
pub use usart::Usart;
