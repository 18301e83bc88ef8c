// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Line Tracer Firmware
//!
//! This crate contains the firmware for a 16-sensor line-following race vehicle with two brushed
//! traction motors and a suction turbine, written in Rust, targeting an STM32F777 MCU.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Tunables, signal ranges and timing constants |
//! | [`time`] | Wraparound-safe timing helpers |
//! | [`hw`] | Board I/O traits, plus MCU-level implementations (ADC, timers, USART) |
//! | [`sensors`] | Sensor calibration and line position estimate |
//! | [`drivers`] | Device-level signal encodings (RZ7886, ESC) |
//! | [`motors`] | Actuation mapper with the race safety gate |
//! | [`control`] | PD steering, race state machine, main control loop |
//!
//! Everything except the MCU implementations in [`hw`] is hardware-independent and unit tested
//! on the host.
//!
//! ## Getting Started
//!
//! Run the unit tests on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features stm32
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod drivers;
pub mod hw;
pub mod motors;
pub mod sensors;
pub mod time;
