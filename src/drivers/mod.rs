// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific signal encodings that sit above the raw `hw/` layer and
//! below the application logic. Drivers do not own peripherals; they write through an
//! [`ActuatorOutputs`](crate::hw::io::ActuatorOutputs) sink.
//!
//! ## Existing drivers
//!
//! - [`rz7886`] – RZ7886 dual-input H-bridge for a brushed traction motor
//! - [`esc`] – Servo-protocol ESC for the suction turbine

pub mod esc;
pub mod rz7886;

pub use esc::Esc;
pub use rz7886::Rz7886;
