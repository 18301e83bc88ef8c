// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Line Sensors
//!
//! The 16-sensor reflectance array and the estimator reducing it to one line position.
//!
//! ## Modules
//!
//! - [`channel`] - One sensor: latest sample and calibration bounds.
//! - [`array`] - Multiplexed acquisition, calibration window and position estimate.

pub mod array;
pub mod channel;

pub use array::{line_position, CalibrationReport, PositionEstimate, SensorArray};
pub use channel::SensorChannel;
