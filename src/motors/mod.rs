// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Actuator Abstractions
//!
//! This module contains vehicle-level wrappers that sit above device-level drivers in `drivers`.
//!
//! ## Modules
//!
//! - [`actuation`] - Both traction motors and the turbine behind the race safety gate.

pub mod actuation;

pub use actuation::Actuation;
