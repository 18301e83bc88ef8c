// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! This module provides the steering controller and the race-level control loop built on it.
//!
//! ## Modules
//!
//! - [`pid`] - PD steering controller on the line position.
//! - [`race`] - Race state machine and actuation safety gate.
//! - [`countdown`] - Pre-race countdown with an alignment window.
//! - [`line_follower`] - Scheduled control loop tying sensors, controller and actuators together.

pub mod countdown;
pub mod line_follower;
pub mod pid;
pub mod race;

pub use countdown::{Countdown, CountdownStep};
pub use line_follower::LineFollower;
pub use pid::Pid;
pub use race::{RacePhase, RaceState};
