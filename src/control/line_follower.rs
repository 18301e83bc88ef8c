// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line-following control loop.
//!
//! [`LineFollower`] owns everything the loop touches (sensor array, steering controller, race
//! state, actuators) and is driven by polling. Each call to [`tick`](LineFollower::tick) runs at
//! most one control step, spaced by at least [`CONTROL_PERIOD_US`]:
//!
//! - **Pre-start**: steering only. The wheels counter-rotate to center the vehicle on the line.
//! - **Racing**: ramped forward speed plus steering, turbine on, and the race is stopped when the
//!   line has not been seen for [`LINE_LOST_TIMEOUT_MS`].
//!
//! Typical usage pattern:
//!
//! ```no_run
//! use linetracer::control::LineFollower;
//! use linetracer::hw::io::{ActuatorOutputs, Clock, DigitalInput, SensorBus};
//!
//! fn run<B, O, C, S>(follower: &mut LineFollower<B, O>, clock: &C, start_signal: &mut S) -> !
//! where
//!     B: SensorBus,
//!     O: ActuatorOutputs,
//!     C: Clock,
//!     S: DigitalInput,
//! {
//!     follower.calibrate(clock);
//!
//!     loop {
//!         follower.poll(clock, start_signal.is_high());
//!     }
//! }
//! ```

use log::{info, warn};

use crate::config::{
    PidGains, RaceConfig, CALIBRATION_MS, CONTROL_PERIOD_US, LINE_LOST_TIMEOUT_MS, RAMP_FLOOR_PCT,
};
use crate::control::{Countdown, CountdownStep, Pid, RacePhase, RaceState};
use crate::hw::io::{ActuatorOutputs, Clock, SensorBus};
use crate::motors::Actuation;
use crate::sensors::{CalibrationReport, SensorArray};
use crate::time::{elapsed, TickGate};

/// Forward speed `elapsed_ms` into a race: linear from [`RAMP_FLOOR_PCT`] at `base_accel_speed`
/// percent per second, capped at `base_speed`.
pub fn ramp_speed(config: &RaceConfig, elapsed_ms: u32) -> i32 {
    let ramp = RAMP_FLOOR_PCT as i64 + config.base_accel_speed() as i64 * elapsed_ms as i64 / 1000;
    ramp.min(config.base_speed() as i64) as i32
}

/// The whole vehicle: sensors in, wheels and turbine out.
pub struct LineFollower<B, O> {
    sensors: SensorArray<B>,
    pid: Pid,
    race: RaceState,
    actuation: Actuation<O>,
    config: RaceConfig,

    gate: TickGate,
    position: i32,
    speed: i32,

    countdown: Option<Countdown>,
    start_signal: bool,
}

impl<B: SensorBus, O: ActuatorOutputs> LineFollower<B, O> {
    /// Assemble the vehicle. Actuators are parked at idle.
    pub fn new(bus: B, outputs: O, config: RaceConfig, gains: PidGains) -> Self {
        Self {
            sensors: SensorArray::new(bus),
            pid: Pid::new(gains),
            race: RaceState::new(),
            actuation: Actuation::new(outputs),
            config,
            gate: TickGate::new(CONTROL_PERIOD_US),
            position: 0,
            speed: 0,
            countdown: None,
            start_signal: false,
        }
    }

    /// Run the standard calibration window.
    pub fn calibrate<C: Clock>(&mut self, clock: &C) -> CalibrationReport {
        self.calibrate_for(clock, CALIBRATION_MS)
    }

    /// Run a calibration window of `duration_ms`.
    pub fn calibrate_for<C: Clock>(&mut self, clock: &C, duration_ms: u32) -> CalibrationReport {
        self.sensors.calibrate(clock, duration_ms)
    }

    #[inline]
    pub fn race(&self) -> &RaceState {
        &self.race
    }

    #[inline]
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut RaceConfig {
        &mut self.config
    }

    #[inline]
    pub fn sensors(&self) -> &SensorArray<B> {
        &self.sensors
    }

    #[inline]
    pub fn sensors_mut(&mut self) -> &mut SensorArray<B> {
        &mut self.sensors
    }

    #[inline]
    pub fn actuation(&self) -> &Actuation<O> {
        &self.actuation
    }

    /// Last estimated line position.
    #[inline]
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Current ramped forward speed (%).
    #[inline]
    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Start the race at `now_ms`, re-arming the controller. No-op if already racing.
    pub fn start(&mut self, now_ms: u32) {
        if !self.race.start(now_ms) {
            return;
        }
        self.countdown = None;
        self.speed = 0;
        self.position = 0;
        self.pid.reset();
        self.gate.reset();
        info!(">>> race started <<<");
    }

    /// Stop at `now_ms` and idle every actuator. Safe to call repeatedly.
    pub fn stop(&mut self, now_ms: u32) {
        self.countdown = None;
        if self.race.stop(now_ms) {
            info!(">>> race stopped <<<");
        }
        self.actuation.stop();
    }

    /// Enter the alignment window. Returns false while racing.
    pub fn begin_pre_start(&mut self) -> bool {
        self.race.begin_pre_start()
    }

    /// Leave the alignment window (and any countdown) without starting.
    pub fn cancel_pre_start(&mut self) {
        self.countdown = None;
        self.race.cancel_pre_start();
        self.actuation.stop();
    }

    /// Arm the pre-race countdown. Returns false while racing.
    pub fn begin_countdown(&mut self, now_ms: u32) -> bool {
        if self.race.is_racing() {
            return false;
        }
        info!("countdown armed");
        self.countdown = Some(Countdown::new(now_ms));
        true
    }

    #[inline]
    pub fn countdown_active(&self) -> bool {
        self.countdown.is_some()
    }

    /// One main-loop iteration: start signal edges, countdown, then the control step.
    ///
    /// Rising edge on `start_signal` starts the race, falling edge stops it.
    pub fn poll<C: Clock>(&mut self, clock: &C, start_signal: bool) -> bool {
        if start_signal != self.start_signal {
            self.start_signal = start_signal;
            if start_signal {
                self.start(clock.now_ms());
            } else {
                self.stop(clock.now_ms());
            }
        }

        if let Some(countdown) = self.countdown {
            match countdown.poll(clock.now_ms()) {
                CountdownStep::Hold => {}
                CountdownStep::Align => {
                    if !self.race.is_pre_start() {
                        self.begin_pre_start();
                    }
                }
                CountdownStep::Go => self.start(clock.now_ms()),
            }
        }

        self.tick(clock)
    }

    /// Run the control variant matching the race phase, if the period has elapsed.
    ///
    /// Returns true if a control step ran.
    pub fn tick<C: Clock>(&mut self, clock: &C) -> bool {
        self.race.poll(clock.now_ms());
        match self.race.phase() {
            RacePhase::Racing => self.race_tick(clock),
            RacePhase::PreStart => self.pre_start_tick(clock),
            RacePhase::Idle | RacePhase::Stopped => false,
        }
    }

    /// Steering-only step: rotate in place toward the line.
    pub fn pre_start_tick<C: Clock>(&mut self, clock: &C) -> bool {
        if !self.gate.is_due(clock.now_us()) {
            return false;
        }

        self.position = self.sensors.position(clock, self.position);
        // Whole percent only: a sub-1 % correction means both wheels stopped.
        let correction = self.pid.correction(self.position) as i32;

        self.actuation.drive(
            &self.race,
            clock.now_ms(),
            correction as f32,
            -correction as f32,
        );

        self.gate.mark(clock.now_us());
        true
    }

    /// Full racing step.
    pub fn race_tick<C: Clock>(&mut self, clock: &C) -> bool {
        if !self.gate.is_due(clock.now_us()) {
            return false;
        }

        self.position = self.sensors.position(clock, self.position);
        let correction = self.pid.correction(self.position) as i32;

        let now_ms = clock.now_ms();
        let line_lost = self
            .sensors
            .last_line_seen_ms()
            .map_or(true, |seen| elapsed(now_ms, seen) > LINE_LOST_TIMEOUT_MS);

        if line_lost {
            self.actuation.drive(&self.race, now_ms, 0.0, 0.0);
            self.actuation.thrust(0);
            warn!("line lost, stopping");
            self.stop(now_ms);
        } else {
            if self.speed < self.config.base_speed() {
                let since_start = self.race.started_at().map_or(0, |t| elapsed(now_ms, t));
                self.speed = ramp_speed(&self.config, since_start);
            }

            let left = (self.speed + correction) as f32;
            let right = (self.speed - correction) as f32;
            self.actuation.drive(&self.race, now_ms, left, right);

            if self.config.fan_speed() > 0 {
                self.actuation.thrust(self.config.fan_speed());
            }
        }

        self.gate.mark(clock.now_us());
        true
    }
}
