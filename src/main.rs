// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use log::{info, LevelFilter};
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use linetracer::config::{PidGains, RaceConfig};
use linetracer::control::LineFollower;
use linetracer::hw::pins::{LEFT_ADC_CHANNEL, RIGHT_ADC_CHANNEL};
use linetracer::hw::{
    logger, Adc, BoardPins, Clock, DigitalInput, Led, MuxBus, PwmOutputs, Signal, Timebase, Usart,
};
use linetracer::time::{elapsed, TickGate};

/// Button edges closer together than this are contact bounce.
const BUTTON_DEBOUNCE_MS: u32 = 50;

/// Sensor dump period while waiting for a race.
const SENSOR_DUMP_US: u32 = 500_000;

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // USART1 (DBG)
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART1, (pins.usart1.tx, pins.usart1.rx), &clocks, usart_cfg);
    let _ = logger::init(Usart::new(serial), LevelFilter::Debug);

    info!("line tracer up");

    // Outputs first: the ESC must see its idle pulse while it arms
    let outputs = PwmOutputs::new(dp.TIM4, dp.TIM3);
    let clock = Timebase::new(dp.TIM2, dp.TIM5);

    let sensors = pins.sensors;
    let bus = MuxBus::new(
        Adc::adc1(dp.ADC1),
        sensors.s0,
        sensors.s1,
        sensors.s2,
        LEFT_ADC_CHANNEL,
        RIGHT_ADC_CHANNEL,
    );

    let mut led = Led::active_low(pins.led);
    let mut start_signal = Signal::active_high(pins.start_signal);
    let mut button = Signal::active_low(pins.button);

    let mut follower = LineFollower::new(bus, outputs, RaceConfig::new(), PidGains::DEFAULT);

    // The calibration window doubles as the ESC arming time
    led.set(true);
    follower.calibrate(&clock);
    led.set(false);

    let mut pressed = false;
    let mut last_press_ms = clock.now_ms();
    let mut dump = TickGate::new(SENSOR_DUMP_US);

    loop {
        let now_ms = clock.now_ms();
        let level = button.is_high();
        if level != pressed && elapsed(now_ms, last_press_ms) >= BUTTON_DEBOUNCE_MS {
            pressed = level;
            last_press_ms = now_ms;
            if pressed {
                if follower.race().is_racing() || follower.countdown_active() {
                    follower.stop(now_ms);
                } else {
                    follower.begin_countdown(now_ms);
                }
            }
        }

        follower.poll(&clock, start_signal.is_high());
        led.set(follower.race().is_racing());

        if !follower.race().is_racing() && dump.is_due(clock.now_us()) {
            follower.sensors_mut().log_raw(&clock);
            follower.sensors_mut().log_calibrated(&clock);
            dump.mark(clock.now_us());
        }
    }
}
