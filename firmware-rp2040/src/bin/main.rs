#![no_std]
#![no_main]

use defmt::{error, info, trace, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::Timer;
use psx_pad_reader_rp2040::{
    init_lcd, DisplaySink, GpioLcdBus, PadMonitor, PadPins, PollError, CONFIG,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

/// HD44780 needs 40 ms after power-up before accepting instructions.
const LCD_POWER_UP_MS: u64 = 50;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("PSX pad reader starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Controller port ---
    let pad = PadPins {
        command: Output::new(p.PIN_2, Level::High),
        select: Output::new(p.PIN_3, Level::High),
        ack: Input::new(p.PIN_4, Pull::Up),
        data: Input::new(p.PIN_5, Pull::Up),
        clock: Output::new(p.PIN_6, Level::High),
    }
    .into_link();

    // --- LCD ---
    let lcd_bus = GpioLcdBus::new(
        Output::new(p.PIN_7, Level::Low), // RS
        Output::new(p.PIN_8, Level::Low), // RW
        Output::new(p.PIN_9, Level::Low), // E
        [
            Output::new(p.PIN_10, Level::Low),
            Output::new(p.PIN_11, Level::Low),
            Output::new(p.PIN_12, Level::Low),
            Output::new(p.PIN_13, Level::Low),
            Output::new(p.PIN_14, Level::Low),
            Output::new(p.PIN_15, Level::Low),
            Output::new(p.PIN_16, Level::Low),
            Output::new(p.PIN_17, Level::Low),
        ],
    );
    Timer::after_millis(LCD_POWER_UP_MS).await;
    let lcd = init_lcd(lcd_bus);

    let mut monitor = PadMonitor::new(pad, lcd, CONFIG);

    if let Err(e) = monitor.show_splash() {
        error!("Splash failed: {:?}", e);
    }
    Timer::after_millis(u64::from(CONFIG.splash_ms)).await;
    if let Err(e) = monitor.sink_mut().clear() {
        error!("Display clear failed: {:?}", e);
    }

    info!("Polling every {} ms (verify frames: {})", CONFIG.poll_interval_ms, CONFIG.verify_frames);

    loop {
        let failures_before = monitor.stats().consecutive_failures;

        match monitor.poll_once() {
            Ok(state) => {
                if failures_before > 0 {
                    info!("Pad back after {} failed polls", failures_before);
                }
                trace!("Pad state: {:?}", state);
            }
            Err(PollError::Display(e)) => {
                error!("Display error: {:?}", e);
            }
            Err(e) => {
                // Only report the start of an outage, the screen keeps the last state
                if failures_before == 0 {
                    warn!("Pad poll failed: {:?}", e);
                }
            }
        }

        Timer::after_millis(u64::from(CONFIG.poll_interval_ms)).await;
    }
}
