//! PlayStation controller reader for RP2040.
//!
//! Polls a first-generation PlayStation pad (digital or DualShock) over
//! bit-banged GPIO and shows its buttons and sticks on a 16x2 HD44780 LCD.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and, every 50 ms:
//! 1. Runs one polling transaction with the pad ([`psx_proto`])
//! 2. Decodes the frame into a controller state
//! 3. Renders it as two text lines on the LCD ([`pad_core`])
//!
//! A missing or unplugged pad leaves the last state on screen; polling simply
//! continues.
//!
//! # Hardware Configuration
//!
//! See [`pad`] and [`lcd`] for the pin maps. The pad's data and acknowledge
//! lines are open collector and rely on the internal pull-ups.
//!
//! # Architecture
//!
//! A single Embassy task owns everything. Transactions busy-wait for their
//! microsecond timing; only the pause between polls yields to the executor.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`lenient-frames`**: Do not reject frames with a bad check byte
//! - **`optional-final-ack`**: Accept a frame when the pad does not
//!   acknowledge its last byte
//!
//! # Re-exports
//!
//! This crate re-exports the commonly used items from [`pad_core`] for
//! convenience.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

pub use pad_core::{
    ControllerState, DisplaySink, PadMonitor, PollConfig, PollError, PollStats, DEFAULT_CONFIG,
};

pub mod lcd;
pub mod pad;

pub use lcd::{init_lcd, GpioLcdBus, Lcd};
pub use pad::{PadBus, PadLink, PadPins};

/// Settings used by the firmware, after feature selection.
pub const CONFIG: PollConfig = if cfg!(feature = "lenient-frames") {
    DEFAULT_CONFIG.lenient()
} else {
    DEFAULT_CONFIG
};
