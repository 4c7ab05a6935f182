//! Platform-agnostic pad polling loop, display sink and rendering.
//!
//! This crate sits between the controller protocol ([`psx_proto`]) and the
//! board support code. It has no chip-specific dependencies and is tested
//! on the host.
//!
//! # Overview
//!
//! - [`input`]: Pad source trait ([`PadSource`]), implemented for [`PsxController`]
//! - [`display`]: Display sink trait ([`DisplaySink`])
//! - [`hd44780`]: Character LCD driver implementing the sink ([`Hd44780`])
//! - [`render`]: Two-line text layout of a [`ControllerState`]
//! - [`monitor`]: The poll cycle ([`PadMonitor`])
//! - [`config`]: Loop settings ([`PollConfig`])
//!
//! # Example
//!
//! ```ignore
//! use pad_core::{PadMonitor, DEFAULT_CONFIG};
//!
//! let mut monitor = PadMonitor::new(controller, lcd, DEFAULT_CONFIG);
//! monitor.show_splash()?;
//!
//! loop {
//!     // Failures keep the previous state on screen
//!     let _ = monitor.poll_once();
//!     wait_ms(DEFAULT_CONFIG.poll_interval_ms);
//! }
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod display;
pub mod hd44780;
pub mod input;
pub mod monitor;
pub mod render;

// Re-export main types at crate root
pub use config::{PollConfig, DEFAULT_CONFIG};
pub use display::{DisplayError, DisplaySink, DISPLAY_COLS, DISPLAY_ROWS};
pub use hd44780::{Hd44780, LcdBus, Register};
pub use input::PadSource;
pub use monitor::{PadMonitor, PollError, PollStats};

pub use psx_proto::{
    AckTimeout, AnalogStick, Buttons, ControllerFrame, ControllerMode, ControllerState,
    PsxController, Sticks,
};
