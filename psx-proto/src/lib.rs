//! PlayStation controller protocol: bit-banged serial exchange, polling
//! transaction, and state decoding.
//!
//! This crate is chip-agnostic. It drives the controller through the
//! [`PsxBus`] line interface and a blocking `embedded-hal` delay, so it runs
//! unchanged on any microcontroller with five free GPIOs, and on the host
//! against a simulated pad.
//!
//! - **Bus**: [`PsxBus`] line primitives, [`PinBus`] adapter for GPIO pins
//! - **Link**: [`PsxController`] - byte exchange and the polling transaction
//! - **Frame**: [`ControllerFrame`] - raw nine-byte response and constants
//! - **Decoding**: [`decode()`] into [`ControllerState`]
//!
//! # Protocol
//!
//! Each poll selects the pad and exchanges nine bytes, full duplex, LSB
//! first:
//!
//! ```text
//! host:  01 42 FF FF FF FF FF FF FF
//! pad:   ?? ID 5A B0 B1 RX RY LX LY
//! ```
//!
//! `ID` is the mode (`0x41` digital, `0x73` analog), `B0`/`B1` the buttons
//! (active-low) and the last four bytes the stick axes in analog mode. After
//! every byte but the last the pad pulses the acknowledge line low.
//!
//! # Example
//!
//! ```ignore
//! use psx_proto::{PinBus, PsxController};
//!
//! let bus = PinBus::new(clock, select, command, data, ack);
//! let mut pad = PsxController::new(bus, delay);
//!
//! match pad.poll() {
//!     Ok(state) => { /* use state */ }
//!     Err(timeout) => { /* pad missing, try again next cycle */ }
//! }
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and transaction tracing

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod fmt;

pub mod bus;
pub mod controller;
pub mod decode;
pub mod frame;
pub mod types;

#[cfg(test)]
mod sim;

// Re-export main types at crate root
pub use bus::{PinBus, PsxBus, CLOCK_DELAY_US, HALF_CLOCK_DELAY_US};
pub use controller::{AckTimeout, PsxController, ACK_POLL_LIMIT};
pub use decode::decode;
pub use frame::{
    ControllerFrame, FrameError, ANALOG_MODE_ID, CHECK_BYTE, COMMAND_SEQUENCE, DIGITAL_MODE_ID,
    FRAME_LEN,
};
pub use types::{AnalogStick, Buttons, ControllerMode, ControllerState, Sticks};
