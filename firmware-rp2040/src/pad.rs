//! Controller port wiring.
//!
//! # Pins
//!
//! | Function    | GPIO | Direction       |
//! |-------------|------|-----------------|
//! | Command     | 2    | out, idle high  |
//! | Select      | 3    | out, idle high  |
//! | Acknowledge | 4    | in, pull-up     |
//! | Data        | 5    | in, pull-up     |
//! | Clock       | 6    | out, idle high  |

use embassy_rp::gpio::{Input, Output};
use embassy_time::Delay;
use psx_proto::{PinBus, PsxController};

/// Controller bus over RP2040 GPIO.
pub type PadBus<'d> = PinBus<Output<'d>, Output<'d>, Output<'d>, Input<'d>, Input<'d>>;

/// Controller link with busy-wait timing from `embassy-time`.
pub type PadLink<'d> = PsxController<PadBus<'d>, Delay>;

/// GPIOs of the controller port, already configured.
pub struct PadPins<'d> {
    pub clock: Output<'d>,
    pub select: Output<'d>,
    pub command: Output<'d>,
    pub data: Input<'d>,
    pub ack: Input<'d>,
}

impl<'d> PadPins<'d> {
    /// Build the controller link.
    #[must_use]
    pub fn into_link(self) -> PadLink<'d> {
        let bus = PinBus::new(self.clock, self.select, self.command, self.data, self.ack);
        PsxController::new(bus, Delay).final_ack_optional(cfg!(feature = "optional-final-ack"))
    }
}
