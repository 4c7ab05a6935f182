//! Bit clock driver: the four-wire line interface to the controller.
//!
//! The controller bus has three host-driven lines (clock, select/attention,
//! command) and two device-driven lines (data, acknowledge). Everything above
//! this module talks to the hardware exclusively through [`PsxBus`], so the
//! protocol can run against real pins or a simulated peer.
//!
//! # Wiring
//!
//! | Line        | Direction | Idle | Notes                                   |
//! |-------------|-----------|------|-----------------------------------------|
//! | Clock       | out       | high | device latches command on rising edge   |
//! | Select      | out       | high | active-low attention                    |
//! | Command     | out       | high | host-to-device data                     |
//! | Data        | in        | high | open collector, needs a pull-up         |
//! | Acknowledge | in        | high | open collector, pulsed low after a byte |

use core::convert::Infallible;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

/// Full clock delay between bit phases, in microseconds.
///
/// The controller samples inside a fixed window relative to the clock edges;
/// changing this breaks compatibility with real pads.
pub const CLOCK_DELAY_US: u32 = 10;

/// Half clock delay, used as the acknowledge polling interval.
pub const HALF_CLOCK_DELAY_US: u32 = 5;

/// Raw line access for the controller bus.
///
/// Every call is an immediate, unbuffered pin assertion or read. None of them
/// can fail.
pub trait PsxBus {
    /// Drive the clock line.
    fn set_clock(&mut self, high: bool);

    /// Assert (pull low) or release the select/attention line.
    fn set_select(&mut self, asserted: bool);

    /// Drive the command line with one bit.
    fn set_command_line(&mut self, bit: bool);

    /// Sample the data line.
    fn read_data_bit(&mut self) -> bool;

    /// Sample the acknowledge line.
    ///
    /// Returns the raw level: `true` (high) while the device has not
    /// acknowledged the last byte.
    fn read_ack_line(&mut self) -> bool;
}

impl<T: PsxBus + ?Sized> PsxBus for &mut T {
    #[inline]
    fn set_clock(&mut self, high: bool) {
        (**self).set_clock(high);
    }

    #[inline]
    fn set_select(&mut self, asserted: bool) {
        (**self).set_select(asserted);
    }

    #[inline]
    fn set_command_line(&mut self, bit: bool) {
        (**self).set_command_line(bit);
    }

    #[inline]
    fn read_data_bit(&mut self) -> bool {
        (**self).read_data_bit()
    }

    #[inline]
    fn read_ack_line(&mut self) -> bool {
        (**self).read_ack_line()
    }
}

/// [`PsxBus`] over `embedded-hal` GPIO pins.
///
/// Pin errors must be [`Infallible`], which is the case for on-chip GPIO on
/// every HAL this firmware targets.
pub struct PinBus<CLK, SEL, CMD, DAT, ACK> {
    clock: CLK,
    select: SEL,
    command: CMD,
    data: DAT,
    ack: ACK,
}

impl<CLK, SEL, CMD, DAT, ACK> PinBus<CLK, SEL, CMD, DAT, ACK>
where
    CLK: OutputPin<Error = Infallible>,
    SEL: OutputPin<Error = Infallible>,
    CMD: OutputPin<Error = Infallible>,
    DAT: InputPin<Error = Infallible>,
    ACK: InputPin<Error = Infallible>,
{
    /// Create a bus from its five pins.
    ///
    /// The output pins should already be configured high and the inputs
    /// pulled up.
    #[must_use]
    pub fn new(clock: CLK, select: SEL, command: CMD, data: DAT, ack: ACK) -> Self {
        Self {
            clock,
            select,
            command,
            data,
            ack,
        }
    }
}

impl<CLK, SEL, CMD, DAT, ACK> PsxBus for PinBus<CLK, SEL, CMD, DAT, ACK>
where
    CLK: OutputPin<Error = Infallible>,
    SEL: OutputPin<Error = Infallible>,
    CMD: OutputPin<Error = Infallible>,
    DAT: InputPin<Error = Infallible>,
    ACK: InputPin<Error = Infallible>,
{
    #[inline]
    fn set_clock(&mut self, high: bool) {
        infallible(self.clock.set_state(PinState::from(high)));
    }

    #[inline]
    fn set_select(&mut self, asserted: bool) {
        // Attention is active-low
        infallible(self.select.set_state(PinState::from(!asserted)));
    }

    #[inline]
    fn set_command_line(&mut self, bit: bool) {
        infallible(self.command.set_state(PinState::from(bit)));
    }

    #[inline]
    fn read_data_bit(&mut self) -> bool {
        infallible(self.data.is_high())
    }

    #[inline]
    fn read_ack_line(&mut self) -> bool {
        infallible(self.ack.is_high())
    }
}

#[inline]
fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
