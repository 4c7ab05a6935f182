//! Byte exchange and polling transaction over a [`PsxBus`].

use embedded_hal::delay::DelayNs;

use crate::bus::{PsxBus, CLOCK_DELAY_US, HALF_CLOCK_DELAY_US};
use crate::decode::decode;
use crate::frame::{ControllerFrame, COMMAND_SEQUENCE, FRAME_LEN};
use crate::types::ControllerState;

/// Acknowledge polls before a byte is declared lost.
pub const ACK_POLL_LIMIT: usize = 50;

/// The device did not acknowledge a byte in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AckTimeout {
    /// Index of the unacknowledged byte within the transaction.
    pub byte_index: usize,
}

/// Host side of the controller link.
///
/// Owns the bus and a busy-wait delay provider for the duration of every
/// exchange; a transaction always runs to completion or timeout before the
/// call returns.
pub struct PsxController<B, D> {
    bus: B,
    delay: D,
    /// Bytes clocked since select was last asserted.
    position: usize,
    /// Accept a frame whose last byte was not acknowledged.
    final_ack_optional: bool,
}

impl<B: PsxBus, D: DelayNs> PsxController<B, D> {
    /// Create a controller link from a bus and a delay provider.
    #[must_use]
    pub fn new(bus: B, delay: D) -> Self {
        Self {
            bus,
            delay,
            position: 0,
            final_ack_optional: false,
        }
    }

    /// Do not fail a transaction when only the final byte goes
    /// unacknowledged.
    ///
    /// Off by default. Many pads never pulse acknowledge after the last byte
    /// of a frame; with this enabled the usual wait still runs, but its
    /// outcome is ignored for that byte. Every earlier byte must still be
    /// acknowledged.
    #[must_use]
    pub fn final_ack_optional(mut self, optional: bool) -> Self {
        self.final_ack_optional = optional;
        self
    }

    /// Exchange one byte in each direction, then wait for the acknowledge
    /// pulse.
    ///
    /// Bits go out least-significant first. The acknowledge line is polled
    /// at most [`ACK_POLL_LIMIT`] times, half a clock delay apart.
    pub fn exchange_byte(&mut self, out: u8) -> Result<u8, AckTimeout> {
        let byte_index = self.position;
        match self.transfer(out) {
            (incoming, true) => Ok(incoming),
            (_, false) => Err(AckTimeout { byte_index }),
        }
    }

    /// Run one complete polling transaction.
    ///
    /// Sends [`COMMAND_SEQUENCE`] and collects the nine response bytes. On
    /// timeout nothing received so far is returned. The lines are put back
    /// to idle either way.
    pub fn run_transaction(&mut self) -> Result<ControllerFrame, AckTimeout> {
        self.begin();
        let result = self.exchange_frame();
        self.end();

        match &result {
            Ok(frame) => trace!("frame: {:?}", frame),
            Err(timeout) => debug!("no ack for byte {}", timeout.byte_index),
        }
        result
    }

    /// Run a transaction and decode it.
    pub fn poll(&mut self) -> Result<ControllerState, AckTimeout> {
        self.run_transaction().map(decode)
    }

    /// Get a reference to the bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Get a mutable reference to the bus.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Decompose into the bus and delay provider.
    pub fn into_parts(self) -> (B, D) {
        (self.bus, self.delay)
    }

    fn begin(&mut self) {
        self.bus.set_command_line(true);
        self.bus.set_clock(true);
        self.bus.set_select(true);
        self.position = 0;
        self.delay.delay_us(CLOCK_DELAY_US);
    }

    fn end(&mut self) {
        self.delay.delay_us(CLOCK_DELAY_US);
        self.bus.set_select(false);
        self.bus.set_command_line(true);
        self.bus.set_clock(true);
    }

    fn exchange_frame(&mut self) -> Result<ControllerFrame, AckTimeout> {
        let mut bytes = [0u8; FRAME_LEN];
        let last = FRAME_LEN - 1;

        for (slot, &command) in bytes[..last].iter_mut().zip(&COMMAND_SEQUENCE[..last]) {
            *slot = self.exchange_byte(command)?;
        }

        bytes[last] = if self.final_ack_optional {
            let (incoming, acked) = self.transfer(COMMAND_SEQUENCE[last]);
            if !acked {
                trace!("final byte not acknowledged");
            }
            incoming
        } else {
            self.exchange_byte(COMMAND_SEQUENCE[last])?
        };

        Ok(ControllerFrame::new(bytes))
    }

    /// Shift a byte and wait for the acknowledge; returns the byte read and
    /// whether it was acknowledged.
    fn transfer(&mut self, out: u8) -> (u8, bool) {
        let incoming = self.shift_byte(out);
        (incoming, self.wait_for_ack())
    }

    fn shift_byte(&mut self, out: u8) -> u8 {
        let mut incoming = 0u8;

        for bit in 0..8 {
            self.delay.delay_us(CLOCK_DELAY_US);
            self.bus.set_command_line(out & (1 << bit) != 0);
            self.bus.set_clock(false);
            self.delay.delay_us(CLOCK_DELAY_US);

            if self.bus.read_data_bit() {
                incoming |= 1 << bit;
            }
            self.bus.set_clock(true);
        }

        self.position += 1;
        incoming
    }

    /// Returns `true` once the line is seen low.
    fn wait_for_ack(&mut self) -> bool {
        for _ in 0..ACK_POLL_LIMIT {
            if !self.bus.read_ack_line() {
                return true;
            }
            self.delay.delay_us(HALF_CLOCK_DELAY_US);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{ANALOG_MODE_ID, CHECK_BYTE, DIGITAL_MODE_ID};
    use crate::sim::{SimDelay, SimPad};
    use crate::types::{AnalogStick, Buttons, ControllerMode};

    const ANALOG_RESPONSE: [u8; FRAME_LEN] =
        [0xFF, ANALOG_MODE_ID, CHECK_BYTE, 0xEF, 0xBF, 30, 40, 10, 20];

    fn controller(pad: SimPad) -> PsxController<SimPad, SimDelay> {
        PsxController::new(pad, SimDelay::default())
    }

    #[test]
    fn test_exchange_all_byte_values_lsb_first() {
        for out in 0..=u8::MAX {
            let reply = out.rotate_left(3) ^ 0xA5;
            let mut response = [0xFF; FRAME_LEN];
            response[0] = reply;

            let mut link = controller(SimPad::new(response));
            assert_eq!(link.exchange_byte(out), Ok(reply), "out = {:#04x}", out);
            assert_eq!(link.bus().received.as_slice(), &[out]);
        }
    }

    #[test]
    fn test_exchange_asymmetric_patterns() {
        // Reversed bit order would turn 0x01 into 0x80
        let mut link = controller(SimPad::new([0x80, 0, 0, 0, 0, 0, 0, 0, 0]));
        assert_eq!(link.exchange_byte(0x01), Ok(0x80));
        assert_eq!(link.bus().received[0], 0x01);
    }

    #[test]
    fn test_exchange_leaves_clock_high() {
        let mut link = controller(SimPad::new([0x00; FRAME_LEN]));
        link.exchange_byte(0x42).unwrap();
        assert!(link.bus().clock);
    }

    #[test]
    fn test_ack_timeout_after_exactly_limit_polls() {
        let mut pad = SimPad::new([0xFF; FRAME_LEN]);
        pad.silent_from = Some(0);
        let mut link = controller(pad);

        assert_eq!(link.exchange_byte(0x01), Err(AckTimeout { byte_index: 0 }));
        assert_eq!(link.bus().ack_reads.as_slice(), &[ACK_POLL_LIMIT]);
    }

    #[test]
    fn test_ack_timeout_delay_budget() {
        let mut pad = SimPad::new([0xFF; FRAME_LEN]);
        pad.silent_from = Some(0);
        let mut link = controller(pad);
        let _ = link.exchange_byte(0x01);

        let (_, delay) = link.into_parts();
        let bits_us = 8 * 2 * u64::from(CLOCK_DELAY_US);
        let ack_us = ACK_POLL_LIMIT as u64 * u64::from(HALF_CLOCK_DELAY_US);
        assert_eq!(delay.total_ns, (bits_us + ack_us) * 1000);
    }

    #[test]
    fn test_ack_on_last_allowed_poll() {
        let mut pad = SimPad::new([0x5A; FRAME_LEN]);
        pad.ack_latency = ACK_POLL_LIMIT - 1;
        let mut link = controller(pad);

        assert_eq!(link.exchange_byte(0xFF), Ok(0x5A));
        assert_eq!(link.bus().ack_reads.as_slice(), &[ACK_POLL_LIMIT]);
    }

    #[test]
    fn test_ack_one_poll_too_late() {
        let mut pad = SimPad::new([0x5A; FRAME_LEN]);
        pad.ack_latency = ACK_POLL_LIMIT;
        let mut link = controller(pad);

        assert!(link.exchange_byte(0xFF).is_err());
    }

    #[test]
    fn test_transaction_sends_command_sequence() {
        let mut link = controller(SimPad::new(ANALOG_RESPONSE));
        let frame = link.run_transaction().unwrap();

        assert_eq!(frame.as_bytes(), &ANALOG_RESPONSE);
        let pad = link.bus();
        assert_eq!(pad.received.as_slice(), &COMMAND_SEQUENCE);
        assert_eq!(pad.select_asserts, 1);
    }

    #[test]
    fn test_transaction_releases_lines() {
        let mut link = controller(SimPad::new(ANALOG_RESPONSE));
        link.run_transaction().unwrap();

        let pad = link.bus();
        assert!(!pad.selected);
        assert!(pad.clock);
        assert!(pad.command);
    }

    #[test]
    fn test_transaction_fails_on_missing_final_ack() {
        let mut pad = SimPad::new(ANALOG_RESPONSE);
        pad.silent_from = Some(FRAME_LEN - 1);
        let mut link = controller(pad);

        assert_eq!(
            link.run_transaction(),
            Err(AckTimeout {
                byte_index: FRAME_LEN - 1
            })
        );
        let pad = link.bus();
        assert_eq!(pad.received.len(), FRAME_LEN);
        assert!(!pad.selected);
    }

    #[test]
    fn test_optional_final_ack_accepts_frame() {
        let mut pad = SimPad::new(ANALOG_RESPONSE);
        pad.silent_from = Some(FRAME_LEN - 1);
        let mut link = controller(pad).final_ack_optional(true);

        let frame = link.run_transaction().unwrap();
        assert_eq!(frame.as_bytes(), &ANALOG_RESPONSE);
        assert_eq!(link.bus().ack_reads.last(), Some(&ACK_POLL_LIMIT));
    }

    #[test]
    fn test_optional_final_ack_still_requires_earlier_acks() {
        let mut pad = SimPad::new(ANALOG_RESPONSE);
        pad.silent_from = Some(FRAME_LEN - 2);
        let mut link = controller(pad).final_ack_optional(true);

        assert_eq!(
            link.run_transaction(),
            Err(AckTimeout {
                byte_index: FRAME_LEN - 2
            })
        );
    }

    #[test]
    fn test_transaction_fails_at_index_four() {
        let mut pad = SimPad::new(ANALOG_RESPONSE);
        pad.silent_from = Some(4);
        let mut link = controller(pad);

        assert_eq!(link.run_transaction(), Err(AckTimeout { byte_index: 4 }));
        let pad = link.bus();
        // Aborted right after the unacknowledged byte
        assert_eq!(pad.received.len(), 5);
        assert!(!pad.selected);
        assert!(pad.clock);
    }

    #[test]
    fn test_transaction_fails_at_second_to_last_byte() {
        let mut pad = SimPad::new(ANALOG_RESPONSE);
        pad.silent_from = Some(FRAME_LEN - 2);
        let mut link = controller(pad);

        assert_eq!(
            link.run_transaction(),
            Err(AckTimeout {
                byte_index: FRAME_LEN - 2
            })
        );
    }

    #[test]
    fn test_transactions_restart_byte_index() {
        let mut link = controller(SimPad::new(ANALOG_RESPONSE));
        link.run_transaction().unwrap();

        link.bus_mut().silent_from = Some(2);
        assert_eq!(link.run_transaction(), Err(AckTimeout { byte_index: 2 }));
        assert_eq!(link.bus().select_asserts, 2);
    }

    #[test]
    fn test_poll_decodes_analog_frame() {
        let mut link = controller(SimPad::new(ANALOG_RESPONSE));
        let state = link.poll().unwrap();

        assert_eq!(state.mode, ControllerMode::Analog(ANALOG_MODE_ID));
        assert_eq!(state.buttons, Buttons::UP | Buttons::CROSS);
        let sticks = state.sticks.unwrap();
        assert_eq!(sticks.left, AnalogStick::new(10, 20));
        assert_eq!(sticks.right, AnalogStick::new(30, 40));
    }

    #[test]
    fn test_poll_digital_pad() {
        let response = [0xFF, DIGITAL_MODE_ID, CHECK_BYTE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut link = controller(SimPad::new(response));
        let state = link.poll().unwrap();

        assert_eq!(state.mode, ControllerMode::Digital);
        assert!(state.buttons.is_empty());
        assert_eq!(state.sticks, None);
    }
}
