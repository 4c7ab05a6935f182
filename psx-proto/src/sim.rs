//! Simulated pad on the far side of a [`PsxBus`], for host tests.
//!
//! Behaves like the real device: it shifts a response bit out after each
//! falling clock edge, latches the command bit on the rising edge, and pulls
//! the acknowledge line low once a byte is complete.

extern crate std;

use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::bus::PsxBus;
use crate::frame::FRAME_LEN;

pub(crate) struct SimPad {
    /// Bytes shifted out, by index since select was asserted.
    pub response: [u8; FRAME_LEN],
    /// Acknowledge reads that still see the line high after a byte.
    pub ack_latency: usize,
    /// Stop acknowledging from this byte index on.
    pub silent_from: Option<usize>,

    /// Command bytes latched so far.
    pub received: Vec<u8>,
    /// Acknowledge reads observed after each completed byte.
    pub ack_reads: Vec<usize>,
    pub select_asserts: usize,
    pub clock: bool,
    pub selected: bool,
    pub command: bool,

    byte: usize,
    bit: u8,
    shift_in: u8,
    data_out: bool,
}

impl SimPad {
    pub fn new(response: [u8; FRAME_LEN]) -> Self {
        Self {
            response,
            ack_latency: 0,
            silent_from: None,
            received: Vec::new(),
            ack_reads: Vec::new(),
            select_asserts: 0,
            clock: true,
            selected: false,
            command: true,
            byte: 0,
            bit: 0,
            shift_in: 0,
            data_out: true,
        }
    }

    fn current_response(&self) -> u8 {
        self.response.get(self.byte).copied().unwrap_or(0xFF)
    }
}

impl PsxBus for SimPad {
    fn set_clock(&mut self, high: bool) {
        let was_high = self.clock;
        self.clock = high;

        if was_high && !high {
            self.data_out = self.current_response() & (1 << self.bit) != 0;
        } else if !was_high && high {
            if self.command {
                self.shift_in |= 1 << self.bit;
            }
            self.bit += 1;
            if self.bit == 8 {
                self.received.push(self.shift_in);
                self.ack_reads.push(0);
                self.shift_in = 0;
                self.bit = 0;
                self.byte += 1;
            }
        }
    }

    fn set_select(&mut self, asserted: bool) {
        if asserted && !self.selected {
            self.select_asserts += 1;
            self.byte = 0;
            self.bit = 0;
            self.shift_in = 0;
        }
        self.selected = asserted;
    }

    fn set_command_line(&mut self, bit: bool) {
        self.command = bit;
    }

    fn read_data_bit(&mut self) -> bool {
        self.data_out
    }

    fn read_ack_line(&mut self) -> bool {
        let Some(reads) = self.ack_reads.last_mut() else {
            return true;
        };
        *reads += 1;

        let index = self.byte.saturating_sub(1);
        if self.silent_from.is_some_and(|from| index >= from) {
            return true;
        }
        *reads <= self.ack_latency
    }
}

/// Delay provider that only accounts for the time requested.
#[derive(Default)]
pub(crate) struct SimDelay {
    pub total_ns: u64,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
