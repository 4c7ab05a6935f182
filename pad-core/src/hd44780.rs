//! HD44780-compatible 16x2 character LCD on an 8-bit parallel bus.
//!
//! The driver only writes (RW is expected to be tied or held low), so it
//! cannot poll the busy flag and waits out each instruction instead.

use embedded_hal::delay::DelayNs;

use crate::display::{check_position, DisplayError, DisplaySink, DISPLAY_COLS};

/// Enable pulse width, in microseconds.
pub const ENABLE_PULSE_US: u32 = 100;

/// Settle time for ordinary instructions and data writes.
pub const SHORT_EXEC_US: u32 = 50;

/// Settle time for clear and return-home.
pub const LONG_EXEC_US: u32 = 1800;

pub const CMD_CLEAR: u8 = 0x01;
pub const CMD_HOME: u8 = 0x02;
/// Entry mode: increment cursor, no shift.
pub const CMD_ENTRY_INCREMENT: u8 = 0x06;
pub const CMD_DISPLAY_OFF: u8 = 0x08;
/// Display on, cursor and blink off.
pub const CMD_DISPLAY_ON: u8 = 0x0C;
/// Function set: 8-bit bus, 2 lines, 5x8 font.
pub const CMD_FUNCTION_8BIT_2LINE: u8 = 0x38;
pub const CMD_SET_DDRAM_ADDR: u8 = 0x80;

/// Power-on instruction sequence.
pub const INIT_SEQUENCE: [u8; 5] = [
    CMD_DISPLAY_OFF,
    CMD_FUNCTION_8BIT_2LINE,
    CMD_CLEAR,
    CMD_ENTRY_INCREMENT,
    CMD_DISPLAY_ON,
];

/// Register selected by the RS line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// RS low.
    Instruction,
    /// RS high.
    Data,
}

/// Parallel bus wiring of the LCD.
///
/// Implemented by the board support code on top of its GPIO pins.
pub trait LcdBus {
    /// Drive the RS line for the given register.
    fn set_register(&mut self, register: Register);

    /// Drive the enable (E) line.
    fn set_enable(&mut self, high: bool);

    /// Put a byte on D0-D7.
    fn set_data(&mut self, byte: u8);
}

/// Write-only HD44780 driver.
pub struct Hd44780<B, D> {
    bus: B,
    delay: D,
}

impl<B: LcdBus, D: DelayNs> Hd44780<B, D> {
    /// Create a driver. Call [`init`](Self::init) before writing.
    #[must_use]
    pub fn new(bus: B, delay: D) -> Self {
        Self { bus, delay }
    }

    /// Run the power-on instruction sequence.
    pub fn init(&mut self) {
        for command in INIT_SEQUENCE {
            self.command(command);
        }
    }

    /// Move the cursor.
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        check_position(row, col)?;
        self.command(CMD_SET_DDRAM_ADDR | (row << 6) | col);
        Ok(())
    }

    /// Decompose into the bus and delay provider.
    pub fn into_parts(self) -> (B, D) {
        (self.bus, self.delay)
    }

    fn command(&mut self, command: u8) {
        self.latch(Register::Instruction, command);
        let settle = match command {
            CMD_CLEAR | CMD_HOME => LONG_EXEC_US,
            _ => SHORT_EXEC_US,
        };
        self.delay.delay_us(settle);
    }

    fn data(&mut self, byte: u8) {
        self.latch(Register::Data, byte);
        self.delay.delay_us(SHORT_EXEC_US);
    }

    fn latch(&mut self, register: Register, byte: u8) {
        self.bus.set_register(register);
        self.bus.set_enable(true);
        self.bus.set_data(byte);
        self.delay.delay_us(ENABLE_PULSE_US);
        // Latched on the falling edge
        self.bus.set_enable(false);
    }
}

impl<B: LcdBus, D: DelayNs> DisplaySink for Hd44780<B, D> {
    fn write_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(row, col)?;
        let room = usize::from(DISPLAY_COLS - col);
        for byte in text.bytes().take(room) {
            self.data(byte);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR);
        Ok(())
    }
}
