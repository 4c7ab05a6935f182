//! HD44780 character LCD on RP2040 GPIO.
//!
//! # Pins
//!
//! | Function | GPIO  | Description                  |
//! |----------|-------|------------------------------|
//! | RS       | 7     | register select              |
//! | RW       | 8     | held low, write-only         |
//! | E        | 9     | enable, latches on fall      |
//! | D0-D7    | 10-17 | data bus, D0 on GPIO 10      |

use embassy_rp::gpio::{Level, Output};
use embassy_time::Delay;
use pad_core::{Hd44780, LcdBus, Register};

/// 8-bit parallel LCD bus.
pub struct GpioLcdBus<'d> {
    rs: Output<'d>,
    // Kept so the line stays driven low
    _rw: Output<'d>,
    enable: Output<'d>,
    data: [Output<'d>; 8],
}

impl<'d> GpioLcdBus<'d> {
    /// Create the bus; `data[0]` is D0.
    #[must_use]
    pub fn new(rs: Output<'d>, mut rw: Output<'d>, enable: Output<'d>, data: [Output<'d>; 8]) -> Self {
        rw.set_low();
        Self {
            rs,
            _rw: rw,
            enable,
            data,
        }
    }
}

impl LcdBus for GpioLcdBus<'_> {
    fn set_register(&mut self, register: Register) {
        self.rs.set_level(Level::from(register == Register::Data));
    }

    fn set_enable(&mut self, high: bool) {
        self.enable.set_level(Level::from(high));
    }

    fn set_data(&mut self, byte: u8) {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_level(Level::from(byte & (1 << bit) != 0));
        }
    }
}

/// The display as used by the firmware.
pub type Lcd<'d> = Hd44780<GpioLcdBus<'d>, Delay>;

/// Create and initialize the display.
pub fn init_lcd(bus: GpioLcdBus<'_>) -> Lcd<'_> {
    let mut lcd = Hd44780::new(bus, Delay);
    lcd.init();
    lcd
}
