//! Display sink trait and error types.

/// Rows on the character display.
pub const DISPLAY_ROWS: u8 = 2;

/// Columns on the character display.
pub const DISPLAY_COLS: u8 = 16;

/// Error type for display operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Row or column outside the display.
    OutOfBounds,
    /// Text did not fit its line buffer.
    Format,
}

impl From<core::fmt::Error> for DisplayError {
    fn from(_: core::fmt::Error) -> Self {
        DisplayError::Format
    }
}

/// Trait for character display sinks.
///
/// Abstracts the text display the pad state is shown on, so the polling
/// loop can be tested without hardware.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait DisplaySink {
    /// Write text starting at a position.
    ///
    /// - `row`: Row number (0-1)
    /// - `col`: Column number (0-15)
    ///
    /// Text running past the last column is cut off.
    fn write_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Blank the whole display.
    fn clear(&mut self) -> Result<(), DisplayError>;
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn write_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        (**self).write_text(row, col, text)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }
}

/// Check a cursor position against the display geometry.
#[inline]
pub fn check_position(row: u8, col: u8) -> Result<(), DisplayError> {
    if row < DISPLAY_ROWS && col < DISPLAY_COLS {
        Ok(())
    } else {
        Err(DisplayError::OutOfBounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_position() {
        assert!(check_position(0, 0).is_ok());
        assert!(check_position(1, 15).is_ok());
        assert_eq!(check_position(2, 0), Err(DisplayError::OutOfBounds));
        assert_eq!(check_position(0, 16), Err(DisplayError::OutOfBounds));
    }
}
