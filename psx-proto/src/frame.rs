//! Raw polling frame and protocol constants.

/// Number of bytes exchanged in one polling transaction.
pub const FRAME_LEN: usize = 9;

/// Start marker addressing the controller port.
pub const START_BYTE: u8 = 0x01;

/// "Read buttons" poll command.
pub const POLL_COMMAND: u8 = 0x42;

/// Placeholder clocked out while the device sends its payload.
pub const IDLE_BYTE: u8 = 0xFF;

/// Fixed command sequence sent for every poll.
///
/// Always nine bytes long, which covers the six-byte payload of analog pads;
/// digital pads simply return idle bytes for the tail.
pub const COMMAND_SEQUENCE: [u8; FRAME_LEN] = [
    START_BYTE,
    POLL_COMMAND,
    IDLE_BYTE,
    IDLE_BYTE,
    IDLE_BYTE,
    IDLE_BYTE,
    IDLE_BYTE,
    IDLE_BYTE,
    IDLE_BYTE,
];

/// Mode byte reported by a pad in digital mode.
pub const DIGITAL_MODE_ID: u8 = 0x41;

/// Mode byte reported by a DualShock in analog (red LED) mode.
pub const ANALOG_MODE_ID: u8 = 0x73;

/// Value every pad returns in byte 2.
pub const CHECK_BYTE: u8 = 0x5A;

/// Frame validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Byte 2 did not carry [`CHECK_BYTE`]; holds the value received.
    BadCheckByte(u8),
}

/// The nine bytes received during one transaction.
///
/// | Byte | Content                            |
/// |------|------------------------------------|
/// | 0    | response to the start marker       |
/// | 1    | mode / version                     |
/// | 2    | check value (`0x5A`)               |
/// | 3-4  | buttons, active-low                |
/// | 5-6  | right stick X/Y (analog only)      |
/// | 7-8  | left stick X/Y (analog only)       |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerFrame([u8; FRAME_LEN]);

impl ControllerFrame {
    /// Wrap raw received bytes.
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw bytes, in exchange order.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Reported mode byte.
    #[inline]
    #[must_use]
    pub const fn mode_id(&self) -> u8 {
        self.0[1]
    }

    /// Check byte as received.
    #[inline]
    #[must_use]
    pub const fn check_byte(&self) -> u8 {
        self.0[2]
    }

    /// Verify the check byte.
    ///
    /// Byte 0 is not inspected: the pad leaves the data line floating while
    /// it decodes the start marker, so its value is undefined.
    pub fn verify(&self) -> Result<(), FrameError> {
        match self.check_byte() {
            CHECK_BYTE => Ok(()),
            other => Err(FrameError::BadCheckByte(other)),
        }
    }
}

impl From<[u8; FRAME_LEN]> for ControllerFrame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Self::new(bytes)
    }
}
