//! Decoded controller types: Buttons, AnalogStick, Sticks, ControllerMode, ControllerState.

use core::ops::BitOr;

use crate::frame::DIGITAL_MODE_ID;

/// Pressed buttons as a bitfield.
///
/// Bit positions match the wire layout: bits 0-7 come from frame byte 3 and
/// bits 8-15 from frame byte 4, so a raw frame converts with a single
/// inversion (see [`Buttons::from_wire`]).
///
/// # Example
///
/// ```
/// use psx_proto::Buttons;
///
/// let buttons = Buttons::CROSS | Buttons::UP;
/// assert!(buttons.contains(Buttons::CROSS));
/// assert!(!buttons.contains(Buttons::CIRCLE));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    // Byte 3
    pub const SELECT: Self = Self(1 << 0);
    pub const L3: Self = Self(1 << 1); // Left stick press
    pub const R3: Self = Self(1 << 2); // Right stick press
    pub const START: Self = Self(1 << 3);
    pub const UP: Self = Self(1 << 4);
    pub const RIGHT: Self = Self(1 << 5);
    pub const DOWN: Self = Self(1 << 6);
    pub const LEFT: Self = Self(1 << 7);
    // Byte 4
    pub const L2: Self = Self(1 << 8);
    pub const R2: Self = Self(1 << 9);
    pub const L1: Self = Self(1 << 10);
    pub const R1: Self = Self(1 << 11);
    pub const TRIANGLE: Self = Self(1 << 12);
    pub const CIRCLE: Self = Self(1 << 13);
    pub const CROSS: Self = Self(1 << 14);
    pub const SQUARE: Self = Self(1 << 15);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Build from the two active-low button bytes of a frame.
    #[inline]
    #[must_use]
    pub const fn from_wire(low: u8, high: u8) -> Self {
        Self(!u16::from_le_bytes([low, high]))
    }

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Check if the given button is pressed (alias for contains).
    #[inline]
    #[must_use]
    pub const fn is_pressed(self, button: Buttons) -> bool {
        self.contains(button)
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// One analog stick, raw 8-bit magnitudes as sent by the pad.
///
/// Range: 0-255, roughly 0x80 at rest.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogStick {
    pub x: u8,
    pub y: u8,
}

impl AnalogStick {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Both analog sticks.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sticks {
    pub left: AnalogStick,
    pub right: AnalogStick,
}

/// Response format reported in frame byte 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerMode {
    /// Buttons only; axis bytes carry no data.
    Digital,
    /// Any other reported mode, treated as carrying axis data.
    Analog(u8),
}

impl ControllerMode {
    /// Classify a reported mode byte.
    #[inline]
    #[must_use]
    pub const fn from_id(id: u8) -> Self {
        if id == DIGITAL_MODE_ID {
            Self::Digital
        } else {
            Self::Analog(id)
        }
    }

    /// The mode byte as reported.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Digital => DIGITAL_MODE_ID,
            Self::Analog(id) => id,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_analog(self) -> bool {
        matches!(self, Self::Analog(_))
    }
}

/// Decoded controller snapshot from one poll.
///
/// `sticks` is `None` in digital mode: the pad does not drive the axis bytes
/// then, so there is nothing meaningful to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState {
    pub mode: ControllerMode,
    pub buttons: Buttons,
    pub sticks: Option<Sticks>,
}

impl ControllerState {
    /// Digital pad with nothing pressed.
    #[must_use]
    pub const fn released() -> Self {
        Self {
            mode: ControllerMode::Digital,
            buttons: Buttons::NONE,
            sticks: None,
        }
    }

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn is_pressed(&self, button: Buttons) -> bool {
        self.buttons.is_pressed(button)
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::released()
    }
}
