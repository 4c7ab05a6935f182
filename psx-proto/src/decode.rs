//! Frame-to-state decoding.

use crate::frame::ControllerFrame;
use crate::types::{AnalogStick, Buttons, ControllerMode, ControllerState, Sticks};

/// Decode a raw frame into a [`ControllerState`].
///
/// Buttons are active-low on the wire and are inverted here. Axis bytes are
/// copied verbatim, and only when the pad reports a non-digital mode.
///
/// Bytes 0 and 2 are not looked at; use [`ControllerFrame::verify`] first if
/// the caller wants the check byte enforced.
#[must_use]
pub fn decode(frame: ControllerFrame) -> ControllerState {
    let bytes = frame.as_bytes();
    let mode = ControllerMode::from_id(frame.mode_id());

    let sticks = match mode {
        ControllerMode::Digital => None,
        ControllerMode::Analog(_) => Some(Sticks {
            left: AnalogStick::new(bytes[7], bytes[8]),
            right: AnalogStick::new(bytes[5], bytes[6]),
        }),
    };

    ControllerState {
        mode,
        buttons: Buttons::from_wire(bytes[3], bytes[4]),
        sticks,
    }
}
