//! Two-line text rendering of a [`ControllerState`].
//!
//! ```text
//! [L1 L2 R1 R2][L3 R3][T S X O]     -> "[0100][00][1000]"
//! digital: up left down right       -> "1 0 0 0         "
//! analog:  LX LY RX RY              -> "128 127  10 255 "
//! ```
//!
//! Flags print as `1` when pressed. Every line is exactly
//! [`LINE_WIDTH`] characters so it fully overwrites the previous frame.

use core::fmt::Write;

use heapless::String;
use psx_proto::{Buttons, ControllerState};

use crate::display::DISPLAY_COLS;

/// Characters per rendered line.
pub const LINE_WIDTH: usize = DISPLAY_COLS as usize;

/// One display line.
pub type Line = String<LINE_WIDTH>;

/// Title shown on the splash screen.
pub const SPLASH_TITLE: &str = "PSX Pad Reader";

#[inline]
fn flag(state: &ControllerState, button: Buttons) -> u8 {
    u8::from(state.is_pressed(button))
}

/// Render a state into the two display lines.
pub fn render(state: &ControllerState) -> Result<[Line; 2], core::fmt::Error> {
    let mut top = Line::new();
    write!(
        top,
        "[{}{}{}{}][{}{}][{}{}{}{}]",
        flag(state, Buttons::L1),
        flag(state, Buttons::L2),
        flag(state, Buttons::R1),
        flag(state, Buttons::R2),
        flag(state, Buttons::L3),
        flag(state, Buttons::R3),
        flag(state, Buttons::TRIANGLE),
        flag(state, Buttons::SQUARE),
        flag(state, Buttons::CROSS),
        flag(state, Buttons::CIRCLE),
    )?;

    let mut bottom = Line::new();
    match state.sticks {
        Some(sticks) => write!(
            bottom,
            "{:3} {:3} {:3} {:3} ",
            sticks.left.x, sticks.left.y, sticks.right.x, sticks.right.y
        )?,
        None => write!(
            bottom,
            "{} {} {} {}{:9}",
            flag(state, Buttons::UP),
            flag(state, Buttons::LEFT),
            flag(state, Buttons::DOWN),
            flag(state, Buttons::RIGHT),
            ""
        )?,
    }

    Ok([top, bottom])
}

/// Render the splash screen: title and crate version, centered.
pub fn splash() -> Result<[Line; 2], core::fmt::Error> {
    let mut title = Line::new();
    write!(title, "{:^16}", SPLASH_TITLE)?;

    let mut version = Line::new();
    let mut tag: String<LINE_WIDTH> = String::new();
    write!(tag, "v{}", env!("CARGO_PKG_VERSION"))?;
    write!(version, "{:^16}", tag.as_str())?;

    Ok([title, version])
}

#[cfg(test)]
mod tests {
    use super::*;
    use psx_proto::{AnalogStick, ControllerMode, Sticks, ANALOG_MODE_ID};

    fn analog(buttons: Buttons, left: (u8, u8), right: (u8, u8)) -> ControllerState {
        ControllerState {
            mode: ControllerMode::Analog(ANALOG_MODE_ID),
            buttons,
            sticks: Some(Sticks {
                left: AnalogStick::new(left.0, left.1),
                right: AnalogStick::new(right.0, right.1),
            }),
        }
    }

    #[test]
    fn test_released_digital_pad() {
        let [top, bottom] = render(&ControllerState::released()).unwrap();
        assert_eq!(top.as_str(), "[0000][00][0000]");
        assert_eq!(bottom.as_str(), "0 0 0 0         ");
    }

    #[test]
    fn test_shoulder_and_face_order() {
        let state = ControllerState {
            buttons: Buttons::L2 | Buttons::R3 | Buttons::SQUARE | Buttons::CIRCLE,
            ..ControllerState::released()
        };
        let [top, _] = render(&state).unwrap();
        assert_eq!(top.as_str(), "[0100][01][0101]");
    }

    #[test]
    fn test_digital_directions() {
        let state = ControllerState {
            buttons: Buttons::UP | Buttons::RIGHT,
            ..ControllerState::released()
        };
        let [_, bottom] = render(&state).unwrap();
        assert_eq!(bottom.as_str(), "1 0 0 1         ");
    }

    #[test]
    fn test_analog_axes_right_aligned() {
        let state = analog(Buttons::NONE, (128, 7), (10, 255));
        let [_, bottom] = render(&state).unwrap();
        assert_eq!(bottom.as_str(), "128   7  10 255 ");
    }

    #[test]
    fn test_lines_fill_display_width() {
        let state = analog(Buttons::L1 | Buttons::CROSS, (0, 0), (0, 0));
        for line in render(&state).unwrap() {
            assert_eq!(line.len(), LINE_WIDTH);
        }
    }

    #[test]
    fn test_splash_is_centered() {
        let [title, version] = splash().unwrap();
        assert_eq!(title.as_str(), " PSX Pad Reader ");
        assert_eq!(version.len(), LINE_WIDTH);
        assert!(version.trim().starts_with('v'));
    }
}
