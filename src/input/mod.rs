//! Mouse and gamepad input: button state, cursor position, relative motion
//! and the bounded histories of both, plus per-controller gamepad state.

pub mod button;
pub mod cursor;
pub mod events;
pub mod gamepad;
pub mod history;
pub mod pointer;

pub use button::MouseButton;
pub use cursor::{Cursor, CursorBackend, WinitCursor};
pub use events::{PointerEvent, PointerTranslator};
pub use gamepad::{Gamepad, GamepadAxis, GamepadButton, GamepadEvent, GamepadManager};
pub use pointer::PointerState;

/// Invalid-argument failures of the input API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Cursor placement got something other than a 2-int tuple or two ints.
    InvalidPosition(String),
    /// Visibility got something other than a bool, 0 or 1.
    InvalidVisibility(String),
    /// Button code outside 1..=5.
    InvalidButton(i64),
    /// The windowing library refused the request.
    Backend(String),
    /// Gamepad event for a controller that is not connected.
    UnknownGamepad(u32),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::InvalidPosition(msg) => write!(f, "Invalid mouse position: {}", msg),
            InputError::InvalidVisibility(msg) => write!(f, "Invalid mouse visibility: {}", msg),
            InputError::InvalidButton(code) => {
                write!(f, "Invalid mouse button {}, expected 1 to 5", code)
            }
            InputError::Backend(msg) => write!(f, "Cursor backend error: {}", msg),
            InputError::UnknownGamepad(id) => write!(f, "Gamepad {} is not connected", id),
        }
    }
}

impl std::error::Error for InputError {}
