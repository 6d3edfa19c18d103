//! Mouse button identifiers.

use super::InputError;

/// Mouse buttons, numbered the way the framework exposes them to games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left = 1,
    Middle = 2,
    Right = 3,
    WheelUp = 4,
    WheelDown = 5,
}

impl MouseButton {
    pub const LEFT: u8 = 1;
    pub const MIDDLE: u8 = 2;
    pub const RIGHT: u8 = 3;
    pub const WHEEL_UP: u8 = 4;
    pub const WHEEL_DOWN: u8 = 5;

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Index into the pressed-state array. Wheel "buttons" are momentary and
    /// have no held state.
    pub fn slot(self) -> Option<usize> {
        match self {
            MouseButton::Left => Some(0),
            MouseButton::Middle => Some(1),
            MouseButton::Right => Some(2),
            MouseButton::WheelUp | MouseButton::WheelDown => None,
        }
    }

    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Middle => Some(MouseButton::Middle),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            _ => None,
        }
    }
}

impl TryFrom<i64> for MouseButton {
    type Error = InputError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(MouseButton::Left),
            2 => Ok(MouseButton::Middle),
            3 => Ok(MouseButton::Right),
            4 => Ok(MouseButton::WheelUp),
            5 => Ok(MouseButton::WheelDown),
            other => Err(InputError::InvalidButton(other)),
        }
    }
}

impl TryFrom<u8> for MouseButton {
    type Error = InputError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        MouseButton::try_from(i64::from(code))
    }
}

impl std::fmt::Display for MouseButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MouseButton::Left => write!(f, "LEFT"),
            MouseButton::Middle => write!(f, "MIDDLE"),
            MouseButton::Right => write!(f, "RIGHT"),
            MouseButton::WheelUp => write!(f, "WHEEL_UP"),
            MouseButton::WheelDown => write!(f, "WHEEL_DOWN"),
        }
    }
}
