//! Cursor visibility, absolute placement and window focus.
//!
//! These are thin wrappers over the windowing library. The [`CursorBackend`]
//! trait is the seam; [`WinitCursor`] is the production implementation.

use std::sync::Arc;

use glam::IVec2;
use winit::dpi::PhysicalPosition;
use winit::window::Window;

use super::InputError;
use crate::value::Value;

pub trait CursorBackend {
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    fn set_position(&mut self, pos: IVec2) -> Result<(), InputError>;
    fn is_focused(&self) -> bool;
}

/// Cursor backend over a `winit` window.
///
/// `winit` has no getter for cursor visibility, so the last value set through
/// this backend is remembered.
pub struct WinitCursor {
    window: Arc<Window>,
    visible: bool,
}

impl WinitCursor {
    pub fn new(window: Arc<Window>, visible: bool) -> Self {
        window.set_cursor_visible(visible);
        Self { window, visible }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl CursorBackend for WinitCursor {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.window.set_cursor_visible(visible);
        self.visible = visible;
    }

    fn set_position(&mut self, pos: IVec2) -> Result<(), InputError> {
        self.window
            .set_cursor_position(PhysicalPosition::new(pos.x, pos.y))
            .map_err(|e| InputError::Backend(e.to_string()))
    }

    fn is_focused(&self) -> bool {
        self.window.has_focus()
    }
}

/// Game-facing cursor controls.
pub struct Cursor<B: CursorBackend> {
    backend: B,
}

impl<B: CursorBackend> Cursor<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn visible(&self) -> bool {
        self.backend.is_visible()
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.backend.set_visible(visible);
    }

    /// Accepts a boolean, or the integers 0 and 1.
    pub fn set_visible_value(&mut self, value: &Value) -> Result<(), InputError> {
        let visible = match value {
            Value::Bool(v) => *v,
            Value::Int(0) => false,
            Value::Int(1) => true,
            other => {
                return Err(InputError::InvalidVisibility(format!(
                    "expected a bool or either 1 or 0, got {}",
                    describe(other)
                )));
            }
        };
        self.set_visible(visible);
        Ok(())
    }

    /// Moves the cursor to an absolute window position.
    ///
    /// Some compositors (Wayland) refuse to warp a visible pointer, so the
    /// cursor is hidden for the duration of the call and shown again if it
    /// was visible before.
    pub fn set_pos(&mut self, pos: IVec2) -> Result<(), InputError> {
        let was_visible = self.backend.is_visible();
        self.backend.set_visible(false);
        let result = self.backend.set_position(pos);
        if was_visible {
            self.backend.set_visible(true);
        }
        if let Err(e) = &result {
            log::warn!("INPUT: Failed to move cursor to {}: {}", pos, e);
        }
        result
    }

    /// Accepts either one tuple of two integers or two integers.
    pub fn set_pos_values(&mut self, args: &[Value]) -> Result<(), InputError> {
        let pos = parse_position(args)?;
        self.set_pos(pos)
    }

    pub fn focused(&self) -> bool {
        self.backend.is_focused()
    }
}

fn parse_position(args: &[Value]) -> Result<IVec2, InputError> {
    let pair: &[Value] = match args {
        [Value::Tuple(items)] => items.as_slice(),
        [_, _] => args,
        _ => &[],
    };
    if let [x, y] = pair
        && let (Some(x), Some(y)) = (x.as_i32(), y.as_i32())
    {
        return Ok(IVec2::new(x, y));
    }

    let received = args.iter().map(describe).collect::<Vec<_>>().join(", ");
    Err(InputError::InvalidPosition(format!(
        "setting the mouse position requires either one tuple with two integers \
         or two integers as individual parameters, got ({received})"
    )))
}

fn describe(value: &Value) -> String {
    match value {
        Value::Tuple(items) => {
            let inner = items.iter().map(describe).collect::<Vec<_>>().join(", ");
            format!("tuple({inner})")
        }
        other => other.type_name().to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{CursorCall, FakeCursor};
    use super::*;

    fn visible_cursor() -> Cursor<FakeCursor> {
        Cursor::new(FakeCursor {
            visible: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_warp_hides_then_restores_visibility() {
        let mut cursor = visible_cursor();
        cursor.set_pos(IVec2::new(10, 20)).unwrap();

        assert_eq!(
            cursor.backend().calls,
            vec![
                CursorCall::Visible(false),
                CursorCall::Warp(IVec2::new(10, 20)),
                CursorCall::Visible(true),
            ]
        );
        assert!(cursor.visible());
    }

    #[test]
    fn test_warp_keeps_hidden_cursor_hidden() {
        let mut cursor = Cursor::new(FakeCursor::default());
        cursor.set_pos(IVec2::new(1, 1)).unwrap();

        assert!(!cursor.visible());
        assert!(!cursor.backend().calls.contains(&CursorCall::Visible(true)));
    }

    #[test]
    fn test_warp_restores_visibility_on_backend_failure() {
        let mut cursor = Cursor::new(FakeCursor {
            visible: true,
            reject_warp: true,
            ..Default::default()
        });
        let result = cursor.set_pos(IVec2::new(1, 1));

        assert!(matches!(result, Err(InputError::Backend(_))));
        assert!(cursor.visible());
    }

    #[test]
    fn test_position_accepts_tuple_or_two_ints() {
        let mut cursor = visible_cursor();
        cursor.set_pos_values(&[Value::from((3, 4))]).unwrap();
        cursor.set_pos_values(&[Value::from(5), Value::from(0)]).unwrap();

        let warps: Vec<_> = cursor
            .backend()
            .calls
            .iter()
            .filter_map(|c| match c {
                CursorCall::Warp(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(warps, vec![IVec2::new(3, 4), IVec2::new(5, 0)]);
    }

    #[test]
    fn test_invalid_position_leaves_cursor_untouched() {
        let mut cursor = visible_cursor();
        let bad_inputs = [
            vec![Value::from((1.5, 2))],
            vec![Value::from(1)],
            vec![Value::from(1), Value::from(2), Value::from(3)],
            vec![Value::from(vec![1, 2, 3])],
            vec![Value::from(true), Value::from(2)],
        ];
        for args in &bad_inputs {
            assert!(matches!(
                cursor.set_pos_values(args),
                Err(InputError::InvalidPosition(_))
            ));
        }
        assert!(cursor.backend().calls.is_empty());
        assert!(cursor.visible());
    }

    #[test]
    fn test_visibility_accepts_bool_and_zero_one() {
        let mut cursor = visible_cursor();
        cursor.set_visible_value(&Value::from(0)).unwrap();
        assert!(!cursor.visible());
        cursor.set_visible_value(&Value::from(true)).unwrap();
        assert!(cursor.visible());

        let err = cursor.set_visible_value(&Value::from(2)).unwrap_err();
        assert!(matches!(err, InputError::InvalidVisibility(_)));
        assert!(cursor.set_visible_value(&Value::from("yes")).is_err());
        assert!(cursor.visible());
    }

    #[test]
    fn test_focus_is_delegated() {
        let cursor = Cursor::new(FakeCursor {
            focused: true,
            ..Default::default()
        });
        assert!(cursor.focused());
    }
}
