use glam::IVec2;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};

use super::button::MouseButton;

/// Pointer events in the framework's own terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Pressed(MouseButton),
    Released(MouseButton),
    Moved { pos: IVec2, rel: IVec2 },
}

/// Turns raw `winit` window events into [`PointerEvent`]s.
///
/// `winit` reports absolute cursor positions only, so the relative motion of
/// each move is derived from the previous position.
#[derive(Debug, Default)]
pub struct PointerTranslator {
    last_pos: Option<IVec2>,
}

impl PointerTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let button = MouseButton::from_winit(*button)?;
                Some(match state {
                    ElementState::Pressed => PointerEvent::Pressed(button),
                    ElementState::Released => PointerEvent::Released(button),
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => f64::from(*y),
                    MouseScrollDelta::PixelDelta(p) => p.y,
                };
                if dy > 0.0 {
                    Some(PointerEvent::Pressed(MouseButton::WheelUp))
                } else if dy < 0.0 {
                    Some(PointerEvent::Pressed(MouseButton::WheelDown))
                } else {
                    None
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = IVec2::new(position.x.round() as i32, position.y.round() as i32);
                Some(self.moved_to(pos))
            }
            WindowEvent::CursorLeft { .. } => {
                // Re-entry would otherwise produce one large jump.
                self.last_pos = None;
                None
            }
            _ => None,
        }
    }

    fn moved_to(&mut self, pos: IVec2) -> PointerEvent {
        let rel = self.last_pos.map_or(IVec2::ZERO, |last| pos - last);
        self.last_pos = Some(pos);
        PointerEvent::Moved { pos, rel }
    }
}
