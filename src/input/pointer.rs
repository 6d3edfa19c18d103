//! Mouse state aggregated from pointer events.
//!
//! The write side (`press`, `release`, `set_position`, `add_relative`,
//! `reset_relative`) is driven by the event dispatcher and the frame loop.
//! Everything else is read by game code.

use glam::IVec2;

use super::InputError;
use super::button::MouseButton;
use super::events::PointerEvent;
use super::history::{DEFAULT_HISTORY_LEN, RecentHistory};

#[derive(Debug, Clone)]
pub struct PointerState {
    pressed: [bool; 3],
    position: Option<IVec2>,
    relative: IVec2,
    last_called_pos: IVec2,
    last_called_rel: IVec2,
    recent_pos: RecentHistory<IVec2>,
    recent_rel: RecentHistory<IVec2>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::with_history(DEFAULT_HISTORY_LEN, DEFAULT_HISTORY_LEN)
    }

    pub fn with_history(recent_pos_max: usize, recent_rel_max: usize) -> Self {
        Self {
            pressed: [false; 3],
            position: None,
            relative: IVec2::ZERO,
            last_called_pos: IVec2::ZERO,
            last_called_rel: IVec2::ZERO,
            recent_pos: RecentHistory::new(recent_pos_max),
            recent_rel: RecentHistory::new(recent_rel_max),
        }
    }

    // --- Event side ---

    pub fn press(&mut self, button: MouseButton) {
        if let Some(slot) = button.slot() {
            self.pressed[slot] = true;
        }
    }

    pub fn release(&mut self, button: MouseButton) {
        if let Some(slot) = button.slot() {
            self.pressed[slot] = false;
        }
    }

    /// Raw-code variant of [`press`](Self::press). Codes outside 1..=5 are
    /// rejected.
    pub fn press_code(&mut self, code: i64) -> Result<(), InputError> {
        let button = MouseButton::try_from(code)?;
        self.press(button);
        Ok(())
    }

    pub fn release_code(&mut self, code: i64) -> Result<(), InputError> {
        let button = MouseButton::try_from(code)?;
        self.release(button);
        Ok(())
    }

    pub fn set_position(&mut self, pos: IVec2) {
        self.position = Some(pos);
        self.recent_pos.push(pos);
    }

    pub fn add_relative(&mut self, delta: IVec2) {
        self.relative += delta;
        self.last_called_rel += delta;
        self.recent_rel.push(delta);
    }

    /// Called by the frame loop once per frame, after game code had its
    /// chance to read [`rel`](Self::rel).
    pub fn reset_relative(&mut self) {
        self.relative = IVec2::ZERO;
    }

    pub fn apply(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Pressed(button) => self.press(button),
            PointerEvent::Released(button) => self.release(button),
            PointerEvent::Moved { pos, rel } => {
                self.set_position(pos);
                self.add_relative(rel);
            }
        }
    }

    // --- Queries ---

    /// Held state of LEFT, MIDDLE and RIGHT, in that order.
    pub fn pressed(&self) -> [bool; 3] {
        self.pressed
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        button.slot().is_some_and(|slot| self.pressed[slot])
    }

    pub fn pressed_left(&self) -> bool {
        self.pressed[0]
    }

    pub fn pressed_middle(&self) -> bool {
        self.pressed[1]
    }

    pub fn pressed_right(&self) -> bool {
        self.pressed[2]
    }

    /// Last known cursor position, `None` until the first motion event.
    pub fn pos(&self) -> Option<IVec2> {
        self.position
    }

    /// Motion accumulated during the current frame.
    pub fn rel(&self) -> IVec2 {
        self.relative
    }

    /// Returns the position seen by the previous call, then remembers the
    /// current one for the next call.
    pub fn last_called_pos(&mut self) -> IVec2 {
        let previous = self.last_called_pos;
        self.last_called_pos = self.position.unwrap_or(IVec2::ZERO);
        previous
    }

    /// Returns the motion accumulated since the previous call and clears it.
    pub fn last_called_rel(&mut self) -> IVec2 {
        std::mem::take(&mut self.last_called_rel)
    }

    pub fn recent_pos(&self) -> Vec<IVec2> {
        self.recent_pos.snapshot()
    }

    pub fn recent_rel(&self) -> Vec<IVec2> {
        self.recent_rel.snapshot()
    }

    pub fn recent_pos_max(&self) -> usize {
        self.recent_pos.max_len()
    }

    pub fn recent_rel_max(&self) -> usize {
        self.recent_rel.max_len()
    }

    pub fn set_recent_pos_max(&mut self, max_len: usize) {
        self.recent_pos.set_max_len(max_len);
    }

    pub fn set_recent_rel_max(&mut self, max_len: usize) {
        self.recent_rel.set_max_len(max_len);
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}
