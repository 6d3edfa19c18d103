//! Per-game state shared by the frame loop and game code.
//!
//! One `Context` exists per running game. The frame loop feeds it window
//! events, lets the game update, then calls [`Context::render`], which draws
//! the scene and closes the frame.

use glam::IVec2;
use image::{Rgba, RgbaImage};
use winit::event::WindowEvent;

use crate::config::Config;
use crate::input::{
    Cursor, CursorBackend, GamepadEvent, GamepadManager, InputError, PointerEvent, PointerState,
    PointerTranslator,
};
use crate::scene::Scene;

pub struct Context<B: CursorBackend> {
    pub pointer: PointerState,
    pub cursor: Cursor<B>,
    pub gamepads: GamepadManager,
    pub scene: Scene,
    screen: RgbaImage,
    clear_color: Rgba<u8>,
    translator: PointerTranslator,
    frame: u64,
}

impl<B: CursorBackend> Context<B> {
    pub fn new(config: &Config, backend: B) -> Self {
        let mut cursor = Cursor::new(backend);
        if cursor.visible() != config.pointer.visible {
            cursor.set_visible(config.pointer.visible);
        }

        Self {
            pointer: PointerState::with_history(
                config.pointer.recent_pos_max,
                config.pointer.recent_rel_max,
            ),
            cursor,
            gamepads: GamepadManager::with_deadzone(config.gamepad.deadzone),
            scene: Scene::with_offset(config.world.x, config.world.y),
            screen: RgbaImage::new(config.window.width, config.window.height),
            clear_color: Rgba(config.window.clear_color),
            translator: PointerTranslator::new(),
            frame: 0,
        }
    }

    /// Translates a window event and applies it to the pointer state.
    /// Returns the pointer event, if the window event was one.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        let pointer_event = self.translator.translate(event)?;
        self.pointer.apply(&pointer_event);
        log::trace!("INPUT: {:?}", pointer_event);
        Some(pointer_event)
    }

    /// Applies an event from the gamepad device library. `winit` does not
    /// report controllers, so the game forwards these itself.
    pub fn handle_gamepad_event(&mut self, event: &GamepadEvent) -> Result<(), InputError> {
        log::trace!("INPUT: {:?}", event);
        self.gamepads.apply(event)
    }

    /// Draws the scene onto the screen and ends the frame.
    ///
    /// Relative motion is reset afterwards, so [`PointerState::rel`] only
    /// ever reports motion from within the current frame.
    pub fn render(&mut self) -> &RgbaImage {
        self.clear();
        self.scene.draw(&mut self.screen);
        self.pointer.reset_relative();
        self.frame += 1;
        &self.screen
    }

    pub fn screen(&self) -> &RgbaImage {
        &self.screen
    }

    pub fn screen_size(&self) -> IVec2 {
        let (w, h) = self.screen.dimensions();
        IVec2::new(w as i32, h as i32)
    }

    /// Resizes the screen surface. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.screen.dimensions() != (width, height) {
            log::debug!("APP: Screen resized to {}x{}", width, height);
            self.screen = RgbaImage::new(width, height);
        }
    }

    /// Number of frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn clear(&mut self) {
        for pixel in self.screen.pixels_mut() {
            *pixel = self.clear_color;
        }
    }
}
