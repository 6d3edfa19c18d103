//! Demo: a square follows the cursor, dragging with the right button pans the
//! world, and the wheel flips the marker. Nothing is drawn to the window
//! itself; a middle click saves the next composed frame to `rzero-frame.png`.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use glam::IVec2;
use image::{Rgba, RgbaImage};

use rzero::context::Context;
use rzero::input::{MouseButton, PointerEvent, WinitCursor};
use rzero::scene::{ActorRef, Sprite};
use rzero::{App, Config, Game};
use winit::window::Window;

const FRAME_PATH: &str = "rzero-frame.png";

struct Demo {
    marker: Rc<RefCell<Sprite>>,
    save_next_frame: bool,
}

impl Demo {
    fn new() -> Self {
        let mut image = RgbaImage::from_pixel(24, 24, Rgba([80, 160, 255, 255]));
        for y in 0..24 {
            image.put_pixel(0, y, Rgba([255, 255, 255, 255]));
        }
        Self {
            marker: Rc::new(RefCell::new(Sprite::new(image, IVec2::ZERO))),
            save_next_frame: false,
        }
    }
}

impl Game for Demo {
    fn setup(&mut self, ctx: &mut Context<WinitCursor>) {
        ctx.scene.add_actor(ActorRef::from(self.marker.clone()));
        for i in 0..8 {
            let tile = Sprite::filled(16, 16, Rgba([60, 60, 60, 255]), IVec2::new(i * 48, 200));
            ctx.scene.add_actor(ActorRef::new(tile));
        }
        let center = ctx.screen_size() / 2;
        if let Err(e) = ctx.cursor.set_pos(center) {
            log::warn!("DEMO: Could not center the cursor: {}", e);
        }
    }

    fn on_pointer(&mut self, _ctx: &mut Context<WinitCursor>, event: &PointerEvent) {
        match event {
            PointerEvent::Pressed(MouseButton::WheelUp | MouseButton::WheelDown) => {
                let mut marker = self.marker.borrow_mut();
                marker.flip_x = !marker.flip_x;
            }
            PointerEvent::Pressed(MouseButton::Middle) => self.save_next_frame = true,
            _ => {}
        }
    }

    fn update(&mut self, ctx: &mut Context<WinitCursor>) {
        if ctx.pointer.pressed_right() {
            let rel = ctx.pointer.rel();
            let offset = ctx.scene.offset();
            ctx.scene.set_offset(offset.x + rel.x, offset.y - rel.y);
        }

        if let Some(pos) = ctx.pointer.pos() {
            // Screen to world: undo the offset the draw pass applies.
            let offset = ctx.scene.offset();
            let mut marker = self.marker.borrow_mut();
            marker.pos = IVec2::new(pos.x - offset.x, pos.y + offset.y) - IVec2::splat(12);
        }

        if ctx.frame() % 120 == 0 {
            log::info!(
                "DEMO: pos={:?} pressed={:?} moved={} focused={}",
                ctx.pointer.pos(),
                ctx.pointer.pressed(),
                ctx.pointer.last_called_rel(),
                ctx.cursor.focused()
            );
        }
    }

    fn present(&mut self, _window: &Window, frame: &RgbaImage) {
        self.save_if_requested(frame, Path::new(FRAME_PATH));
    }
}

impl Demo {
    /// Writes `frame` to `path` once per middle click. Returns whether it
    /// was written.
    fn save_if_requested(&mut self, frame: &RgbaImage, path: &Path) -> bool {
        if !std::mem::take(&mut self.save_next_frame) {
            return false;
        }
        match frame.save(path) {
            Ok(()) => {
                log::info!("DEMO: Frame saved to {:?}", path);
                true
            }
            Err(e) => {
                log::error!("DEMO: Failed to save frame: {}", e);
                false
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("MAIN: Booting rzero demo...");
    let config = Config::load_or_default(Path::new("rzero.toml"));

    if let Err(e) = App::run(config, Demo::new()) {
        log::error!("MAIN: Event loop failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_click_saves_next_frame_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let frame = RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 255]));
        let mut demo = Demo::new();

        assert!(!demo.save_if_requested(&frame, &path));
        assert!(!path.exists());

        demo.save_next_frame = true;
        assert!(demo.save_if_requested(&frame, &path));
        let saved = image::open(&path).unwrap().to_rgba8();
        assert_eq!(saved, frame);

        assert!(!demo.save_if_requested(&frame, &path));
    }
}
