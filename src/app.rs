//! Window and frame loop.
//!
//! Bridges `winit` to a [`Context`] and a user [`Game`]. Per frame the order
//! is: pointer events, [`Game::update`], scene draw, relative-motion reset,
//! [`Game::present`].

use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::Config;
use crate::context::Context;
use crate::input::{PointerEvent, WinitCursor};

/// Hooks a game implements. Everything but `update` is optional.
pub trait Game {
    /// Called once, after the window and context exist.
    fn setup(&mut self, _ctx: &mut Context<WinitCursor>) {}

    /// Called for every pointer event, after the pointer state was updated.
    fn on_pointer(&mut self, _ctx: &mut Context<WinitCursor>, _event: &PointerEvent) {}

    /// Called once per frame, before the scene is drawn.
    fn update(&mut self, ctx: &mut Context<WinitCursor>);

    /// Receives the composed frame. Presenting it is up to the display layer.
    fn present(&mut self, _window: &Window, _frame: &image::RgbaImage) {}
}

pub struct App<G: Game> {
    config: Config,
    game: G,
    window: Option<Arc<Window>>,
    context: Option<Context<WinitCursor>>,
}

impl<G: Game> App<G> {
    pub fn new(config: Config, game: G) -> Self {
        Self {
            config,
            game,
            window: None,
            context: None,
        }
    }

    /// Runs the event loop until the window is closed (blocking).
    pub fn run(config: Config, game: G) -> Result<(), EventLoopError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(config, game);
        event_loop.run_app(&mut app)
    }
}

impl<G: Game> ApplicationHandler for App<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("APP: Creating window...");
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("APP: Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let cursor = WinitCursor::new(window.clone(), self.config.pointer.visible);
        let mut context = Context::new(&self.config, cursor);
        self.game.setup(&mut context);

        self.context = Some(context);
        self.window = Some(window.clone());
        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(window), Some(context)) = (self.window.as_ref(), self.context.as_mut()) else {
            return;
        };

        if let Some(pointer_event) = context.handle_window_event(&event) {
            self.game.on_pointer(context, &pointer_event);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("APP: Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                context.resize(size.width, size.height);
            }
            WindowEvent::Focused(focused) => {
                log::debug!("APP: Focus {}", if focused { "gained" } else { "lost" });
            }
            WindowEvent::RedrawRequested => {
                self.game.update(context);
                let frame = context.render();
                self.game.present(window, frame);
                window.request_redraw();
            }
            _ => {}
        }
    }
}
