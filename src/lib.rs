//! Pointer state and scene layer for a beginner-friendly 2D game framework.
//!
//! - [`input`]: mouse buttons, position, relative motion and their histories,
//!   plus cursor visibility/placement.
//! - [`scene`]: the world offset and the set of actors drawn each frame.
//! - [`context`] and [`app`]: the per-game context and the `winit` frame loop
//!   that drives it.

pub mod app;
pub mod config;
pub mod context;
pub mod input;
pub mod scene;
pub mod value;

pub use app::{App, Game};
pub use config::Config;
pub use context::Context;
pub use value::Value;
