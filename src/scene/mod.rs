//! Scene management: actors, the world offset and the per-frame draw pass.

pub mod actor;
pub mod canvas;
pub mod world;

pub use actor::{Actor, ActorRef, Sprite};
pub use canvas::Canvas;
pub use world::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

/// Type errors raised by the runtime-checked scene API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A non-actor value was given where an actor was expected.
    NotAnActor(&'static str),
    /// An offset component was not an integer.
    InvalidOffset { axis: Axis, found: &'static str },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::NotAnActor(found) => {
                write!(f, "The world can only track actors, not {}", found)
            }
            SceneError::InvalidOffset { axis, found } => write!(
                f,
                "{} coordinate of the world must be an integer, not {}",
                axis, found
            ),
        }
    }
}

impl std::error::Error for SceneError {}
