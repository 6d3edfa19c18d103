//! The world: a camera offset and the set of actors drawn every frame.

use std::collections::HashSet;

use glam::IVec2;

use super::actor::ActorRef;
use super::canvas::Canvas;
use super::{Axis, SceneError};
use crate::value::Value;

#[derive(Debug, Default)]
pub struct Scene {
    offset: IVec2,
    actors: HashSet<ActorRef>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(x: i32, y: i32) -> Self {
        Self {
            offset: IVec2::new(x, y),
            actors: HashSet::new(),
        }
    }

    // --- Camera offset ---

    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// Horizontal camera position. Larger values move the camera right.
    pub fn x(&self) -> i32 {
        self.offset.x
    }

    /// Vertical camera position. Larger values move the camera up.
    pub fn y(&self) -> i32 {
        self.offset.y
    }

    pub fn set_offset(&mut self, x: i32, y: i32) {
        self.offset = IVec2::new(x, y);
    }

    pub fn set_x(&mut self, x: i32) {
        self.offset.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.offset.y = y;
    }

    /// Runtime-checked offset setter. Both components must be exact integers;
    /// nothing is changed otherwise.
    pub fn set_offset_values(&mut self, x: &Value, y: &Value) -> Result<(), SceneError> {
        let x = Self::coordinate(Axis::X, x)?;
        let y = Self::coordinate(Axis::Y, y)?;
        self.set_offset(x, y);
        Ok(())
    }

    fn coordinate(axis: Axis, value: &Value) -> Result<i32, SceneError> {
        value.as_i32().ok_or(SceneError::InvalidOffset {
            axis,
            found: value.type_name(),
        })
    }

    // --- Membership ---

    /// Snapshot of the current actors, in no particular order.
    pub fn actors(&self) -> Vec<ActorRef> {
        self.actors.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn contains(&self, actor: &ActorRef) -> bool {
        self.actors.contains(actor)
    }

    /// Adds actors, warning about (and skipping) ones already present.
    /// Returns how many were actually added.
    pub fn add_actors<I>(&mut self, actors: I) -> usize
    where
        I: IntoIterator<Item = ActorRef>,
    {
        let mut added = 0;
        for actor in actors {
            if self.actors.insert(actor) {
                added += 1;
            } else {
                log::warn!("SCENE: Actor is already part of the world.");
            }
        }
        added
    }

    pub fn add_actor(&mut self, actor: ActorRef) -> bool {
        self.add_actors([actor]) == 1
    }

    /// Removes actors, warning about ones that are not present.
    /// Returns how many were actually removed.
    pub fn remove_actors<'a, I>(&mut self, actors: I) -> usize
    where
        I: IntoIterator<Item = &'a ActorRef>,
    {
        let mut removed = 0;
        for actor in actors {
            if self.actors.remove(actor) {
                removed += 1;
            } else {
                log::warn!("SCENE: Actor is not part of the world, thus can't be removed.");
            }
        }
        removed
    }

    pub fn remove_actor(&mut self, actor: &ActorRef) -> bool {
        self.remove_actors([actor]) == 1
    }

    /// Runtime-checked [`add_actors`](Self::add_actors).
    ///
    /// Values are processed in order; the first non-actor stops the batch
    /// with an error, leaving earlier additions in place.
    pub fn add_actor_values(&mut self, values: &[Value]) -> Result<usize, SceneError> {
        let mut added = 0;
        for value in values {
            let actor = value
                .as_actor()
                .ok_or(SceneError::NotAnActor(value.type_name()))?;
            added += self.add_actors([actor.clone()]);
        }
        Ok(added)
    }

    /// Runtime-checked [`remove_actors`](Self::remove_actors), with the same
    /// abort-on-first-error policy as [`add_actor_values`](Self::add_actor_values).
    pub fn remove_actor_values(&mut self, values: &[Value]) -> Result<usize, SceneError> {
        let mut removed = 0;
        for value in values {
            let actor = value
                .as_actor()
                .ok_or(SceneError::NotAnActor(value.type_name()))?;
            removed += self.remove_actors([actor]);
        }
        Ok(removed)
    }

    // --- Drawing ---

    /// Composites every actor onto `canvas`, shifted by the camera offset.
    ///
    /// World y grows upward while screen y grows downward, so the vertical
    /// offset is subtracted.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for handle in self.actors() {
            let actor = handle.borrow();
            let surface = actor.surface();
            let topleft = actor.topleft();
            let x = topleft.x + self.offset.x;
            let y = topleft.y - self.offset.y;
            canvas.blit(&surface, x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::actor::Sprite;
    use crate::scene::canvas::recording::RecordingCanvas;
    use image::{Rgba, RgbaImage};

    /// Records warnings per test thread so tests can assert on them.
    mod captured {
        use std::cell::RefCell;

        struct CaptureLogger;

        thread_local! {
            static WARNINGS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
        }

        impl log::Log for CaptureLogger {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                metadata.level() <= log::Level::Warn
            }

            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    WARNINGS.with(|w| w.borrow_mut().push(record.args().to_string()));
                }
            }

            fn flush(&self) {}
        }

        static LOGGER: CaptureLogger = CaptureLogger;

        /// Installs the logger (once per test binary) and clears this
        /// thread's buffer.
        pub fn start() {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(log::LevelFilter::Warn);
            WARNINGS.with(|w| w.borrow_mut().clear());
        }

        pub fn warnings() -> Vec<String> {
            WARNINGS.with(|w| w.borrow().clone())
        }
    }

    fn sprite_at(x: i32, y: i32) -> ActorRef {
        ActorRef::new(Sprite::filled(2, 3, Rgba([255, 255, 255, 255]), IVec2::new(x, y)))
    }

    #[test]
    fn test_duplicate_add_keeps_single_entry() {
        captured::start();
        let mut scene = Scene::new();
        let a = sprite_at(0, 0);

        assert_eq!(scene.add_actors([a.clone(), a.clone()]), 1);
        assert_eq!(scene.actors(), vec![a.clone()]);
        let warnings = captured::warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("already part of the world"));

        assert!(!scene.add_actor(a));
        assert_eq!(scene.len(), 1);
        assert_eq!(captured::warnings().len(), 2);
    }

    #[test]
    fn test_remove_absent_is_a_warning() {
        captured::start();
        let mut scene = Scene::new();
        let a = sprite_at(0, 0);
        let b = sprite_at(1, 1);
        scene.add_actor(a.clone());
        assert!(captured::warnings().is_empty());

        assert_eq!(scene.remove_actors([&b, &a]), 1);
        assert!(scene.is_empty());
        let warnings = captured::warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("not part of the world"));

        assert!(!scene.remove_actor(&a));
        assert_eq!(captured::warnings().len(), 2);
    }

    #[test]
    fn test_offset_requires_integers() {
        let mut scene = Scene::new();

        let err = scene
            .set_offset_values(&Value::from(1.5), &Value::from(2))
            .unwrap_err();
        assert_eq!(
            err,
            SceneError::InvalidOffset {
                axis: Axis::X,
                found: "float"
            }
        );
        assert!(err.to_string().contains("float"));
        assert_eq!(scene.offset(), IVec2::ZERO);

        let err = scene
            .set_offset_values(&Value::from(1), &Value::from(false))
            .unwrap_err();
        assert_eq!(
            err,
            SceneError::InvalidOffset {
                axis: Axis::Y,
                found: "bool"
            }
        );
        assert_eq!(scene.offset(), IVec2::ZERO);

        scene
            .set_offset_values(&Value::from(1), &Value::from(2))
            .unwrap();
        assert_eq!(scene.offset(), IVec2::new(1, 2));
        assert_eq!((scene.x(), scene.y()), (1, 2));
    }

    #[test]
    fn test_value_batch_aborts_on_non_actor() {
        let mut scene = Scene::new();
        let a = sprite_at(0, 0);
        let b = sprite_at(5, 5);
        let batch = [
            Value::from(a.clone()),
            Value::from(a.clone()),
            Value::from(3),
            Value::from(b.clone()),
        ];

        let err = scene.add_actor_values(&batch).unwrap_err();
        assert_eq!(err, SceneError::NotAnActor("int"));
        assert!(scene.contains(&a));
        assert!(!scene.contains(&b));

        assert_eq!(
            scene.remove_actor_values(&[Value::from(b), Value::from(a)]),
            Ok(1)
        );
        assert!(scene.is_empty());
    }

    #[test]
    fn test_draw_applies_offset_with_inverted_y() {
        let mut scene = Scene::new();
        scene.add_actor(sprite_at(0, 0));
        scene.set_offset(10, 5);

        let mut canvas = RecordingCanvas::default();
        scene.draw(&mut canvas);

        assert_eq!(canvas.blits, vec![(IVec2::new(10, -5), (2, 3))]);
    }

    #[test]
    fn test_draw_composites_onto_image() {
        let mut scene = Scene::with_offset(1, -1);
        let white = Rgba([255, 255, 255, 255]);
        scene.add_actor(ActorRef::new(Sprite::filled(1, 1, white, IVec2::new(2, 2))));

        let mut screen = RgbaImage::new(8, 8);
        scene.draw(&mut screen);

        assert_eq!(*screen.get_pixel(3, 3), white);
        assert_eq!(*screen.get_pixel(2, 2), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_draw_every_actor() {
        let mut scene = Scene::new();
        scene.add_actors([sprite_at(0, 0), sprite_at(4, 4), sprite_at(8, 8)]);

        let mut canvas = RecordingCanvas::default();
        scene.draw(&mut canvas);

        let mut positions: Vec<_> = canvas.blits.iter().map(|(p, _)| (p.x, p.y)).collect();
        positions.sort();
        assert_eq!(positions, vec![(0, 0), (4, 4), (8, 8)]);
    }
}
