//! Actor capability and the shared handle the scene tracks actors by.

use std::borrow::Cow;
use std::cell::{Ref, RefCell, RefMut};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use glam::IVec2;
use image::{Rgba, RgbaImage, imageops};

/// Something the scene can draw.
pub trait Actor {
    /// Top-left corner of the actor's surface, in world coordinates.
    fn topleft(&self) -> IVec2;

    /// The surface to composite, with the actor's transformations applied.
    fn surface(&self) -> Cow<'_, RgbaImage>;
}

/// Shared reference to an actor.
///
/// Equality and hashing go by identity: two handles are equal when they
/// point at the same actor, whatever its contents.
#[derive(Clone)]
pub struct ActorRef(Rc<RefCell<dyn Actor>>);

impl ActorRef {
    pub fn new<A: Actor + 'static>(actor: A) -> Self {
        Self(Rc::new(RefCell::new(actor)))
    }

    pub fn borrow(&self) -> Ref<'_, dyn Actor> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn Actor> {
        self.0.borrow_mut()
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

/// Lets game code keep a typed `Rc<RefCell<A>>` and hand the scene a handle
/// to the very same actor.
impl<A: Actor + 'static> From<Rc<RefCell<A>>> for ActorRef {
    fn from(actor: Rc<RefCell<A>>) -> Self {
        Self(actor)
    }
}

impl PartialEq for ActorRef {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for ActorRef {}

impl Hash for ActorRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl std::fmt::Debug for ActorRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ActorRef({:p})", self.addr())
    }
}

/// An image placed in the world.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub image: RgbaImage,
    pub pos: IVec2,
    pub flip_x: bool,
}

impl Sprite {
    pub fn new(image: RgbaImage, pos: IVec2) -> Self {
        Self {
            image,
            pos,
            flip_x: false,
        }
    }

    /// Solid rectangle, handy for prototypes and tests.
    pub fn filled(width: u32, height: u32, color: Rgba<u8>, pos: IVec2) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, color), pos)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

impl Actor for Sprite {
    fn topleft(&self) -> IVec2 {
        self.pos
    }

    fn surface(&self) -> Cow<'_, RgbaImage> {
        if self.flip_x {
            Cow::Owned(imageops::flip_horizontal(&self.image))
        } else {
            Cow::Borrowed(&self.image)
        }
    }
}
