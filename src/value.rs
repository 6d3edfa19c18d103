//! Loosely-typed argument values.
//!
//! Most of the crate is statically typed, but beginner-facing surfaces
//! (scripting hooks, configuration-driven setup) hand over values whose shape
//! is only known at runtime. The `*_values` entry points on [`Cursor`] and
//! [`Scene`] accept these and validate them, reporting the received type name
//! on failure.
//!
//! [`Cursor`]: crate::input::cursor::Cursor
//! [`Scene`]: crate::scene::world::Scene

use crate::scene::actor::ActorRef;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<Value>),
    Actor(ActorRef),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Tuple(_) => "tuple",
            Value::Actor(_) => "actor",
        }
    }

    /// Returns the value as an `i32` if it is an exact integer in range.
    ///
    /// Booleans are not integers here.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_actor(&self) -> Option<&ActorRef> {
        match self {
            Value::Actor(actor) => Some(actor),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<ActorRef> for Value {
    fn from(v: ActorRef) -> Self {
        Value::Actor(v)
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Tuple(vec![a.into(), b.into()])
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Tuple(v.into_iter().map(Into::into).collect())
    }
}
