//! Object Module
//!
//! Provides the capability interface for host values that have no native term
//! mapping. An object either writes its own bytes (`encode_direct`) or exposes
//! its state as a field map (`as_map`), which the encoder sends as an Elixir
//! struct: a map whose `__struct__` key names the object's type.
//!
//! Decoding goes the other way through the type registry, whose
//! decode-from-map capability may return a `Term::Object`.

use crate::buffer::OutputBuffer;
use crate::map::TermMap;
use crate::term::TypeName;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Error reported by an object's own encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectError(String);

impl ObjectError {
    pub fn new(message: impl Into<String>) -> Self {
        ObjectError(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ObjectError {}

/// Encoding capabilities of a host value
pub trait EtfObject: fmt::Debug + Send + Sync + 'static {
    /// Fully qualified host type name; `None` for anonymous types
    fn type_name(&self) -> Option<TypeName>;

    /// Field map sent as an Elixir struct
    fn as_map(&self) -> Option<TermMap> {
        None
    }

    /// Write the value's complete encoding (tag included) into `out`
    ///
    /// Returning `Some` takes precedence over `as_map`.
    fn encode_direct(&self, _out: &mut OutputBuffer) -> Option<Result<(), ObjectError>> {
        None
    }

    /// Upcast for downcasting in [`Object::downcast_ref`]
    fn as_any(&self) -> &dyn Any;

    /// Structural equality with another object
    fn object_eq(&self, other: &dyn EtfObject) -> bool {
        let mine = self.as_map();
        mine.is_some() && self.type_name() == other.type_name() && mine == other.as_map()
    }
}

/// Shared handle to a host object inside a term
#[derive(Clone)]
pub struct Object(Arc<dyn EtfObject>);

impl Object {
    pub fn new<T: EtfObject>(value: T) -> Self {
        Object(Arc::new(value))
    }

    pub fn from_arc(value: Arc<dyn EtfObject>) -> Self {
        Object(value)
    }

    /// Borrow the capabilities
    pub fn get(&self) -> &dyn EtfObject {
        self.0.as_ref()
    }

    /// Downcast to the concrete host type
    pub fn downcast_ref<T: EtfObject>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.object_eq(other.0.as_ref())
    }
}
