use alloc::boxed::Box;
use alloc::format;
use core::any::{Any, TypeId};
use core::fmt;

use crate::codegen::Encode;
use crate::info::DynamicTypePath;
use crate::object::{Construction, ObjectError};
use crate::value::{Value, ValueMap};

// -----------------------------------------------------------------------------
// Object

/// A user type that can appear inside a [`Value`] graph.
///
/// The encoder handles an object in one of two ways:
///
/// - If [`as_encode`](Object::as_encode) returns a hook, the hook decides
///   which program rebuilds the object.
/// - Otherwise the object is rebuilt from its [`attributes`](Object::attributes),
///   in the way chosen by [`construction`](Object::construction).
///
/// Prefer `#[derive(Object)]` over a manual implementation.
///
/// # Examples
///
/// ```
/// use cp_reflect::{Object, derive::Object};
/// use cp_reflect::object::Construction;
///
/// #[derive(Object, Default, Clone, PartialEq, Debug)]
/// #[object(type_path = "shapes::Point")]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// let point = Point { x: 1, y: 2 };
/// let object: &dyn Object = &point;
///
/// assert_eq!(object.construction(), Construction::Allocate);
/// assert_eq!(object.attributes().unwrap().unwrap().len(), 2);
/// ```
pub trait Object: DynamicTypePath + Any + Send + Sync {
    /// How the fallback encoder rebuilds this object.
    fn construction(&self) -> Construction;

    /// The attribute mapping of this object, keyed by [`Value::Str`] names.
    ///
    /// `Ok(None)` means the object has no attribute mapping, and cannot be
    /// rebuilt without a hook. An error means some attribute has no value
    /// form that reads back as the same field.
    fn attributes(&self) -> Result<Option<ValueMap>, ObjectError>;

    /// Replaces every attribute of this object with the given mapping.
    ///
    /// Called on a bare instance when the program runs a bulk attribute store.
    fn set_attributes(&mut self, attributes: ValueMap) -> Result<(), ObjectError>;

    /// The encoding hook of this object, if any.
    #[inline]
    fn as_encode(&self) -> Option<&dyn Encode> {
        None
    }

    fn clone_object(&self) -> Box<dyn Object>;

    /// Structural equality against another object.
    fn object_eq(&self, other: &dyn Object) -> bool;

    /// Debug format, by default the type name and the attribute mapping.
    fn object_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(Some(attributes)) = self.attributes() else {
            return f.write_str(self.reflect_type_name());
        };
        let mut debug = f.debug_struct(self.reflect_type_name());
        for (key, value) in attributes.iter() {
            match key {
                Value::Str(name) => debug.field(name, value),
                other => debug.field(&format!("{other:?}"), value),
            };
        }
        debug.finish()
    }
}

impl dyn Object {
    /// The [`TypeId`] of the underlying type.
    #[inline]
    pub fn object_type_id(&self) -> TypeId {
        let any: &dyn Any = self;
        any.type_id()
    }

    /// Returns `true` if the underlying type is `T`.
    #[inline]
    pub fn is<T: Object>(&self) -> bool {
        self.object_type_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }

    /// Takes the underlying value out of the box.
    ///
    /// Returns the box unchanged if the type does not match.
    pub fn take<T: Object>(self: Box<Self>) -> Result<T, Box<dyn Object>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type id checked above"),
        }
    }
}

impl fmt::Debug for dyn Object {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.object_debug(f)
    }
}
