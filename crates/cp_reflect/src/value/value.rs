use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use core::hash::{Hash, Hasher};

use cp_utils::hash::{HashMap, HashSet, fixed_hash};

use crate::Object;
use crate::codegen::Builtin;
use crate::value::ValueKind;

// -----------------------------------------------------------------------------
// Containers

/// An unordered collection of distinct values.
///
/// Uses the fixed hash state of `cp_utils`, so iteration order only depends on
/// the contents and their insertion history.
pub type ValueSet = HashSet<Value>;

/// An associative collection keyed by values.
///
/// See [`ValueSet`] for the iteration order guarantee.
pub type ValueMap = HashMap<Value, Value>;

// -----------------------------------------------------------------------------
// Value

/// A node of an object graph.
///
/// # Equality
///
/// Equality is structural. Floats are compared by bit pattern, so every
/// value equals itself (including `NaN`) and round trips are exact.
/// Values of different categories are never equal: `Int(1) != Float(1.0)`.
///
/// Objects are compared through [`Object::object_eq`] and hashed by type path.
///
/// # Examples
///
/// ```
/// use cp_reflect::value::{Value, ValueMap};
///
/// let map: ValueMap = [(Value::from("a"), Value::from(2123))].into_iter().collect();
/// let value = Value::from(map);
///
/// assert_eq!(value.as_map().unwrap().get(&Value::from("a")), Some(&Value::Int(2123)));
/// ```
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Set(ValueSet),
    Map(ValueMap),
    Object(Box<dyn Object>),
}

impl Value {
    /// Wraps an object.
    #[inline]
    pub fn object<T: Object>(object: T) -> Self {
        Self::Object(Box::new(object))
    }

    /// Resolves the encoding category of this value.
    pub fn kind(&self) -> ValueKind<'_> {
        match self {
            Self::None => ValueKind::Singleton(Builtin::None),
            Self::Bool(true) => ValueKind::Singleton(Builtin::True),
            Self::Bool(false) => ValueKind::Singleton(Builtin::False),
            Self::Int(value) => ValueKind::Int(*value),
            Self::Float(value) => ValueKind::Float(*value),
            Self::Str(value) => ValueKind::Str(value),
            Self::Set(set) => ValueKind::Set(set),
            Self::Map(map) => ValueKind::Map(map),
            Self::Object(object) => match object.as_encode() {
                Some(hook) => ValueKind::Custom(&**object, hook),
                None => ValueKind::Generic(&**object),
            },
        }
    }

    /// A short name of the value category, used in error messages.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
        }
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_set(&self) -> Option<&ValueSet> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&dyn Object> {
        match self {
            Self::Object(object) => Some(&**object),
            _ => None,
        }
    }

    /// Returns the object as `T` if this is an object of that type.
    #[inline]
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_object()?.downcast_ref::<T>()
    }
}

// -----------------------------------------------------------------------------
// Std traits

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Bool(value) => Self::Bool(*value),
            Self::Int(value) => Self::Int(*value),
            Self::Float(value) => Self::Float(*value),
            Self::Str(value) => Self::Str(value.clone()),
            Self::Set(set) => Self::Set(set.clone()),
            Self::Map(map) => Self::Map(map.clone()),
            Self::Object(object) => Self::Object(object.clone_object()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.object_eq(&**b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::None => {}
            Self::Bool(value) => value.hash(state),
            Self::Int(value) => value.hash(state),
            Self::Float(value) => value.to_bits().hash(state),
            Self::Str(value) => value.hash(state),
            // Order independent: sum of the per-element hashes.
            Self::Set(set) => {
                set.len().hash(state);
                set.iter()
                    .fold(0u64, |acc, item| acc.wrapping_add(fixed_hash(item)))
                    .hash(state);
            }
            Self::Map(map) => {
                map.len().hash(state);
                map.iter()
                    .fold(0u64, |acc, entry| acc.wrapping_add(fixed_hash(&entry)))
                    .hash(state);
            }
            Self::Object(object) => object.reflect_type_path().hash(state),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(value) => fmt::Debug::fmt(value, f),
            Self::Int(value) => fmt::Debug::fmt(value, f),
            Self::Float(value) => fmt::Debug::fmt(value, f),
            Self::Str(value) => fmt::Debug::fmt(value, f),
            Self::Set(set) => f.debug_set().entries(set.iter()).finish(),
            Self::Map(map) => f.debug_map().entries(map.iter()).finish(),
            Self::Object(object) => object.object_debug(f),
        }
    }
}

impl Default for Value {
    #[inline]
    fn default() -> Self {
        Self::None
    }
}

// -----------------------------------------------------------------------------
// From

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<ValueSet> for Value {
    #[inline]
    fn from(value: ValueSet) -> Self {
        Self::Set(value)
    }
}

impl From<ValueMap> for Value {
    #[inline]
    fn from(value: ValueMap) -> Self {
        Self::Map(value)
    }
}

impl From<Box<dyn Object>> for Value {
    #[inline]
    fn from(value: Box<dyn Object>) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Value, ValueMap, ValueSet};
    use cp_utils::hash::fixed_hash;

    #[test]
    fn floats_compare_by_bits() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn set_hash_ignores_insertion_order() {
        let a: ValueSet = [Value::from(1), Value::from("x"), Value::None]
            .into_iter()
            .collect();
        let b: ValueSet = [Value::None, Value::from("x"), Value::from(1)]
            .into_iter()
            .collect();

        assert_eq!(a, b);
        assert_eq!(fixed_hash(&Value::Set(a)), fixed_hash(&Value::Set(b)));
    }

    #[test]
    fn nested_maps_are_keys() {
        let inner: ValueMap = [(Value::from("k"), Value::from(true))].into_iter().collect();
        let mut outer = ValueMap::default();
        outer.insert(Value::Map(inner.clone()), Value::from(2.5));

        assert_eq!(outer.get(&Value::Map(inner)), Some(&Value::Float(2.5)));
    }

    #[test]
    fn option_converts_to_none() {
        assert!(Value::from(None::<i32>).is_none());
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }
}
