use alloc::boxed::Box;
use alloc::string::String;

use crate::Object;
use crate::value::{Value, ValueError, ValueMap, ValueSet};

// -----------------------------------------------------------------------------
// ToValue / FromValue

/// Fallible conversion of a Rust value into a [`Value`].
///
/// Implemented for the primitive types, `String`, `Option<T>` and the value
/// containers. `#[derive(Object)]` implements it for object types.
///
/// A conversion fails rather than produce a value that would read back as
/// something else.
///
/// # Examples
///
/// ```
/// use cp_reflect::value::{ToValue, Value, ValueError};
///
/// assert_eq!(7_u64.to_value(), Ok(Value::Int(7)));
/// assert_eq!(
///     u64::MAX.to_value(),
///     Err(ValueError::IntOverflow { value: u64::MAX }),
/// );
/// assert_eq!(Some(None::<i64>).to_value(), Err(ValueError::AmbiguousNone));
/// ```
pub trait ToValue {
    fn to_value(&self) -> Result<Value, ValueError>;
}

/// Fallible conversion of a [`Value`] into a Rust value.
///
/// Used to read attributes back when an object is rebuilt.
///
/// # Examples
///
/// ```
/// use cp_reflect::value::{FromValue, Value, ValueError};
///
/// assert_eq!(u8::from_value(Value::Int(7)), Ok(7));
/// assert!(matches!(
///     u8::from_value(Value::Int(300)),
///     Err(ValueError::OutOfRange { value: 300, target: "u8" }),
/// ));
/// ```
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

#[inline]
fn mismatched(expected: &'static str, found: &Value) -> ValueError {
    ValueError::Mismatched {
        expected,
        found: found.category(),
    }
}

// -----------------------------------------------------------------------------
// Value itself

impl ToValue for Value {
    #[inline]
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(self.clone())
    }
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

// -----------------------------------------------------------------------------
// Integers

macro_rules! impl_integer {
    ($($ty:ident),*) => {
        $(
            impl ToValue for $ty {
                #[inline]
                fn to_value(&self) -> Result<Value, ValueError> {
                    Ok(Value::from(*self))
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::Int(int) => <$ty>::try_from(int).map_err(|_| ValueError::OutOfRange {
                            value: int,
                            target: stringify!($ty),
                        }),
                        other => Err(mismatched("int", &other)),
                    }
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, u8, u16, u32);

impl ToValue for u64 {
    /// Values above `i64::MAX` have no [`Value::Int`] form.
    #[inline]
    fn to_value(&self) -> Result<Value, ValueError> {
        i64::try_from(*self)
            .map(Value::Int)
            .map_err(|_| ValueError::IntOverflow { value: *self })
    }
}

impl FromValue for u64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Int(int) => u64::try_from(int).map_err(|_| ValueError::OutOfRange {
                value: int,
                target: "u64",
            }),
            other => Err(mismatched("int", &other)),
        }
    }
}

impl ToValue for usize {
    #[inline]
    fn to_value(&self) -> Result<Value, ValueError> {
        (*self as u64).to_value()
    }
}

impl FromValue for usize {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Int(int) => usize::try_from(int).map_err(|_| ValueError::OutOfRange {
                value: int,
                target: "usize",
            }),
            other => Err(mismatched("int", &other)),
        }
    }
}

// -----------------------------------------------------------------------------
// Other scalars

impl ToValue for bool {
    #[inline]
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Bool(*self))
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(value) => Ok(value),
            other => Err(mismatched("bool", &other)),
        }
    }
}

impl ToValue for f64 {
    #[inline]
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Float(*self))
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Float(value) => Ok(value),
            other => Err(mismatched("float", &other)),
        }
    }
}

impl ToValue for f32 {
    #[inline]
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Float(f64::from(*self)))
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Float(value) => {
                let narrow = value as f32;
                if f64::from(narrow).to_bits() == value.to_bits() || value.is_nan() {
                    Ok(narrow)
                } else {
                    Err(ValueError::LossyFloat { target: "f32" })
                }
            }
            other => Err(mismatched("float", &other)),
        }
    }
}

impl ToValue for String {
    #[inline]
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Str(self.clone()))
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Str(value) => Ok(value),
            other => Err(mismatched("str", &other)),
        }
    }
}

// -----------------------------------------------------------------------------
// Containers

/// `None` maps to [`Value::None`], so a `Some` whose content also maps to
/// [`Value::None`] is rejected with [`ValueError::AmbiguousNone`].
impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Result<Value, ValueError> {
        match self {
            Some(value) => match value.to_value()? {
                Value::None => Err(ValueError::AmbiguousNone),
                value => Ok(value),
            },
            None => Ok(Value::None),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::None => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl ToValue for ValueSet {
    #[inline]
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Set(self.clone()))
    }
}

impl FromValue for ValueSet {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Set(set) => Ok(set),
            other => Err(mismatched("set", &other)),
        }
    }
}

impl ToValue for ValueMap {
    #[inline]
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Map(self.clone()))
    }
}

impl FromValue for ValueMap {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Map(map) => Ok(map),
            other => Err(mismatched("map", &other)),
        }
    }
}

impl ToValue for Box<dyn Object> {
    #[inline]
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Object(self.clone_object()))
    }
}

impl FromValue for Box<dyn Object> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Object(object) => Ok(object),
            other => Err(mismatched("object", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FromValue, ToValue};
    use crate::value::{Value, ValueError};
    use alloc::string::String;

    #[test]
    fn integer_bounds_are_checked() {
        assert_eq!(i32::from_value(Value::Int(-5)), Ok(-5));
        assert_eq!(
            u32::from_value(Value::Int(-1)),
            Err(ValueError::OutOfRange {
                value: -1,
                target: "u32"
            })
        );
    }

    #[test]
    fn category_mismatch() {
        assert_eq!(
            String::from_value(Value::Int(1)),
            Err(ValueError::Mismatched {
                expected: "str",
                found: "int"
            })
        );
        assert!(bool::from_value(Value::None).is_err());
    }

    #[test]
    fn option_round_trip() {
        let some: Option<String> = Some(String::from("x"));
        assert_eq!(Option::<String>::from_value(some.to_value().unwrap()), Ok(some));
        assert_eq!(Option::<i64>::from_value(Value::None), Ok(None));
    }

    #[test]
    fn unsigned_above_int_range_is_rejected() {
        assert_eq!(
            (i64::MAX as u64).to_value(),
            Ok(Value::Int(i64::MAX))
        );
        assert_eq!(
            (i64::MAX as u64 + 1).to_value(),
            Err(ValueError::IntOverflow {
                value: i64::MAX as u64 + 1
            })
        );
        assert_eq!(
            usize::MAX.to_value(),
            Err(ValueError::IntOverflow {
                value: usize::MAX as u64
            })
        );
    }

    #[test]
    fn nested_none_is_rejected() {
        let nested: Option<Option<i64>> = Some(None);
        assert_eq!(nested.to_value(), Err(ValueError::AmbiguousNone));
        assert_eq!(Some(Value::None).to_value(), Err(ValueError::AmbiguousNone));

        let outer: Option<Option<i64>> = None;
        assert_eq!(outer.to_value(), Ok(Value::None));
        let inner: Option<Option<i64>> = Some(Some(4));
        let value = inner.to_value().unwrap();
        assert_eq!(Option::<Option<i64>>::from_value(value), Ok(inner));
    }

    #[test]
    fn narrowing_float_must_be_exact() {
        assert_eq!(f32::from_value(Value::Float(0.5)), Ok(0.5));
        assert_eq!(
            f32::from_value(Value::Float(f64::from(1.1_f32))),
            Ok(1.1_f32)
        );
        assert!(f32::from_value(Value::Float(f64::NAN)).unwrap().is_nan());
        assert_eq!(
            f32::from_value(Value::Float(0.1)),
            Err(ValueError::LossyFloat { target: "f32" })
        );
        assert_eq!(
            f32::from_value(Value::Float(1e300)),
            Err(ValueError::LossyFloat { target: "f32" })
        );
    }
}
