//! Items used by the code `#[derive(Object)]` expands to. Not public API.

use alloc::format;

use crate::Object;
use crate::info::TypePath;
use crate::object::ObjectError;
use crate::value::{FromValue, ToValue, Value, ValueError, ValueMap};

/// Converts the field `field` into its attribute value.
pub fn attribute_value<T: ToValue>(
    value: &T,
    type_path: &'static str,
    field: &'static str,
) -> Result<Value, ObjectError> {
    value.to_value().map_err(|source| ObjectError::InvalidAttribute {
        type_path,
        attribute: field,
        source,
    })
}

/// Compares two fields by their attribute values.
///
/// Fields without a value form compare by their conversion error.
pub fn field_eq<T: ToValue>(a: &T, b: &T) -> bool {
    match (a.to_value(), b.to_value()) {
        (Ok(a), Ok(b)) => a == b,
        (Err(a), Err(b)) => a == b,
        _ => false,
    }
}

/// Removes the attribute `field` from `attributes` and converts it.
pub fn take_attribute<T: FromValue>(
    attributes: &mut ValueMap,
    type_path: &'static str,
    field: &'static str,
) -> Result<T, ObjectError> {
    let Some(value) = attributes.remove(&Value::from(field)) else {
        return Err(ObjectError::MissingAttribute {
            type_path,
            attribute: field,
        });
    };
    T::from_value(value).map_err(|source| ObjectError::InvalidAttribute {
        type_path,
        attribute: field,
        source,
    })
}

/// Fails if `attributes` still holds entries after every field was taken.
pub fn reject_unknown(attributes: &ValueMap, type_path: &'static str) -> Result<(), ObjectError> {
    match attributes.keys().next() {
        None => Ok(()),
        Some(Value::Str(name)) => Err(ObjectError::UnknownAttribute {
            type_path,
            attribute: name.clone(),
        }),
        Some(other) => Err(ObjectError::UnknownAttribute {
            type_path,
            attribute: format!("{other:?}"),
        }),
    }
}

/// Takes an object of type `T` out of a value.
pub fn take_object<T: Object + TypePath>(value: Value) -> Result<T, ValueError> {
    match value {
        Value::Object(object) => object.take::<T>().map_err(|object| ValueError::MismatchedObject {
            expected: T::type_path(),
            found: object.reflect_type_path(),
        }),
        other => Err(ValueError::Mismatched {
            expected: "object",
            found: other.category(),
        }),
    }
}

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

    /// A registration function collected by `inventory`.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: GetTypeMeta> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    /// Registered alongside user types; its presence proves that
    /// `inventory` works on the current platform.
    pub struct __AvailFlag;

    impl crate::info::TypePath for __AvailFlag {
        fn type_path() -> &'static str {
            "cp_reflect::__macro_exports::auto_register::__AvailFlag"
        }
        fn type_name() -> &'static str {
            "__AvailFlag"
        }
    }

    impl GetTypeMeta for __AvailFlag {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>()
        }
    }

    inventory::submit! {
        __AutoRegisterFunc(<__AvailFlag as __RegisterType>::__register)
    }

    pub fn __register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
