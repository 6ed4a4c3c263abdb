use alloc::format;
use alloc::string::String;

use cp_reflect::info::DynamicTypePath;
use cp_reflect::registry::TypeMeta;
use cp_reflect::value::Value;

use crate::error::ExecError;

/// What a name, or a stack entry, can hold while a program runs.
///
/// Only [`Slot::Value`] can end up in the rebuilt graph; modules, types and
/// functions exist to reach or produce values.
#[derive(Debug, Clone)]
pub(crate) enum Slot<'r> {
    Value(Value),
    /// A module, by its full `::` separated path.
    Module(String),
    Type(&'r TypeMeta),
    /// An index into [`Executable::functions`](crate::Executable::functions).
    Function(u32),
}

impl<'r> Slot<'r> {
    /// A short description used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Value(Value::Object(object)) => {
                format!("object of type `{}`", object.reflect_type_path())
            }
            Self::Value(value) => format!("value of type {}", value.category()),
            Self::Module(path) => format!("module `{path}`"),
            Self::Type(meta) => format!("type `{}`", meta.type_path()),
            Self::Function(idx) => format!("function #{idx}"),
        }
    }

    pub(crate) fn into_value(self) -> Result<Value, ExecError> {
        match self {
            Self::Value(value) => Ok(value),
            other => Err(ExecError::NotAValue {
                found: other.describe(),
            }),
        }
    }
}
