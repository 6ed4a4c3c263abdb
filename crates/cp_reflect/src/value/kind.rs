use crate::Object;
use crate::codegen::{Builtin, Encode};
use crate::value::{ValueMap, ValueSet};

// -----------------------------------------------------------------------------
// ValueKind

/// The encoding category of a [`Value`](crate::value::Value).
///
/// Resolved once per value by [`Value::kind`](crate::value::Value::kind); the
/// encoder dispatches on it with a single `match`.
///
/// Objects are split by capability: an object exposing an [`Encode`] hook is
/// [`Custom`](ValueKind::Custom), any other object is
/// [`Generic`](ValueKind::Generic) and is rebuilt from its attributes.
#[derive(Clone, Copy)]
pub enum ValueKind<'a> {
    Int(i64),
    Float(f64),
    Str(&'a str),
    Singleton(Builtin),
    Set(&'a ValueSet),
    Map(&'a ValueMap),
    Custom(&'a dyn Object, &'a dyn Encode),
    Generic(&'a dyn Object),
}

impl ValueKind<'_> {
    /// A short name of the category, used in error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Singleton(_) => "singleton",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Custom(..) => "custom object",
            Self::Generic(_) => "object",
        }
    }
}

impl core::fmt::Debug for ValueKind<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
