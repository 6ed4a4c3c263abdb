use alloc::string::String;

use thiserror::Error;

use crate::object::ObjectError;

// -----------------------------------------------------------------------------
// Error

/// Failure to turn a value into a program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// The value has no hook and cannot be rebuilt from its attributes.
    #[error("cannot encode `{type_path}`: {reason}")]
    Unsupported {
        type_path: &'static str,
        reason: &'static str,
    },

    /// An attribute has no value that reads back as the same field.
    #[error("cannot encode attributes: {0}")]
    Attributes(#[source] ObjectError),

    #[error("value nesting exceeds {limit} levels, the graph may be cyclic")]
    RecursionLimit { limit: usize },

    #[error("body of `{function}` does not end with a return statement")]
    MissingReturn { function: String },

    /// Raised by an encoding hook.
    #[error("encoding hook of `{type_path}` failed: {message}")]
    Hook {
        type_path: &'static str,
        message: String,
    },
}

impl EncodeError {
    /// Creates a [`EncodeError::Hook`] error, for use in [`Encode`] implementations.
    ///
    /// [`Encode`]: crate::codegen::Encode
    #[inline]
    pub fn hook(type_path: &'static str, message: impl Into<String>) -> Self {
        Self::Hook {
            type_path,
            message: message.into(),
        }
    }
}
