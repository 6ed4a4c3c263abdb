use alloc::string::String;

use thiserror::Error;

use crate::value::ValueError;

// -----------------------------------------------------------------------------
// Error

/// Failure to rebuild an object from attributes or call arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ObjectError {
    #[error("`{type_path}` is missing attribute `{attribute}`")]
    MissingAttribute {
        type_path: &'static str,
        attribute: &'static str,
    },

    #[error("`{type_path}` has no attribute `{attribute}`")]
    UnknownAttribute {
        type_path: &'static str,
        attribute: String,
    },

    #[error("invalid attribute `{attribute}` of `{type_path}`: {source}")]
    InvalidAttribute {
        type_path: &'static str,
        attribute: &'static str,
        source: ValueError,
    },

    #[error("attribute names of `{type_path}` must be strings, found {found}")]
    NonStringAttribute {
        type_path: &'static str,
        found: &'static str,
    },

    #[error("`{type_path}` takes {expected} positional arguments but {found} were given")]
    TooManyArguments {
        type_path: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("`{type_path}` got multiple values for argument `{attribute}`")]
    DuplicateArgument {
        type_path: &'static str,
        attribute: String,
    },

    #[error("`{type_path}` does not support {operation}")]
    NotSupported {
        type_path: &'static str,
        operation: &'static str,
    },
}
