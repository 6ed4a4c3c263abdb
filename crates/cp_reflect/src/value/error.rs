use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Failure to convert between a typed Rust value and a [`Value`](crate::value::Value).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    Mismatched {
        expected: &'static str,
        found: &'static str,
    },

    #[error("integer {value} is out of range for `{target}`")]
    OutOfRange { value: i64, target: &'static str },

    #[error("integer {value} does not fit in a signed 64-bit int")]
    IntOverflow { value: u64 },

    #[error("float is not exactly representable as `{target}`")]
    LossyFloat { target: &'static str },

    /// `Some(x)` where `x` itself converts to `None`.
    #[error("`Some` holds a value that converts to `None`, it would read back as `None`")]
    AmbiguousNone,

    #[error("expected an object of type `{expected}`, found `{found}`")]
    MismatchedObject {
        expected: &'static str,
        found: &'static str,
    },
}
