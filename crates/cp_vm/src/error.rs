use alloc::string::String;

use cp_reflect::object::ObjectError;
use thiserror::Error;

// -----------------------------------------------------------------------------
// CompileError

/// A program unit that is not well formed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompileError {
    /// Two definitions share a name, or a definition shadows an import root
    /// or the output name.
    #[error("`{name}` is defined more than once")]
    DuplicateDefinition { name: String },

    #[error("name `{name}` is not bound in {scope}")]
    UnboundName { name: String, scope: String },

    #[error("body of `{function}` does not end with a return statement")]
    MissingReturn { function: String },

    #[error("return statement outside of a function")]
    ReturnOutsideFunction,

    #[error("import `{module}` has an empty path segment")]
    EmptyModulePath { module: String },
}

// -----------------------------------------------------------------------------
// ExecError

/// Failure while running an executable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExecError {
    /// The program finished without binding the output name.
    #[error("program finished without binding `{name}`")]
    NameNotBound { name: &'static str },

    /// A module, type or function was found where a value is required.
    #[error("expected a value, found {found}")]
    NotAValue { found: String },

    #[error("module `{module}` is not registered")]
    ModuleNotFound { module: String },

    #[error("name `{name}` is not bound")]
    UnboundName { name: String },

    #[error("{target} has no attribute `{attr}`")]
    NoAttribute { target: String, attr: String },

    #[error("{found} is not callable")]
    NotCallable { found: String },

    #[error("function `{function}` takes no arguments")]
    FunctionArguments { function: String },

    #[error("expected a type, found {found}")]
    NotAType { found: String },

    #[error("type `{type_path}` cannot be allocated")]
    CannotAllocate { type_path: &'static str },

    #[error("type `{type_path}` cannot be constructed")]
    CannotConstruct { type_path: &'static str },

    #[error("cannot set attributes of `{target}`: {reason}")]
    SetAttributes { target: String, reason: String },

    #[error(transparent)]
    Object(#[from] ObjectError),

    #[error("call depth exceeds {limit}")]
    CallDepth { limit: usize },

    /// The executable does not come from the compiler, or was corrupted.
    #[error("invalid bytecode: {reason}")]
    InvalidBytecode { reason: &'static str },
}

// -----------------------------------------------------------------------------
// ContainerError

/// Failure of the binary container layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContainerError {
    #[error("not a codepickle container")]
    BadMagic,

    #[error("unsupported container version {found}, expected {expected}")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("{0} trailing bytes after the executable")]
    TrailingBytes(usize),

    #[error("failed to encode executable: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("failed to decode executable: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
