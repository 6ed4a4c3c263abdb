use cp_reflect::codegen::EncodeError;
use cp_vm::{CompileError, ContainerError, ExecError};
use thiserror::Error;

/// Any failure of a serialize or deserialize call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The value cannot be turned into a program.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The program failed while rebuilding the value.
    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Container(#[from] ContainerError),
}
