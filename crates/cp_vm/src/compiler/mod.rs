//! Validate a [`ProgramUnit`] and lower it to an [`Executable`].

// -----------------------------------------------------------------------------
// Modules

mod lower;
mod scope;

// -----------------------------------------------------------------------------
// Exports

use cp_reflect::codegen::ProgramUnit;

use crate::bytecode::Executable;
use crate::error::CompileError;

/// Compiles a program unit.
///
/// Checks, in order: import paths, definition names, function bodies (must
/// end with a return), then that every name is bound where it is used:
///
/// - module statements see import roots, definition names and module names
///   assigned earlier;
/// - function bodies see their locals assigned earlier plus every
///   module-level name.
///
/// # Examples
///
/// ```
/// use cp_reflect::codegen::{EncodeConfig, generate_program};
/// use cp_reflect::value::Value;
///
/// let program = generate_program(&Value::from("hi"), &EncodeConfig::default()).unwrap();
/// let executable = cp_vm::compile(&program).unwrap();
///
/// assert!(executable.functions.is_empty());
/// ```
pub fn compile(program: &ProgramUnit) -> Result<Executable, CompileError> {
    scope::check(program)?;
    let executable = lower::lower(program);

    log::debug!(
        "compiled executable with {} functions and {} instructions",
        executable.functions.len(),
        executable.instruction_count(),
    );
    Ok(executable)
}
