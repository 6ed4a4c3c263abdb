//! Turn a [`Value`](crate::value::Value) into a program that rebuilds it.
//!
//! ## Menu
//!
//! - [`ProgramUnit`], [`Expr`], [`Stmt`], [`FunctionDef`]: the program syntax.
//! - [`Fragment`]: preparatory statements plus one expression.
//! - [`Session`]: per-call state (name counter, imports, definitions).
//! - [`Encode`], [`HookOutput`]: the encoding hook an object can expose.
//! - [`generate_program`]: encode and assemble in one call.
//!
//! ## Pipeline
//!
//! The [structural encoder](Session::encode) walks the value depth-first and
//! returns a [`Fragment`]. Reconstructions needing several statements are
//! turned into zero-argument functions by the [wrapper](Session::wrap), so that
//! a call expression can stand in for them. Finally the
//! [assembler](Session::assemble) orders imports, definitions and the top-level
//! statements, and binds the result to [`OUTPUT_NAME`].
//!
//! ```
//! use cp_reflect::codegen::{EncodeConfig, Expr, OUTPUT_NAME, Stmt, generate_program};
//! use cp_reflect::value::Value;
//!
//! let program = generate_program(&Value::from(2123), &EncodeConfig::default()).unwrap();
//!
//! assert!(program.imports.is_empty());
//! assert!(program.definitions.is_empty());
//! assert_eq!(program.binding, Stmt::assign(OUTPUT_NAME, Expr::Int(2123)));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod assemble;
mod config;
mod encoder;
mod error;
mod fragment;
mod hook;
mod program;
mod resolve;
mod session;
mod wrap;

// -----------------------------------------------------------------------------
// Exports

pub use assemble::generate_program;
pub use config::EncodeConfig;
pub use error::EncodeError;
pub use fragment::Fragment;
pub use hook::{Encode, HookOutput};
pub use program::{Builtin, Expr, FunctionDef, OUTPUT_NAME, ProgramUnit, Stmt};
pub use session::Session;
pub use wrap::FUNCTION_PREFIX;
