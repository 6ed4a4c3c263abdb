//! Reflection and program generation for `codepickle`.
//!
//! A [`Value`](value::Value) graph is turned into a [`ProgramUnit`] by the
//! [`codegen`] module. User types join the graph by implementing [`Object`],
//! usually through `#[derive(Object)]`, and are found again at execution time
//! through the [`TypeRegistry`](registry::TypeRegistry).
//!
//! [`ProgramUnit`]: codegen::ProgramUnit

// -----------------------------------------------------------------------------
// Extern Self

// Usually, we need to use `crate` in the crate itself and use `cp_reflect` in doc testing.
// But `macro_utils::Manifest` can only choose one, so we must have an
// `extern self` to ensure `cp_reflect` can be used as an alias for `crate`.
extern crate self as cp_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod codegen;
pub mod info;
pub mod object;
pub mod registry;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use cp_reflect_derive as derive;
pub use object::Object;
pub use value::Value;
