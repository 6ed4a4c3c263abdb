//! The value model: everything the encoder can turn into a program.
//!
//! ## Menu
//!
//! - [`Value`]: scalars, the `None`/`true`/`false` singletons, sets, maps and objects.
//! - [`ValueSet`], [`ValueMap`]: fixed-seed hash containers of values.
//! - [`ValueKind`]: the category of a value, resolved once before dispatch.
//! - [`ToValue`], [`FromValue`]: conversions between Rust types and values.
//! - [`ValueError`]: failure of a typed extraction.

// -----------------------------------------------------------------------------
// Modules

mod convert;
mod error;
mod kind;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use convert::{FromValue, ToValue};
pub use error::ValueError;
pub use kind::ValueKind;
pub use value::{Value, ValueMap, ValueSet};
