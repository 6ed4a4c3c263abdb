//! Provide compile-time type path information.
//!
//! ## Menu
//!
//! - [`TypePath`]: A trait for obtaining type names, without prefix `::`.
//!     - [`type_path`](TypePath::type_path): Full name, a fixed and unique identifier for the type.
//!     - [`type_name`](TypePath::type_name): The name without module path.
//!     - [`module_path`](TypePath::module_path): optional module path (e.g. "cp_reflect::info").
//! - [`DynamicTypePath`]: Provide dynamic dispatch for `TypePath`.
//! - [`TypePathTable`]: Function pointers to a single type's `TypePath` implementation.
//!
//! Generated programs refer to types through these paths: the module path
//! is imported, then the type name is looked up inside it.

// -----------------------------------------------------------------------------
// Modules

mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use type_path::{DynamicTypePath, TypePath, TypePathTable, module_segments};
