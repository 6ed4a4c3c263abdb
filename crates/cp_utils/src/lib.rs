//! Shared containers for the codepickle crates.
//!
//! - [`hash`]: fixed-seed hash containers, so that iterating a value map or
//!   set visits its entries in an order that only depends on its contents.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId), used by the
//!   type registry to store type traits.

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
