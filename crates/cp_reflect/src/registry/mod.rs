//! Provide the type registry used to rebuild objects while a program runs.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: A trait representing a capability supported by a type.
//! - [`FromType`]: A trait provide a function to create a `TypeTrait` from a type.
//! - [`TypeMeta`]: A container including a [`TypePathTable`] and a [`TypeTrait`] table.
//! - [`GetTypeMeta`]: A trait provide a function to create a `TypeMeta` from a type.
//! - [`TypeRegistry`]: A container for storing `TypeMeta`s, indexed by type path and module.
//! - TypeTraits:
//!     - [`TypeTraitAllocate`]: Create a bare instance, filled later by a bulk attribute store.
//!     - [`TypeTraitConstruct`]: Build an instance from call arguments.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`] .
//!
//! We use [`inventory`] crate to implement static registration,
//! not all platforms support it (although major platforms do).
//! If it is not supported, the function returns `false` without causing errors.
//!
//! [`TypePathTable`]: crate::info::TypePathTable
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::{TypeTraitAllocate, TypeTraitConstruct};
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::{TypeRegistry, TypeRegistryArc};
pub use type_trait::TypeTrait;
