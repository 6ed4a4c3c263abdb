//! Parse the derive input into the data the impls are generated from.

// -----------------------------------------------------------------------------
// Modules

mod object_meta;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use object_meta::ObjectMeta;
pub(crate) use type_attributes::TypeAttributes;
