//! See following macros:
//!
//! - [`Object`]
//! - [`TypePath`]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static OBJECT_ATTRIBUTE_NAME: &str = "object";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Object Derivation
///
/// `#[derive(Object)]` automatically implements the following traits:
///
/// - `TypePath`
/// - `Object`
/// - `Construct`
/// - `GetTypeMeta`
/// - `ToValue` / `FromValue` (the value wraps a clone of the object)
///
/// Supported on structs with named fields and unit structs, without generics.
/// Every field type must implement `ToValue` and `FromValue`, and the type
/// itself must implement `Clone`.
///
/// ## Construction
///
/// By default the type is rebuilt by allocating a bare instance and then
/// assigning all attributes at once, which requires `Default`. The type meta
/// gets both `TypeTraitAllocate` and `TypeTraitConstruct`.
///
/// With `construct`, the type is rebuilt by calling it with its attributes as
/// keyword arguments. `Default` is not needed and only `TypeTraitConstruct` is
/// registered.
///
/// ```rust, ignore
/// #[derive(Object, Clone)]
/// #[object(construct)]
/// struct Foo { /* ... */ }
/// ```
///
/// ## Custom Type Path
///
/// The type path defaults to `module_path!()` followed by the type name. It is
/// what generated programs use to find the type again, so pin it when the
/// type may move:
///
/// ```rust, ignore
/// #[derive(Object, Default, Clone)]
/// #[object(type_path = "you::me::Foo")]
/// struct Foo { /* ... */ }
/// ```
///
/// ## Encoding Hook
///
/// `encode` makes `Object::as_encode` return the type's own `Encode`
/// implementation, which must be provided by hand.
///
/// ```rust, ignore
/// #[derive(Object, Clone)]
/// #[object(construct, encode)]
/// struct Foo { /* ... */ }
///
/// impl Encode for Foo { /* ... */ }
/// ```
///
/// ## Auto Register
///
/// `auto_register` submits the type to `TypeRegistry::auto_register`
/// (requires the `auto_register` feature).
///
/// ```rust, ignore
/// #[derive(Object, Default, Clone)]
/// #[object(auto_register)]
/// struct Foo { /* ... */ }
/// ```
#[proc_macro_derive(Object, attributes(object))]
pub fn derive_object(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ObjectMeta::from_ast(&ast, true) {
        Ok(meta) => impls::impl_object_full(&meta).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// # TypePath Derivation
///
/// Implements only `TypePath`, accepting `#[object(type_path = "...")]`.
///
/// Useful for types that implement `Object` by hand.
#[proc_macro_derive(TypePath, attributes(object))]
pub fn derive_type_path(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ObjectMeta::from_ast(&ast, false) {
        Ok(meta) => impls::impl_trait_type_path(&meta).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
