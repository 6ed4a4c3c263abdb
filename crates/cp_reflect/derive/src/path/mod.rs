//! This independent module is used to provide the required path.
//! So as to minimize changes when the `cp_reflect` structure is modified.
//!
//! The only special feature is the path of cp_reflect itself,
//! See [`cp_reflect`] function doc.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `cp_reflect` crate.
///
/// Not all modules can access the reflection crate itself through `cp_reflect`,
/// we have to scan the builder's `cargo.toml`.
///
/// 1. For crates that depend on `cp_reflect`, `::cp_reflect` is returned here.
/// 2. For crates that depend on `cp_core`, `::cp_core::reflect` is returned here.
/// 3. For other situations, `::cp_reflect` is returned here, but this may be incorrect.
///
/// The cost of this function is relatively high (accessing files, obtaining read-write lock permissions, querying content...),
/// so the crate path is mainly obtained through parameter passing rather than reacquiring.
pub(crate) fn cp_reflect() -> syn::Path {
    cp_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("cp_reflect"))
}

// -----------------------------------------------------------------------------
// Modules

pub(crate) mod fp;

// -----------------------------------------------------------------------------
// Internal API

#[inline(always)]
pub(crate) fn type_path_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::info::TypePath
    }
}

#[inline(always)]
pub(crate) fn object_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::Object
    }
}

#[inline(always)]
pub(crate) fn construction_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::object::Construction
    }
}

#[inline(always)]
pub(crate) fn construct_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::object::Construct
    }
}

#[inline(always)]
pub(crate) fn arguments_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::object::Arguments
    }
}

#[inline(always)]
pub(crate) fn object_error_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::object::ObjectError
    }
}

#[inline(always)]
pub(crate) fn encode_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::codegen::Encode
    }
}

#[inline(always)]
pub(crate) fn value_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::value::Value
    }
}

#[inline(always)]
pub(crate) fn value_map_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::value::ValueMap
    }
}

#[inline(always)]
pub(crate) fn value_error_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::value::ValueError
    }
}

#[inline(always)]
pub(crate) fn to_value_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::value::ToValue
    }
}

#[inline(always)]
pub(crate) fn from_value_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::value::FromValue
    }
}

#[inline(always)]
pub(crate) fn get_type_meta_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::registry::GetTypeMeta
    }
}

#[inline(always)]
pub(crate) fn type_meta_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::registry::TypeMeta
    }
}

#[inline(always)]
pub(crate) fn from_type_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::registry::FromType
    }
}

#[inline(always)]
pub(crate) fn type_trait_allocate_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::registry::TypeTraitAllocate
    }
}

#[inline(always)]
pub(crate) fn type_trait_construct_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::registry::TypeTraitConstruct
    }
}

#[inline(always)]
pub(crate) fn macro_exports_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::__macro_exports
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(cp_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #cp_reflect_path::__macro_exports::auto_register
    }
}
