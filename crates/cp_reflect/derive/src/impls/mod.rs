// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_construct;
mod trait_get_type_meta;
mod trait_object;
mod trait_type_path;
mod value_conversion;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ObjectMeta;

pub(crate) use auto_register::get_auto_register_impl;
pub(crate) use trait_construct::impl_trait_construct;
pub(crate) use trait_get_type_meta::impl_trait_get_type_meta;
pub(crate) use trait_object::impl_trait_object;
pub(crate) use trait_type_path::impl_trait_type_path;
pub(crate) use value_conversion::impl_value_conversion;

/// Everything `#[derive(Object)]` expands to.
pub(crate) fn impl_object_full(meta: &ObjectMeta) -> TokenStream {
    let type_path_impl = impl_trait_type_path(meta);
    let object_impl = impl_trait_object(meta);
    let construct_impl = impl_trait_construct(meta);
    let get_type_meta_impl = impl_trait_get_type_meta(meta);
    let value_impl = impl_value_conversion(meta);
    let auto_register = get_auto_register_impl(meta);

    quote! {
        #type_path_impl

        const _: () = {
            #object_impl
            #construct_impl
            #get_type_meta_impl
            #value_impl
            #auto_register
        };
    }
}
