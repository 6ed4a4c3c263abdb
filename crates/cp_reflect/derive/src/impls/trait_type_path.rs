use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ObjectMeta;
use crate::path::fp::OptionFP;

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(meta: &ObjectMeta) -> TokenStream {
    let trait_type_path_ = crate::path::type_path_(meta.cp_reflect_path());
    let ident = meta.ident();
    let (type_path, type_name, module_path) = meta.path_exprs();

    quote! {
        impl #trait_type_path_ for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> #OptionFP<&'static str> {
                #module_path
            }
        }
    }
}
