use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ObjectMeta;
use crate::path::fp::{BoxFP, CloneFP, ResultFP};

/// Generate `ToValue` and `FromValue`, so that objects can be fields of other objects.
pub(crate) fn impl_value_conversion(meta: &ObjectMeta) -> TokenStream {
    let cp_reflect_path = meta.cp_reflect_path();
    let value_ = crate::path::value_(cp_reflect_path);
    let value_error_ = crate::path::value_error_(cp_reflect_path);
    let to_value_ = crate::path::to_value_(cp_reflect_path);
    let from_value_ = crate::path::from_value_(cp_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(cp_reflect_path);

    let ident = meta.ident();

    quote! {
        impl #to_value_ for #ident {
            #[inline]
            fn to_value(&self) -> #ResultFP<#value_, #value_error_> {
                #ResultFP::Ok(#value_::Object(#BoxFP::new(#CloneFP::clone(self))))
            }
        }

        impl #from_value_ for #ident {
            #[inline]
            fn from_value(value: #value_) -> #ResultFP<Self, #value_error_> {
                #macro_exports_::take_object::<Self>(value)
            }
        }
    }
}
