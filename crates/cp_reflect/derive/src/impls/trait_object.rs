use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::ObjectMeta;
use crate::path::fp::{BoxFP, CloneFP, OptionFP, ResultFP};

/// Generate implementation codes for `Object`
pub(crate) fn impl_trait_object(meta: &ObjectMeta) -> TokenStream {
    let cp_reflect_path = meta.cp_reflect_path();
    let object_ = crate::path::object_(cp_reflect_path);
    let construction_ = crate::path::construction_(cp_reflect_path);
    let object_error_ = crate::path::object_error_(cp_reflect_path);
    let value_ = crate::path::value_(cp_reflect_path);
    let value_map_ = crate::path::value_map_(cp_reflect_path);
    let type_path_ = crate::path::type_path_(cp_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(cp_reflect_path);

    let ident = meta.ident();
    let idents = meta.field_idents();
    let names = meta.field_names();
    let count = idents.len();
    let build_self = meta.self_from_locals();

    let construction = if meta.attrs().construct.is_some() {
        quote! { #construction_::Construct }
    } else {
        quote! { #construction_::Allocate }
    };

    let as_encode = match meta.attrs().encode {
        Some(span) => {
            let encode_ = crate::path::encode_(cp_reflect_path);
            quote_spanned! { span =>
                #[inline]
                fn as_encode(&self) -> #OptionFP<&dyn #encode_> {
                    #OptionFP::Some(self)
                }
            }
        }
        None => crate::utils::empty(),
    };

    quote! {
        impl #object_ for #ident {
            #[inline]
            fn construction(&self) -> #construction_ {
                #construction
            }

            #[allow(unused_mut, unused_variables)]
            fn attributes(&self) -> #ResultFP<#OptionFP<#value_map_>, #object_error_> {
                let __type_path = <Self as #type_path_>::type_path();
                let mut __attributes = <#value_map_>::with_capacity_and_hasher(
                    #count,
                    ::core::default::Default::default(),
                );
                #(
                    __attributes.insert(
                        <#value_ as ::core::convert::From<&str>>::from(#names),
                        #macro_exports_::attribute_value(&self.#idents, __type_path, #names)?,
                    );
                )*
                #ResultFP::Ok(#OptionFP::Some(__attributes))
            }

            #[allow(unused_mut)]
            fn set_attributes(&mut self, mut __attributes: #value_map_) -> #ResultFP<(), #object_error_> {
                let __type_path = <Self as #type_path_>::type_path();
                #(
                    let #idents = #macro_exports_::take_attribute(&mut __attributes, __type_path, #names)?;
                )*
                #macro_exports_::reject_unknown(&__attributes, __type_path)?;
                *self = #build_self;
                #ResultFP::Ok(())
            }

            #as_encode

            #[inline]
            fn clone_object(&self) -> #BoxFP<dyn #object_> {
                #BoxFP::new(#CloneFP::clone(self))
            }

            #[allow(unused_variables)]
            fn object_eq(&self, other: &dyn #object_) -> bool {
                other
                    .downcast_ref::<Self>()
                    .is_some_and(|__other| true #(&& #macro_exports_::field_eq(&self.#idents, &__other.#idents))*)
            }
        }
    }
}
