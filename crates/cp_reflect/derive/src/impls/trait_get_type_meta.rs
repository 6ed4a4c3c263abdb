use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use crate::derive_data::ObjectMeta;

/// Generate implementation code for `GetTypeMeta` trait.
///
/// `TypeTraitConstruct` is always inserted; `TypeTraitAllocate` only when the
/// type is rebuilt by allocation (it needs `Default`).
pub(crate) fn impl_trait_get_type_meta(meta: &ObjectMeta) -> TokenStream {
    let cp_reflect_path = meta.cp_reflect_path();
    let get_type_meta_ = crate::path::get_type_meta_(cp_reflect_path);
    let type_meta_ = crate::path::type_meta_(cp_reflect_path);
    let from_type_ = crate::path::from_type_(cp_reflect_path);
    let type_trait_construct_ = crate::path::type_trait_construct_(cp_reflect_path);

    let outer_ = Ident::new("__outer", Span::call_site());

    let mut trait_counter = 1usize;

    let insert_allocate = if meta.attrs().construct.is_none() {
        trait_counter += 1;
        let type_trait_allocate_ = crate::path::type_trait_allocate_(cp_reflect_path);
        quote! {
            #type_meta_::insert_trait::<#type_trait_allocate_>(&mut #outer_, #from_type_::<Self>::from_type());
        }
    } else {
        crate::utils::empty()
    };

    let ident = meta.ident();

    quote! {
        impl #get_type_meta_ for #ident {
            fn get_type_meta() -> #type_meta_ {
                let mut #outer_ = #type_meta_::with_capacity::<Self>(#trait_counter);
                #type_meta_::insert_trait::<#type_trait_construct_>(&mut #outer_, #from_type_::<Self>::from_type());
                #insert_allocate
                #outer_
            }
        }
    }
}
