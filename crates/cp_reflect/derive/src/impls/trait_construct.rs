use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ObjectMeta;
use crate::path::fp::ResultFP;

/// Generate implementation codes for `Construct`
///
/// Positional arguments bind fields in declaration order.
pub(crate) fn impl_trait_construct(meta: &ObjectMeta) -> TokenStream {
    let cp_reflect_path = meta.cp_reflect_path();
    let construct_ = crate::path::construct_(cp_reflect_path);
    let arguments_ = crate::path::arguments_(cp_reflect_path);
    let object_error_ = crate::path::object_error_(cp_reflect_path);
    let type_path_ = crate::path::type_path_(cp_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(cp_reflect_path);

    let ident = meta.ident();
    let idents = meta.field_idents();
    let names = meta.field_names();
    let build_self = meta.self_from_locals();

    quote! {
        impl #construct_ for #ident {
            #[allow(unused_mut, unused_variables)]
            fn construct(__arguments: #arguments_) -> #ResultFP<Self, #object_error_> {
                let __type_path = <Self as #type_path_>::type_path();
                let mut __attributes = __arguments.bind(__type_path, &[#(#names),*])?;
                #(
                    let #idents = #macro_exports_::take_attribute(&mut __attributes, __type_path, #names)?;
                )*
                #ResultFP::Ok(#build_self)
            }
        }
    }
}
