use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident};

use crate::derive_data::TypeAttributes;

/// The fields of a supported type.
enum ObjectFields {
    Named(Vec<Ident>),
    Unit,
}

/// Everything needed to generate the impls of one type.
pub(crate) struct ObjectMeta {
    attrs: TypeAttributes,
    ident: Ident,
    fields: ObjectFields,
    cp_reflect_path: syn::Path,
}

impl ObjectMeta {
    /// Parses the derive input.
    ///
    /// With `need_fields == false` (the `TypePath` derive) any struct, enum or
    /// union is accepted; otherwise only named-field and unit structs are.
    pub(crate) fn from_ast(ast: &DeriveInput, need_fields: bool) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "generic types are not supported, a type path must be unique",
            ));
        }

        let fields = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => ObjectFields::Named(
                    named
                        .named
                        .iter()
                        .filter_map(|field| field.ident.clone())
                        .collect(),
                ),
                Fields::Unit => ObjectFields::Unit,
                Fields::Unnamed(unnamed) if need_fields => {
                    return Err(syn::Error::new_spanned(
                        unnamed,
                        "tuple structs are not supported, attributes need names",
                    ));
                }
                Fields::Unnamed(_) => ObjectFields::Unit,
            },
            _ if need_fields => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "`Object` can only be derived for structs",
                ));
            }
            _ => ObjectFields::Unit,
        };

        Ok(Self {
            attrs,
            ident: ast.ident.clone(),
            fields,
            cp_reflect_path: crate::path::cp_reflect(),
        })
    }

    #[inline]
    pub(crate) fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub(crate) fn ident(&self) -> &Ident {
        &self.ident
    }

    #[inline]
    pub(crate) fn cp_reflect_path(&self) -> &syn::Path {
        &self.cp_reflect_path
    }

    /// Field identifiers in declaration order.
    pub(crate) fn field_idents(&self) -> Vec<&Ident> {
        match &self.fields {
            ObjectFields::Named(fields) => fields.iter().collect(),
            ObjectFields::Unit => Vec::new(),
        }
    }

    /// Field names as string literals, in declaration order.
    pub(crate) fn field_names(&self) -> Vec<String> {
        self.field_idents()
            .into_iter()
            .map(|ident| ident.to_string().trim_start_matches("r#").to_owned())
            .collect()
    }

    /// The expression building `Self` from locals named after the fields.
    pub(crate) fn self_from_locals(&self) -> TokenStream {
        match &self.fields {
            ObjectFields::Named(_) => {
                let idents = self.field_idents();
                quote! { Self { #(#idents),* } }
            }
            ObjectFields::Unit => quote! { Self },
        }
    }

    /// `(type_path, type_name, module_path)` expressions.
    ///
    /// A custom path is split at its last `::` at expansion time; the default
    /// path is built from `module_path!()`.
    pub(crate) fn path_exprs(&self) -> (TokenStream, TokenStream, TokenStream) {
        let ident = &self.ident;
        let ident_str = ident.to_string();

        match &self.attrs.type_path {
            Some(lit) => {
                let path = lit.value();
                match path.rsplit_once("::") {
                    Some((module, name)) => (
                        quote! { #lit },
                        quote! { #name },
                        quote! { ::core::option::Option::Some(#module) },
                    ),
                    None => (
                        quote! { #lit },
                        quote! { #lit },
                        quote! { ::core::option::Option::None },
                    ),
                }
            }
            None => (
                quote! { ::core::concat!(::core::module_path!(), "::", #ident_str) },
                quote! { #ident_str },
                quote! { ::core::option::Option::Some(::core::module_path!()) },
            ),
        }
    }
}
