use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::OBJECT_ATTRIBUTE_NAME;

/// The content of all `#[object(...)]` attributes on a type.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `type_path = "a::b::Name"`
    pub type_path: Option<LitStr>,
    /// `construct`: rebuild through the constructor, no `Default` needed.
    pub construct: Option<Span>,
    /// `encode`: the type implements `Encode` itself.
    pub encode: Option<Span>,
    /// `auto_register`
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(OBJECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                let span = meta.path.span();
                if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    let value = lit.value();
                    if !is_type_path(&value) {
                        return Err(meta.error("expected a path like `my_crate::module::Name`"));
                    }
                    Self::set_once(&mut parsed.type_path, lit, &meta)
                } else if meta.path.is_ident("construct") {
                    Self::set_once(&mut parsed.construct, span, &meta)
                } else if meta.path.is_ident("encode") {
                    Self::set_once(&mut parsed.encode, span, &meta)
                } else if meta.path.is_ident("auto_register") {
                    Self::set_once(&mut parsed.auto_register, span, &meta)
                } else {
                    Err(meta.error(
                        "unknown object attribute, expected one of `type_path`, `construct`, `encode`, `auto_register`",
                    ))
                }
            })?;
        }

        Ok(parsed)
    }

    fn set_once<T>(
        slot: &mut Option<T>,
        value: T,
        meta: &syn::meta::ParseNestedMeta<'_>,
    ) -> syn::Result<()> {
        if slot.is_some() {
            return Err(meta.error("duplicate object attribute"));
        }
        *slot = Some(value);
        Ok(())
    }
}

/// A `::` separated path whose segments are non-empty and hold no `:` or
/// whitespace.
fn is_type_path(path: &str) -> bool {
    path.split("::").all(|segment| {
        !segment.is_empty() && !segment.contains(|c: char| c == ':' || c.is_whitespace())
    })
}

#[cfg(test)]
mod tests {
    use super::is_type_path;

    #[test]
    fn type_path_segments_are_non_empty() {
        assert!(is_type_path("Name"));
        assert!(is_type_path("bank::ledger::Entry"));

        for path in ["", "::Name", "bank::", "a::::B", "a:::b", "a:b", "a:: b"] {
            assert!(!is_type_path(path), "{path}");
        }
    }
}
