//! Fully qualified paths of std items, safe against shadowing in user code.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

macro_rules! define_fp {
    ($($name:ident => $path:path),* $(,)?) => {
        $(
            pub(crate) struct $name;

            impl ToTokens for $name {
                fn to_tokens(&self, tokens: &mut TokenStream) {
                    tokens.extend(quote!($path));
                }
            }
        )*
    };
}

define_fp! {
    OptionFP => ::core::option::Option,
    ResultFP => ::core::result::Result,
    CloneFP => ::core::clone::Clone,
    DefaultFP => ::core::default::Default,
    BoxFP => ::std::boxed::Box,
}
