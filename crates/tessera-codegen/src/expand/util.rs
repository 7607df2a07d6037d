use proc_macro2::TokenStream;
use quote::ToTokens;

pub(crate) fn int(v: usize) -> TokenStream {
    proc_macro2::Literal::usize_unsuffixed(v).into_token_stream()
}

/// Creates a new identifier prefixed with `__tessera_` to avoid name
/// collisions with user-defined items in generated code.
pub(crate) fn ident(name: &str) -> syn::Ident {
    quote::format_ident!("__tessera_{name}")
}
