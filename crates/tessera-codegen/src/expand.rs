mod describe;
mod enumeration;
mod reflect;
mod util;

use crate::schema::{Enumeration, Model};

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The type being expanded
    model: &'a Model,

    /// Path prefix for tessera types
    support: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let describe_impl = self.expand_describe_impl();
        let reflect_impl = self.expand_reflect_impl();

        wrap_in_const(quote! {
            #describe_impl
            #reflect_impl
        })
    }
}

pub(super) fn model(model: &Model) -> TokenStream {
    Expand {
        model,
        support: quote!(_tessera::codegen_support),
    }
    .expand()
}

pub(super) fn enumeration(enumeration: &Enumeration) -> TokenStream {
    let support = quote!(_tessera::codegen_support);
    wrap_in_const(enumeration::expand(enumeration, &support))
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use tessera as _tessera;
            #code
        };
    }
}
