/// How a key field gets its value, from `#[auto]` / `#[auto(increment)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Generator {
    AutoIncrement,
}

impl Generator {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Self> {
        match attr.meta {
            syn::Meta::Path(_) => Ok(Self::AutoIncrement),
            _ => attr.parse_args(),
        }
    }
}

mod kw {
    syn::custom_keyword!(increment);
}

impl syn::parse::Parse for Generator {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(kw::increment) {
            let _: kw::increment = input.parse()?;
            Ok(Self::AutoIncrement)
        } else {
            Err(lookahead.error())
        }
    }
}
