/// Explicit column names: `#[column("a", "b")]`.
#[derive(Debug)]
pub(crate) struct Column {
    pub(crate) names: Vec<syn::LitStr>,
}

impl Column {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Column> {
        attr.parse_args()
    }
}

impl syn::parse::Parse for Column {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let names = syn::punctuated::Punctuated::<syn::LitStr, syn::Token![,]>::parse_terminated(input)?;

        if names.is_empty() {
            return Err(syn::Error::new(input.span(), "expected at least one column name"));
        }

        for name in &names {
            if name.value().is_empty() {
                return Err(syn::Error::new_spanned(name, "column name cannot be empty"));
            }
        }

        Ok(Column {
            names: names.into_iter().collect(),
        })
    }
}
