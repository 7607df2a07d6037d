#[derive(Debug)]
pub(crate) struct Enumeration {
    pub(crate) ident: syn::Ident,

    /// Simple type name
    pub(crate) name: String,

    /// Unit variants in declaration order
    pub(crate) variants: Vec<syn::Ident>,
}

impl Enumeration {
    pub(crate) fn from_ast(ast: &syn::ItemEnum) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "generic types cannot derive Reflect",
            ));
        }

        if ast.variants.is_empty() {
            return Err(syn::Error::new_spanned(
                ast,
                "Reflect cannot be derived for enums without variants",
            ));
        }

        let mut variants = vec![];
        for variant in &ast.variants {
            if !matches!(variant.fields, syn::Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    variant,
                    "Reflect enums must have unit variants only",
                ));
            }
            variants.push(variant.ident.clone());
        }

        Ok(Enumeration {
            ident: ast.ident.clone(),
            name: ast.ident.to_string(),
            variants,
        })
    }
}
