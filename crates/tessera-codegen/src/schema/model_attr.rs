use super::{Diagnostics, Lifecycle};

/// Tree layout requested with `#[embed(map)]` or `#[embed(list)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Embedding {
    KeyedMap,
    OrdinalList,
}

#[derive(Debug, Default)]
pub(crate) struct ModelAttr {
    /// Optional table name to map the type to
    pub(crate) table: Option<syn::LitStr>,

    pub(crate) embedding: Option<Embedding>,

    /// True if annotated with `#[model]`
    pub(crate) model: bool,

    pub(crate) lifecycle: Vec<Lifecycle>,
}

impl ModelAttr {
    pub(super) fn populate_from_ast(&mut self, attrs: &[syn::Attribute]) -> syn::Result<()> {
        let mut errs = Diagnostics::new();

        for attr in attrs {
            if attr.path().is_ident("table") {
                if self.table.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[table] attribute"));
                    continue;
                }

                match table_name(attr) {
                    Ok(lit) => self.table = Some(lit),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("embed") {
                if self.embedding.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[embed] attribute"));
                    continue;
                }

                match embedding(attr) {
                    Ok(embedding) => self.embedding = Some(embedding),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("model") {
                if self.model {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[model] attribute"));
                } else if !matches!(attr.meta, syn::Meta::Path(_)) {
                    errs.push(syn::Error::new_spanned(attr, "#[model] takes no arguments"));
                } else {
                    self.model = true;
                }
            } else if attr.path().is_ident("lifecycle") {
                match Lifecycle::from_ast(attr) {
                    Ok(lifecycle) => self.lifecycle.push(lifecycle),
                    Err(err) => errs.push(err),
                }
            }
        }

        errs.finish()
    }
}

fn table_name(attr: &syn::Attribute) -> syn::Result<syn::LitStr> {
    let syn::Meta::NameValue(meta) = &attr.meta else {
        return Err(syn::Error::new_spanned(
            attr,
            "expected `table = \"table_name\"`",
        ));
    };

    let syn::Expr::Lit(lit) = &meta.value else {
        return Err(syn::Error::new_spanned(
            attr,
            "expected `table = \"table_name\"`",
        ));
    };

    let syn::Lit::Str(lit) = &lit.lit else {
        return Err(syn::Error::new_spanned(
            attr,
            "expected `table = \"table_name\"`",
        ));
    };

    Ok(lit.clone())
}

fn embedding(attr: &syn::Attribute) -> syn::Result<Embedding> {
    let ident: syn::Ident = attr.parse_args()?;

    if ident == "map" {
        Ok(Embedding::KeyedMap)
    } else if ident == "list" {
        Ok(Embedding::OrdinalList)
    } else {
        Err(syn::Error::new_spanned(
            ident,
            "expected `#[embed(map)]` or `#[embed(list)]`",
        ))
    }
}
