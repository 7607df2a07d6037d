use super::{Column, Diagnostics, Generator};

use syn::spanned::Spanned;

#[derive(Debug)]
pub(crate) struct Field {
    /// Index of the field in the struct declaration
    pub(crate) index: usize,

    pub(crate) ident: syn::Ident,

    /// Field name as written
    pub(crate) name: String,

    pub(crate) ty: syn::Type,

    pub(crate) kind: FieldKind,

    pub(crate) attrs: FieldAttr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Persisted,

    /// `#[transient]`: neither persisted nor serialized, loaded as `Default`
    Transient,

    /// `PhantomData` markers
    Synthetic,

    /// `#[parent]`: an ancestor whose fields are flattened after the own ones
    Parent,
}

#[derive(Debug, Default)]
pub(crate) struct FieldAttr {
    /// Set if the field is annotated with `#[key]`
    pub(crate) key: Option<syn::Attribute>,

    pub(crate) auto: Option<(syn::Attribute, Generator)>,

    pub(crate) column: Option<(syn::Attribute, Column)>,

    pub(crate) relation: Option<syn::Attribute>,

    pub(crate) embedded: Option<syn::Attribute>,

    /// Date format pattern: `#[format("yyyy-MM-dd")]`
    pub(crate) format: Option<syn::LitStr>,

    /// Ordinal index: `#[at(0)]`
    pub(crate) at: Option<syn::LitInt>,

    /// `#[map_key = "k"]`
    pub(crate) map_key: Option<syn::LitStr>,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field, index: usize) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "fields must be named"));
        };

        let mut errs = Diagnostics::new();
        let mut attrs = FieldAttr::default();
        let mut transient: Option<&syn::Attribute> = None;
        let mut parent: Option<&syn::Attribute> = None;

        for attr in &field.attrs {
            if attr.path().is_ident("key") {
                if attrs.key.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[key] attribute"));
                } else {
                    attrs.key = Some(attr.clone());
                }
            } else if attr.path().is_ident("auto") {
                if attrs.auto.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[auto] attribute"));
                } else {
                    attrs.auto = Some((attr.clone(), Generator::from_ast(attr)?));
                }
            } else if attr.path().is_ident("column") {
                if attrs.column.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[column] attribute"));
                } else {
                    attrs.column = Some((attr.clone(), Column::from_ast(attr)?));
                }
            } else if attr.path().is_ident("relation") {
                if attrs.relation.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[relation] attribute"));
                } else {
                    attrs.relation = Some(attr.clone());
                }
            } else if attr.path().is_ident("embedded") {
                if attrs.embedded.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[embedded] attribute"));
                } else {
                    attrs.embedded = Some(attr.clone());
                }
            } else if attr.path().is_ident("format") {
                if attrs.format.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[format] attribute"));
                } else {
                    attrs.format = Some(attr.parse_args()?);
                }
            } else if attr.path().is_ident("at") {
                if attrs.at.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[at] attribute"));
                } else {
                    let lit: syn::LitInt = attr.parse_args()?;
                    if lit.base10_parse::<u16>().is_err() {
                        errs.push(syn::Error::new_spanned(
                            &lit,
                            "#[at] index must be between 0 and 65535",
                        ));
                    }
                    attrs.at = Some(lit);
                }
            } else if attr.path().is_ident("map_key") {
                if attrs.map_key.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[map_key] attribute"));
                } else {
                    attrs.map_key = Some(map_key(attr)?);
                }
            } else if attr.path().is_ident("transient") {
                if transient.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[transient] attribute"));
                } else {
                    transient = Some(attr);
                }
            } else if attr.path().is_ident("parent") {
                if parent.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[parent] attribute"));
                } else {
                    parent = Some(attr);
                }
            }
        }

        if let (Some((attr, _)), None) = (&attrs.auto, &attrs.key) {
            errs.push(syn::Error::new_spanned(attr, "#[auto] requires #[key]"));
        }

        let kind = match (transient, parent) {
            (Some(attr), Some(_)) => {
                errs.push(syn::Error::new_spanned(
                    attr,
                    "a field cannot be both #[transient] and #[parent]",
                ));
                FieldKind::Transient
            }
            (Some(_), None) => FieldKind::Transient,
            (None, Some(_)) => FieldKind::Parent,
            (None, None) if is_phantom(&field.ty) => FieldKind::Synthetic,
            (None, None) => FieldKind::Persisted,
        };

        if kind != FieldKind::Persisted {
            if let Some(span) = attrs.first_marker() {
                errs.push(syn::Error::new(
                    span,
                    "persistence attributes apply to persisted fields only",
                ));
            }
        }

        errs.finish()?;

        Ok(Field {
            index,
            ident: ident.clone(),
            name: ident.to_string().trim_start_matches("r#").to_string(),
            ty: field.ty.clone(),
            kind,
            attrs,
        })
    }
}

impl FieldAttr {
    fn first_marker(&self) -> Option<proc_macro2::Span> {
        self.key
            .as_ref()
            .or(self.auto.as_ref().map(|(attr, _)| attr))
            .or(self.column.as_ref().map(|(attr, _)| attr))
            .or(self.relation.as_ref())
            .or(self.embedded.as_ref())
            .map(|attr| attr.span())
            .or(self.format.as_ref().map(|lit| lit.span()))
            .or(self.at.as_ref().map(|lit| lit.span()))
            .or(self.map_key.as_ref().map(|lit| lit.span()))
    }
}

fn map_key(attr: &syn::Attribute) -> syn::Result<syn::LitStr> {
    let syn::Meta::NameValue(meta) = &attr.meta else {
        return Err(syn::Error::new_spanned(attr, "expected `map_key = \"key\"`"));
    };

    match &meta.value {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Str(lit),
            ..
        }) => Ok(lit.clone()),
        _ => Err(syn::Error::new_spanned(attr, "expected `map_key = \"key\"`")),
    }
}

fn is_phantom(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "PhantomData"),
        _ => false,
    }
}
