use super::{Diagnostics, Embedding, Field, FieldKind, ModelAttr};

#[derive(Debug)]
pub(crate) struct Model {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Simple type name
    pub(crate) name: String,

    pub(crate) attrs: ModelAttr,

    /// Fields in declaration order
    pub(crate) fields: Vec<Field>,

    /// Index of the `#[parent]` field, if any
    pub(crate) parent: Option<usize>,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(&ast.fields, "fields must be named"));
        };

        // Generics are not supported yet
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "generic types cannot derive Reflect",
            ));
        }

        let mut attrs = ModelAttr::default();
        let mut fields = vec![];
        let mut errs = Diagnostics::new();

        if let Err(err) = attrs.populate_from_ast(&ast.attrs) {
            errs.push(err);
        }

        for (index, node) in node.named.iter().enumerate() {
            match Field::from_ast(node, index) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        let mut parent = None;
        for field in &fields {
            if field.kind != FieldKind::Parent {
                continue;
            }

            if parent.is_some() {
                errs.push(syn::Error::new_spanned(
                    &field.ident,
                    "only one field can be marked #[parent]",
                ));
            } else {
                parent = Some(field.index);
            }
        }

        if attrs.embedding == Some(Embedding::OrdinalList) {
            let mut taken: Vec<usize> = vec![];

            for field in fields.iter().filter(|f| f.kind == FieldKind::Persisted) {
                let Some(lit) = &field.attrs.at else {
                    errs.push(syn::Error::new_spanned(
                        &field.ident,
                        "fields of an #[embed(list)] type need an #[at(n)] index",
                    ));
                    continue;
                };

                let Ok(at) = lit.base10_parse::<usize>() else {
                    continue;
                };

                if taken.contains(&at) {
                    errs.push(syn::Error::new_spanned(lit, "duplicate #[at] index"));
                } else {
                    taken.push(at);
                }
            }
        }

        errs.finish()?;

        Ok(Model {
            ident: ast.ident.clone(),
            name: ast.ident.to_string(),
            attrs,
            fields,
            parent,
        })
    }

    pub(crate) fn parent_field(&self) -> Option<&Field> {
        self.parent.map(|index| &self.fields[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Generator;

    fn error(item: syn::ItemStruct) -> String {
        Model::from_ast(&item).unwrap_err().to_string()
    }

    #[test]
    fn parses_markers() {
        let model = Model::from_ast(&syn::parse_quote! {
            #[table = "people"]
            #[embed(map)]
            #[lifecycle(pre_insert, post_fetch, call = touch)]
            struct Person {
                #[key]
                #[auto]
                id: i64,

                #[column("mail", "mail_alt")]
                #[map_key = "e"]
                email: String,

                #[transient]
                cache: u32,

                #[parent]
                base: Base,

                _marker: PhantomData<()>,
            }
        })
        .unwrap();

        assert_eq!(model.name, "Person");
        assert_eq!(
            model.attrs.table.as_ref().map(syn::LitStr::value).as_deref(),
            Some("people")
        );
        assert_eq!(model.attrs.embedding, Some(Embedding::KeyedMap));
        assert_eq!(model.attrs.lifecycle[0].method, "touch");
        assert_eq!(model.attrs.lifecycle[0].phases, ["PreInsert", "PostFetch"]);

        assert_eq!(model.parent, Some(3));
        assert_eq!(model.parent_field().map(|f| f.name.as_str()), Some("base"));

        let id = &model.fields[0];
        assert!(id.attrs.key.is_some());
        assert_eq!(
            id.attrs.auto.as_ref().map(|(_, generator)| *generator),
            Some(Generator::AutoIncrement)
        );

        let email = &model.fields[1];
        let (_, column) = email.attrs.column.as_ref().unwrap();
        let columns: Vec<_> = column.names.iter().map(syn::LitStr::value).collect();
        assert_eq!(columns, ["mail", "mail_alt"]);
        assert_eq!(
            email.attrs.map_key.as_ref().map(syn::LitStr::value).as_deref(),
            Some("e")
        );

        assert_eq!(model.fields[2].kind, FieldKind::Transient);
        assert_eq!(model.fields[3].kind, FieldKind::Parent);
        assert_eq!(model.fields[4].kind, FieldKind::Synthetic);
    }

    #[test]
    fn ordinal_list_requires_unique_indices() {
        let msg = error(syn::parse_quote! {
            #[embed(list)]
            struct Point {
                #[at(0)]
                x: i32,
                y: i32,
            }
        });
        assert_eq!(msg, "fields of an #[embed(list)] type need an #[at(n)] index");

        let msg = error(syn::parse_quote! {
            #[embed(list)]
            struct Point {
                #[at(0)]
                x: i32,
                #[at(0)]
                y: i32,
            }
        });
        assert_eq!(msg, "duplicate #[at] index");
    }

    #[test]
    fn relation_accepts_explicit_columns() {
        let model = Model::from_ast(&syn::parse_quote! {
            struct Order {
                #[relation]
                #[column("buyer_id")]
                buyer: Person,
            }
        })
        .unwrap();

        let buyer = &model.fields[0];
        assert!(buyer.attrs.relation.is_some());
        assert!(buyer.attrs.column.is_some());
    }

    #[test]
    fn rejects_oversized_ordinal() {
        let msg = error(syn::parse_quote! {
            #[embed(list)]
            struct Point {
                #[at(18446744073709551615)]
                x: i32,
            }
        });
        assert_eq!(msg, "#[at] index must be between 0 and 65535");
    }

    #[test]
    fn rejects_unsupported_shapes() {
        assert_eq!(
            error(syn::parse_quote!(struct Pair(i64, i64);)),
            "fields must be named"
        );
        assert_eq!(
            error(syn::parse_quote!(struct Wrapper<T> { inner: T })),
            "generic types cannot derive Reflect"
        );
    }

    #[test]
    fn rejects_conflicting_markers() {
        let msg = error(syn::parse_quote! {
            struct Order {
                #[auto]
                id: i64,
            }
        });
        assert_eq!(msg, "#[auto] requires #[key]");

        let msg = error(syn::parse_quote! {
            struct Order {
                #[transient]
                #[key]
                id: i64,
            }
        });
        assert_eq!(msg, "persistence attributes apply to persisted fields only");

        let items: [syn::ItemStruct; 4] = [
            syn::parse_quote! { struct Order { #[transient] #[format("yyyy")] at: u32 } },
            syn::parse_quote! { struct Order { #[transient] #[at(0)] n: u32 } },
            syn::parse_quote! { struct Order { #[transient] #[map_key = "k"] n: u32 } },
            syn::parse_quote! { struct Order { #[key] id: i64, _m: PhantomData<()>, #[parent] #[at(1)] base: Base } },
        ];
        for item in items {
            assert_eq!(error(item), "persistence attributes apply to persisted fields only");
        }

        let msg = error(syn::parse_quote! {
            struct Order {
                #[parent]
                a: A,
                #[parent]
                b: B,
            }
        });
        assert_eq!(msg, "only one field can be marked #[parent]");
    }

    #[test]
    fn rejects_malformed_lifecycle() {
        let msg = error(syn::parse_quote! {
            #[lifecycle(pre_nothing, call = touch)]
            struct Order {}
        });
        assert_eq!(msg, "unknown lifecycle phase `pre_nothing`");

        let msg = error(syn::parse_quote! {
            #[lifecycle(pre_insert)]
            struct Order {}
        });
        assert_eq!(msg, "expected `call = method` in #[lifecycle]");
    }
}
