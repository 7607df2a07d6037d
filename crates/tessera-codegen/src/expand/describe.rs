use super::{util, Expand};
use crate::schema::{Embedding, Field, FieldKind, Generator};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_describe_impl(&self) -> TokenStream {
        let support = &self.support;
        let model_ident = &self.model.ident;
        let name = &self.model.name;

        let table = self.model.attrs.table.as_ref().map(|table| {
            quote!(.table(#table))
        });

        let embedding = self.model.attrs.embedding.map(|embedding| match embedding {
            Embedding::KeyedMap => quote!(.embedding(#support::Embedding::KeyedMap)),
            Embedding::OrdinalList => quote!(.embedding(#support::Embedding::OrdinalList)),
        });

        let model = self.model.attrs.model.then(|| quote!(.model()));

        let fields = self
            .model
            .fields
            .iter()
            .filter(|field| field.kind != FieldKind::Parent)
            .map(|field| self.expand_field_descriptor(field));

        let (method_fns, methods) = self.expand_lifecycle_methods();

        let (parent_fn, parent) = match self.model.parent_field() {
            Some(field) => {
                let field_ident = &field.ident;
                let ty = &field.ty;
                let project = util::ident("project_parent");

                (
                    Some(quote! {
                        fn #project(
                            this: &mut dyn #support::Any,
                        ) -> #support::Option<&mut dyn #support::Any> {
                            match this.downcast_mut::<#model_ident>() {
                                #support::Option::Some(this) => {
                                    #support::Option::Some(&mut this.#field_ident as &mut dyn #support::Any)
                                }
                                #support::Option::None => #support::Option::None,
                            }
                        }
                    }),
                    Some(quote!(.parent(#support::TypeRef::of::<#ty>(), #project))),
                )
            }
            None => (None, None),
        };

        quote! {
            impl #support::Describe for #model_ident {
                fn descriptor() -> &'static #support::TypeDescriptor {
                    static DESCRIPTOR: #support::OnceLock<#support::TypeDescriptor> =
                        #support::OnceLock::new();

                    DESCRIPTOR.get_or_init(|| {
                        #( #method_fns )*
                        #parent_fn

                        #support::TypeDescriptor::builder::<#model_ident>(#name)
                            .path(module_path!())
                            #table
                            #embedding
                            #model
                            #( .field(#fields) )*
                            #( .method(#methods) )*
                            #parent
                            .build()
                    })
                }
            }
        }
    }

    fn expand_field_descriptor(&self, field: &Field) -> TokenStream {
        let support = &self.support;
        let name = &field.name;
        let ty = &field.ty;

        match field.kind {
            FieldKind::Transient => {
                return quote! {
                    #support::FieldDescriptor::new(
                        #name,
                        #support::Type::Opaque(#support::type_name::<#ty>()),
                    )
                    .retention(#support::Retention::Transient)
                };
            }
            FieldKind::Synthetic => {
                return quote! {
                    #support::FieldDescriptor::new(
                        #name,
                        #support::Type::Opaque(#support::type_name::<#ty>()),
                    )
                    .retention(#support::Retention::Synthetic)
                };
            }
            FieldKind::Persisted | FieldKind::Parent => {}
        }

        let attrs = &field.attrs;

        let key = attrs.key.as_ref().map(|_| match attrs.auto {
            Some((_, Generator::AutoIncrement)) => {
                quote!(.key(#support::Generator::AutoIncrement))
            }
            None => quote!(.key(#support::Generator::Assigned)),
        });

        let columns = attrs.column.as_ref().map(|(_, column)| {
            let names = &column.names;
            quote!(.columns(&[#( #names ),*]))
        });

        let relation = attrs.relation.as_ref().map(|_| quote!(.relation()));
        let embedded = attrs.embedded.as_ref().map(|_| quote!(.embedded()));
        let format = attrs.format.as_ref().map(|lit| quote!(.format(#lit)));
        let at = attrs.at.as_ref().map(|lit| {
            let index = util::int(lit.base10_parse::<usize>().unwrap_or_default());
            quote!(.at(#index))
        });
        let map_key = attrs.map_key.as_ref().map(|lit| quote!(.map_key(#lit)));

        quote! {
            #support::FieldDescriptor::new(#name, <#ty as #support::Reflect>::ty())
                #key
                #columns
                #relation
                #embedded
                #format
                #at
                #map_key
        }
    }

    fn expand_lifecycle_methods(&self) -> (Vec<TokenStream>, Vec<TokenStream>) {
        let support = &self.support;
        let model_ident = &self.model.ident;

        self.model
            .attrs
            .lifecycle
            .iter()
            .enumerate()
            .map(|(index, lifecycle)| {
                let callback = util::ident(&format!("lifecycle_{index}"));
                let method = &lifecycle.method;
                let method_name = method.to_string();
                let phases = &lifecycle.phases;

                let callback_fn = quote! {
                    fn #callback(this: &mut dyn #support::Any) {
                        if let #support::Option::Some(this) = this.downcast_mut::<#model_ident>() {
                            this.#method();
                        }
                    }
                };

                let descriptor = quote! {
                    #support::MethodDescriptor::new(
                        #method_name,
                        &[#( #support::LifecyclePhase::#phases ),*],
                        #callback,
                    )
                };

                (callback_fn, descriptor)
            })
            .unzip()
    }
}
