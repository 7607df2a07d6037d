use super::{util, Expand};
use crate::schema::FieldKind;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_reflect_impl(&self) -> TokenStream {
        let support = &self.support;
        let model_ident = &self.model.ident;
        let to_value_body = self.expand_to_value_body();
        let from_value_body = self.expand_from_value_body();

        quote! {
            impl #support::Reflect for #model_ident {
                fn ty() -> #support::Type {
                    #support::Type::Struct(#support::TypeRef::of::<#model_ident>())
                }

                fn to_value(&self) -> #support::Value {
                    #to_value_body
                }

                fn from_value(value: #support::Value) -> #support::Result<Self> {
                    #from_value_body
                }
            }
        }
    }

    /// Own fields in declaration order, then the parent's flattened fields.
    fn expand_to_value_body(&self) -> TokenStream {
        let support = &self.support;
        let model_ident = &self.model.ident;

        let pushes = self
            .model
            .fields
            .iter()
            .filter(|field| field.kind != FieldKind::Parent)
            .map(|field| {
                let field_ident = &field.ident;
                match field.kind {
                    FieldKind::Persisted => quote! {
                        fields.push(#support::Reflect::to_value(&self.#field_ident));
                    },
                    _ => quote! {
                        fields.push(#support::Value::Null);
                    },
                }
            });

        let parent = self.model.parent_field().map(|field| {
            let field_ident = &field.ident;
            quote! {
                fields.extend(#support::object_fields(#support::Reflect::to_value(&self.#field_ident)));
            }
        });

        quote! {
            let descriptor = <#model_ident as #support::Describe>::descriptor();
            let mut fields = #support::Vec::with_capacity(descriptor.fields.len());
            #( #pushes )*
            #parent
            #support::Value::Object(#support::Object::new(
                #support::TypeRef::of::<#model_ident>(),
                fields,
            ))
        }
    }

    fn expand_from_value_body(&self) -> TokenStream {
        let support = &self.support;
        let model_ident = &self.model.ident;
        let model_name = &self.model.name;

        let loads = self
            .model
            .fields
            .iter()
            .filter(|field| field.kind != FieldKind::Parent)
            .map(|field| {
                let local = util::ident(&format!("field_{}", field.index));
                let name = &field.name;
                let ty = &field.ty;

                match field.kind {
                    FieldKind::Persisted => quote! {
                        let #local = #support::load_field::<#ty>(&mut fields, #model_name, #name)?;
                    },
                    _ => quote! {
                        let #local: #ty = #support::skip_field(&mut fields);
                    },
                }
            });

        let parent = self.model.parent_field().map(|field| {
            let local = util::ident(&format!("field_{}", field.index));
            let ty = &field.ty;
            quote! {
                let #local = #support::load_parent::<#ty>(fields, #model_name)?;
            }
        });

        let init = self.model.fields.iter().map(|field| {
            let field_ident = &field.ident;
            let local = util::ident(&format!("field_{}", field.index));
            quote!(#field_ident: #local)
        });

        quote! {
            let mut fields = #support::unpack::<#model_ident>(value)?;
            #( #loads )*
            #parent
            #support::Result::Ok(#model_ident {
                #( #init ),*
            })
        }
    }
}
