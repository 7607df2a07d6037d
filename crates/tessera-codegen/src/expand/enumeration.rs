use crate::schema::Enumeration;

use proc_macro2::TokenStream;
use quote::quote;

pub(super) fn expand(enumeration: &Enumeration, support: &TokenStream) -> TokenStream {
    let ident = &enumeration.ident;
    let name = &enumeration.name;
    let variants = &enumeration.variants;
    let variant_names: Vec<String> = variants.iter().map(|variant| variant.to_string()).collect();

    quote! {
        impl #support::Reflect for #ident {
            fn ty() -> #support::Type {
                static DESCRIPTOR: #support::EnumDescriptor =
                    #support::EnumDescriptor::new(#name, &[#( #variant_names ),*]);

                #support::Type::Enum(&DESCRIPTOR)
            }

            fn to_value(&self) -> #support::Value {
                let name = match self {
                    #( #ident::#variants => #variant_names, )*
                };
                #support::Value::Enum(#support::String::from(name))
            }

            fn from_value(value: #support::Value) -> #support::Result<Self> {
                let name = #support::variant_name(#name, value)?;
                match name.as_str() {
                    #( #variant_names => #support::Result::Ok(#ident::#variants), )*
                    _ => #support::Result::Err(#support::unknown_variant(#name, &name)),
                }
            }
        }
    }
}
