mod expand;
mod schema;

use proc_macro2::TokenStream;

pub fn generate(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::Item = syn::parse2(input)?;

    match item {
        syn::Item::Struct(item) => {
            let model = schema::Model::from_ast(&item)?;
            Ok(expand::model(&model))
        }
        syn::Item::Enum(item) => {
            let enumeration = schema::Enumeration::from_ast(&item)?;
            Ok(expand::enumeration(&enumeration))
        }
        item => Err(syn::Error::new_spanned(
            item,
            "Reflect can only be derived for structs and enums",
        )),
    }
}
