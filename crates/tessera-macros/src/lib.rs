extern crate proc_macro;

use proc_macro::TokenStream;

#[proc_macro_derive(
    Reflect,
    attributes(
        table, embed, model, lifecycle, key, auto, column, relation, embedded, format, at,
        map_key, transient, parent
    )
)]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    match tessera_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
