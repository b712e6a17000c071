extern crate proc_macro;

use proc_macro::TokenStream;

/// Implements `pgorm::Document` for a struct with named fields.
///
/// ```ignore
/// #[derive(Serialize, Deserialize, Document)]
/// #[table = "widgets"]
/// #[index("name")]
/// #[gin_index("tag")]
/// struct Widget {
///     #[key]
///     id: String,
///     name: String,
///     tag: String,
/// }
/// ```
#[proc_macro_derive(Document, attributes(key, table, index, gin_index))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    match pgorm_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
