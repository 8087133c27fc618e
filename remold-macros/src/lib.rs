#![doc = include_str!("../README.md")]

/// Derive the `Model` trait for a struct with named fields.
///
/// Accepts the `#[model(skip)]` field attribute; see the `remold` crate docs.
#[proc_macro_derive(Model, attributes(model))]
pub fn model_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    remold_macros_emit::model_derive(input.into()).into()
}
