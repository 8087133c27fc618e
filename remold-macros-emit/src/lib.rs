//! Emission for `#[derive(Model)]`.

use proc_macro2::TokenStream;
use remold_macros_parse::parse_model_struct;

mod process_struct;
pub use process_struct::*;

/// Expands the full derive input into the `unsafe impl Model` block.
pub fn model_derive(input: TokenStream) -> TokenStream {
    process_struct(parse_model_struct(input))
}
