extern crate proc_macro;

use quote::ToTokens;
use syn::{parse_macro_input, DeriveInput};

mod attr;
mod derive;

use derive::Derive;

/// Implements `structcopier::Reflect` and `structcopier::Struct` for a
/// struct with named fields.
#[proc_macro_derive(Reflect, attributes(copier))]
#[proc_macro_error::proc_macro_error]
pub fn derive_reflect(tokens: proc_macro::TokenStream) -> proc_macro::TokenStream {
  let input = parse_macro_input!(tokens as DeriveInput);
  Derive::from_derive_input(&input).into_token_stream().into()
}
