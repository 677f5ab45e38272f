extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveDescribe;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

/// Derive `Describe` for a command type.
///
/// Configured via `#[phrasecmd(description = .., epilog = .., usage = .., arguments = ..)]`.
/// Without an explicit `description`, the first paragraph of the doc comment is used.
#[proc_macro_derive(Describe, attributes(phrasecmd))]
pub fn describe(input: TokenStream) -> TokenStream {
    let derive_input = match syn::parse::<syn::DeriveInput>(input) {
        Ok(derive_input) => derive_input,
        Err(error) => return error.to_compile_error().into(),
    };

    match DeriveDescribe::try_from(derive_input).and_then(TokenStream2::try_from) {
        Ok(token_stream) => token_stream.into(),
        Err(error) => error.to_compile_error().into(),
    }
}
