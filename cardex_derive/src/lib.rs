extern crate proc_macro;

mod expand;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Implements `cardex::data::Card` for a struct with named fields.
///
/// The identity field is the one marked `#[card(id)]`, or the field called `id`.
/// Every field becomes reachable through `Card::get` under its own name.
#[proc_macro_derive(Card, attributes(card))]
pub fn card(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = parse_macro_input!(input);
    expand::derive_card(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
