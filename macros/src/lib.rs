use proc_macro::TokenStream;
use syn_utils::into_macro_output;

#[macro_use]
mod syn_utils;

mod stateful_impl;

#[proc_macro_derive(Stateful, attributes(state, property))]
pub fn derive_stateful(input: TokenStream) -> TokenStream {
    into_macro_output(stateful_impl::derive_stateful(input.into()))
}
