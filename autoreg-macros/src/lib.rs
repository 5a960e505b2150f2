use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use std::env::var_os;
use syn::{parse::Parse, Item};

mod lifetime;

/// Registers the type with one instance per scope.
///
/// The attribute leaves the type unchanged; registrations are generated at build time by `autoreg-codegen`.
#[proc_macro_attribute]
pub fn scoped(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand_with(attr, item, |args, item| lifetime::expand("scoped", args, item))
}

/// Registers the type with one instance for the whole application
#[proc_macro_attribute]
pub fn singleton(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand_with(attr, item, |args, item| lifetime::expand("singleton", args, item))
}

/// Registers the type with a fresh instance per request
#[proc_macro_attribute]
pub fn transient(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand_with(attr, item, |args, item| lifetime::expand("transient", args, item))
}

fn expand_with<F, A, K>(attr: TokenStream, input: TokenStream, f: F) -> TokenStream
where
    F: FnOnce(A, Item) -> syn::Result<K>,
    A: Parse,
    K: ToTokens,
{
    expand(syn::parse::<A>(attr).and_then(|args| f(args, syn::parse(input)?)))
}

fn expand<T>(result: syn::Result<T>) -> TokenStream
where
    T: ToTokens,
{
    match result {
        Ok(tokens) => {
            let tokens = (quote! { #tokens }).into();
            if var_os("MACROS_DEBUG").is_some() {
                eprintln!("{tokens}");
            }
            tokens
        }
        Err(err) => err.into_compile_error().into(),
    }
}
