use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    Error, Generics, Item,
};

#[derive(Default)]
pub(crate) struct LifetimeArgs {}

impl Parse for LifetimeArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let args = LifetimeArgs::default();

        if !input.is_empty() {
            return Err(input.error("unexpected attribute argument, lifetime attributes take none"));
        }

        Ok(args)
    }
}

pub(crate) fn expand(name: &str, LifetimeArgs {}: LifetimeArgs, item: Item) -> syn::Result<TokenStream> {
    let generics = match &item {
        Item::Struct(item) => &item.generics,
        Item::Enum(item) => &item.generics,
        Item::Union(item) => &item.generics,
        _ => {
            return Err(Error::new_spanned(
                &item,
                format!("#[{name}] can only be used on `struct`, `enum` or `union` declarations"),
            ))
        }
    };
    check_generics(name, generics)?;

    Ok(quote! { #item })
}

fn check_generics(name: &str, generics: &Generics) -> syn::Result<()> {
    if generics.params.is_empty() {
        return Ok(());
    }
    Err(Error::new_spanned(
        generics,
        format!("#[{name}] can't be used on generic types, register a concrete type instead"),
    ))
}
