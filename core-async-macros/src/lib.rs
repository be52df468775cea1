//! Attribute macros backing `#[core_async::main]` and `#[core_async::test]`.
//!
//! Both rewrite an `async fn` into a synchronous function whose body is
//! driven by `core_async::runtime::block_on`, so callers never name Tokio.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand(attr, item, EntryPoint::Test)
}

#[proc_macro_attribute]
pub fn main(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand(attr, item, EntryPoint::Main)
}

#[derive(Clone, Copy)]
enum EntryPoint {
    Test,
    Main,
}

fn expand(attr: TokenStream, item: TokenStream, entry: EntryPoint) -> TokenStream {
    if !attr.is_empty() {
        let tokens = TokenStream2::from(attr);
        return syn::Error::new_spanned(tokens, "core_async entry-point macros take no arguments")
            .to_compile_error()
            .into();
    }

    let input = parse_macro_input!(item as ItemFn);

    if input.sig.asyncness.is_none() {
        return syn::Error::new_spanned(
            input.sig.fn_token,
            "core_async entry-point macros require an `async fn`",
        )
        .to_compile_error()
        .into();
    }

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = input;

    let mut sync_sig = sig;
    sync_sig.asyncness = None;

    let test_attr = match entry {
        EntryPoint::Test => quote!(#[test]),
        EntryPoint::Main => quote!(),
    };

    quote! {
        #(#attrs)*
        #test_attr
        #vis #sync_sig {
            core_async::runtime::block_on(async move #block)
        }
    }
    .into()
}
