//! Capability export macro.
//!
//! This module contains:
//! - `#[capability]` - Attribute macro submitting a function as an `Export`

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Ident, ItemFn, LitStr, Token, parse::Parse, parse_macro_input};

/// Arguments for the `#[capability]` macro.
pub(crate) struct CapabilityArgs {
    pub module: Option<LitStr>,
    pub attribute: Option<LitStr>,
}

impl Parse for CapabilityArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut module = None;
        let mut attribute = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "module" => module = Some(input.parse()?),
                "attribute" => attribute = Some(input.parse()?),
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(CapabilityArgs { module, attribute })
    }
}

/// Implementation of the `#[capability]` macro.
pub fn capability_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as CapabilityArgs);
    let input = parse_macro_input!(item as ItemFn);

    match expand(args, input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: CapabilityArgs, input: ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    let fn_name = &input.sig.ident;

    let Some(module) = args.module else {
        return Err(syn::Error::new_spanned(
            fn_name,
            "missing module path: #[capability(module = \"...\")]",
        ));
    };

    if input.sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            &input.sig.asyncness,
            "Capability functions cannot be async",
        ));
    }

    if !input.sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.sig.generics,
            "Capability functions cannot be generic",
        ));
    }

    if input.sig.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            &input.sig.inputs,
            "Capability functions take exactly one argument: fn(args: Args)",
        ));
    }

    let attribute = args
        .attribute
        .unwrap_or_else(|| LitStr::new(&fn_name.to_string(), fn_name.span()));
    let factory = format_ident!("__capload_export_{}", fn_name);

    Ok(quote! {
        #input

        #[doc(hidden)]
        #[allow(non_snake_case)]
        fn #factory() -> ::capload::Handler {
            ::capload::Handler::new(#fn_name)
        }

        ::capload::inventory::submit! {
            ::capload::import::Export::new(#module, #attribute, #factory)
        }
    })
}
