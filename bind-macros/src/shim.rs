use proc_macro2::{Ident, Span, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, FnArg, LitInt};

/// Path to the runtime crate as seen from the crate being expanded
pub fn bind_crate() -> TokenStream {
    match crate_name("bind") {
        Ok(FoundCrate::Itself) => quote!(crate),
        Ok(FoundCrate::Name(name)) => {
            let name = Ident::new(&name, Span::call_site());
            quote!(::#name)
        }
        Err(_) => quote!(::bind),
    }
}

/// For every argument generate a statement reading it out of its slot,
/// starting at `first_slot`. A value that can't be read aborts the call.
pub fn read_arguments<'a>(
    bind: &TokenStream,
    arguments: impl Iterator<Item = &'a FnArg>,
    first_slot: usize,
) -> syn::Result<Vec<(Ident, TokenStream)>> {
    arguments
        .enumerate()
        .map(|(i, argument)| {
            if let FnArg::Typed(pattern) = argument {
                let arg_name = quote::format_ident!("__arg_{}", i);
                let arg_type = &pattern.ty;
                let slot = LitInt::new(&(i + first_slot).to_string(), Span::call_site());

                let get_slot = quote_spanned!(
                    pattern.span() =>
                        let #arg_name = match <#arg_type as #bind::GetValue>::try_get_slot(
                            context,
                            #slot
                        ) {
                            Ok(value) => value,
                            Err(error) => {
                                context.abort(error.to_string());
                                return;
                            }
                        };
                );

                Ok((arg_name, get_slot))
            } else {
                Err(syn::Error::new(
                    argument.span(),
                    "Foreign methods are free functions, take the instance as the first argument instead of self",
                ))
            }
        })
        .collect()
}
