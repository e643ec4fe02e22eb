//! # Goals
//! Note here the first checkbox here is implementation and the second one is tested
//!
//! - Create a wrapper around a function that reads every argument from its
//!     slot and writes the returned value back to slot 0 [x] [x]
//!
//! - Abort the call instead of panicking when an argument has the wrong
//!     type [x] [x]
//!
//! - Support results, an `Err` aborts the call with its message [x] [x]
//!
//! - Make sure all foreign methods for a class are registered at compile time
//!     IE: Have it be a compiler error if there are any foreign methods that haven't
//!     been bound [ ] [ ]
//!
//! - Make sure to respect visibility [x] [ ]
//!
//! - Have good error messages
//!   Reject methods that take self [x] [x]
//!   Have errors saying which argument has an invalid type [x] [ ]

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemFn;

use crate::shim::{bind_crate, read_arguments};

pub fn foreign_static_method(mut input: ItemFn) -> syn::Result<TokenStream> {
    let name = input.sig.ident.clone();
    let original_function_name = format_ident!("__bind_internal_{}", name);
    input.sig.ident = original_function_name.clone();

    let bind = bind_crate();
    let vis = &input.vis;

    // Slot 0 holds the class so the arguments start at 1
    let args = read_arguments(&bind, input.sig.inputs.iter(), 1)?;
    let arg_names = args.iter().map(|x| &x.0);
    let arg_get_slot = args.iter().map(|x| &x.1);

    Ok(quote!(
        #input

        #[allow(clippy::let_unit_value)]
        #vis fn #name<V: #bind::VmUserData>(
            context: &mut #bind::Context<'_, V, #bind::context::Foreign>
        ) {
            #(#arg_get_slot)*
            let result = #original_function_name(#(#arg_names),*);
            #bind::SetValue::set_slot(&result, context, 0);
        }
    ))
}

#[cfg(test)]
mod test {
    use super::foreign_static_method;
    use syn::parse_quote;

    #[test]
    fn keeps_the_original_under_a_new_name() {
        let output = foreign_static_method(parse_quote!(
            fn add(a: f64, b: f64) -> f64 {
                a + b
            }
        ))
        .unwrap()
        .to_string();

        assert!(output.contains("fn __bind_internal_add"));
        assert!(output.contains("fn add < V"));
    }

    #[test]
    fn rejects_self() {
        let error = foreign_static_method(parse_quote!(
            fn add(&self, a: f64) -> f64 {
                a
            }
        ))
        .unwrap_err();

        assert!(error.to_string().contains("instead of self"));
    }
}
