//! Same as `foreign_static_method` except that the first argument is the
//! instance the method was called on. It has to be a reference to the
//! foreign type, `&T` borrows the instance and `&mut T` borrows it mutably.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, FnArg, ItemFn, Type};

use crate::shim::{bind_crate, read_arguments};

pub fn foreign_method(mut input: ItemFn) -> syn::Result<TokenStream> {
    let name = input.sig.ident.clone();
    let original_function_name = format_ident!("__bind_internal_{}", name);
    input.sig.ident = original_function_name.clone();

    let bind = bind_crate();
    let vis = &input.vis;

    let receiver = match input.sig.inputs.first() {
        Some(FnArg::Typed(pattern)) => match &*pattern.ty {
            Type::Reference(reference) => reference.clone(),
            ty => {
                return Err(syn::Error::new(
                    ty.span(),
                    "The receiver of a foreign method has to be a reference to the foreign type",
                ))
            }
        },
        Some(receiver @ FnArg::Receiver(_)) => {
            return Err(syn::Error::new(
                receiver.span(),
                "Foreign methods are free functions, take the instance as the first argument instead of self",
            ))
        }
        None => {
            return Err(syn::Error::new(
                input.sig.span(),
                "A foreign method needs the instance as its first argument",
            ))
        }
    };
    let receiver_type = &receiver.elem;
    let (borrow, binding, reborrow) = if receiver.mutability.is_some() {
        (quote!(borrow_mut), quote!(mut instance), quote!(&mut *instance))
    } else {
        (quote!(borrow), quote!(instance), quote!(&*instance))
    };

    let args = read_arguments(&bind, input.sig.inputs.iter().skip(1), 1)?;
    let arg_names = args.iter().map(|x| &x.0);
    let arg_get_slot = args.iter().map(|x| &x.1);

    Ok(quote!(
        #input

        #[allow(clippy::let_unit_value)]
        #vis fn #name<V: #bind::VmUserData>(
            context: &mut #bind::Context<'_, V, #bind::context::Foreign>
        ) {
            #(#arg_get_slot)*
            let receiver = match context.get_foreign::<#receiver_type>(0) {
                Ok(receiver) => receiver,
                Err(error) => {
                    context.abort(error.to_string());
                    return;
                }
            };
            let result = {
                let #binding = match receiver.#borrow() {
                    Ok(instance) => instance,
                    Err(error) => {
                        context.abort(error.to_string());
                        return;
                    }
                };
                #original_function_name(#reborrow, #(#arg_names),*)
            };
            #bind::SetValue::set_slot(&result, context, 0);
        }
    ))
}
