mod foreign_method;
mod foreign_static_method;
mod shim;
mod to_signature;

use syn::{parse_macro_input, ItemFn};
use to_signature::{create_signature, ToSignatureInput};

/// Turn a method call into its signature, `add(1, 2)` becomes `"add(_,_)"`
#[proc_macro]
pub fn to_signature(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let data = parse_macro_input!(input as ToSignatureInput);
    create_signature(data).into()
}

/// `call_signature!(add, 2)` becomes `"add(_,_)"`, without a count it's a getter
#[proc_macro]
pub fn call_signature(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let data = parse_macro_input!(input with ToSignatureInput::parse_call_signature);
    create_signature(data).into()
}

/// `setter_signature!(title)` becomes `"title=(_)"`
#[proc_macro]
pub fn setter_signature(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let data = parse_macro_input!(input with ToSignatureInput::parse_setter_signature);
    create_signature(data).into()
}

#[proc_macro_attribute]
pub fn foreign_static_method(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    foreign_static_method::foreign_static_method(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_attribute]
pub fn foreign_method(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    foreign_method::foreign_method(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
