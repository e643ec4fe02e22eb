use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Expr, Ident, LitInt, LitStr, Token,
};

/// A method name with an optional parameter list. `params` is `None` for
/// getters, which are called without parentheses.
#[derive(Debug)]
pub struct ToSignatureInput {
    name: Ident,
    params: Option<usize>,
    is_setter: bool,
}

// `name(a, b)` or `name`
impl Parse for ToSignatureInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name = input.parse()?;
        let params = if input.peek(syn::token::Paren) {
            let content;
            parenthesized!(content in input);
            Some(Punctuated::<Expr, Token![,]>::parse_terminated(&content)?.len())
        } else {
            None
        };

        Ok(Self {
            name,
            params,
            is_setter: false,
        })
    }
}

impl ToSignatureInput {
    /// `name, 2` or `name`
    pub fn parse_call_signature(input: ParseStream) -> syn::Result<Self> {
        let name = input.parse()?;
        let params = if input.parse::<Option<Token![,]>>()?.is_some() {
            Some(input.parse::<LitInt>()?.base10_parse()?)
        } else {
            None
        };

        Ok(Self {
            name,
            params,
            is_setter: false,
        })
    }

    /// `name`, a setter always takes the new value
    pub fn parse_setter_signature(input: ParseStream) -> syn::Result<Self> {
        Ok(Self {
            name: input.parse()?,
            params: Some(1),
            is_setter: true,
        })
    }
}

pub fn create_signature(data: ToSignatureInput) -> TokenStream {
    let mut signature = data.name.to_string();
    if data.is_setter {
        signature.push('=');
    }
    if let Some(count) = data.params {
        signature.push('(');
        signature.push_str(&vec!["_"; count].join(","));
        signature.push(')');
    }

    let signature = LitStr::new(&signature, data.name.span());
    quote!(#signature)
}

#[cfg(test)]
mod test {
    use super::{create_signature, ToSignatureInput};
    use syn::parse::{Parse, ParseStream, Parser};

    fn signature(input: &str, parser: fn(ParseStream) -> syn::Result<ToSignatureInput>) -> String {
        let data = parser.parse_str(input).unwrap();
        create_signature(data).to_string()
    }

    #[test]
    fn setters_take_one_argument() {
        assert_eq!(
            signature("title", ToSignatureInput::parse_setter_signature),
            "\"title=(_)\""
        );
    }

    #[test]
    fn call_signatures_count_params() {
        assert_eq!(
            signature("addNumber, 1", ToSignatureInput::parse_call_signature),
            "\"addNumber(_)\""
        );
        assert_eq!(
            signature("getValue, 0", ToSignatureInput::parse_call_signature),
            "\"getValue()\""
        );
        assert_eq!(
            signature("title", ToSignatureInput::parse_call_signature),
            "\"title\""
        );
    }

    #[test]
    fn arguments_are_only_counted() {
        assert_eq!(
            signature("add(1, vec![2.0], \"three\")", <ToSignatureInput as Parse>::parse),
            "\"add(_,_,_)\""
        );
    }
}
