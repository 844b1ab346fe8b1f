use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Derives `From<Enum> for &'static str` and an `as_str` method for unit enums.
///
/// Each variant maps to its snake_case name.
#[proc_macro_derive(IntoStaticStr)]
pub fn into_static_str(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let variants = match input.data {
        Data::Enum(ref data) => &data.variants,
        _ => panic!("IntoStaticStr can only be derived for enums"),
    };

    let match_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        if !matches!(v.fields, Fields::Unit) {
            panic!("IntoStaticStr can only be derived for unit variants");
        }
        let value = to_snake_case(&variant_name.to_string());
        quote! {
            #name::#variant_name => #value
        }
    });

    let expanded = quote! {
        impl #name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    #(#match_arms),*
                }
            }
        }

        impl From<#name> for &'static str {
            fn from(value: #name) -> Self {
                value.as_str()
            }
        }
    };

    TokenStream::from(expanded)
}

fn to_snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
