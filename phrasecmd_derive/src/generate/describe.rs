use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::{DeriveDescribe, DeriveGenerics, DeriveValue};

impl TryFrom<DeriveDescribe> for TokenStream2 {
    type Error = syn::Error;

    fn try_from(value: DeriveDescribe) -> Result<Self, Self::Error> {
        let DeriveDescribe {
            type_name,
            generics:
                DeriveGenerics {
                    impl_generics,
                    type_generics,
                    where_clause,
                },
            description,
            epilog,
            usage,
            arguments,
        } = value;
        let impl_generics = impl_generics.tokens;
        let type_generics = type_generics.tokens;
        let where_clause = where_clause.tokens;

        let description = text_method(quote! { description }, description);
        let epilog = text_method(quote! { epilog }, epilog);
        let usage = text_method(quote! { usage }, usage);
        let arguments = match arguments {
            Some(DeriveValue { tokens }) => quote! {
                fn arguments(&self) -> ::phrasecmd::Arguments {
                    ::phrasecmd::Arguments::from(#tokens)
                }
            },
            None => TokenStream2::new(),
        };

        Ok(quote! {
            impl #impl_generics ::phrasecmd::Describe for #type_name #type_generics #where_clause {
                fn qualified_name(&self) -> &'static str {
                    concat!(module_path!(), "::", stringify!(#type_name))
                }
                #description
                #epilog
                #usage
                #arguments
            }
        })
    }
}

fn text_method(name: TokenStream2, value: Option<DeriveValue>) -> TokenStream2 {
    match value {
        Some(DeriveValue { tokens }) => quote! {
            fn #name(&self) -> Option<&str> {
                Some(#tokens)
            }
        },
        None => TokenStream2::new(),
    }
}
