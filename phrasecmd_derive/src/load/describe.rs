use crate::model::{DeriveDescribe, DeriveGenerics, DeriveValue, IntermediateAttributes};
use proc_macro2::Literal;
use quote::ToTokens;

const ATTRIBUTE: &str = "phrasecmd";
const KEYS: [&str; 4] = ["description", "epilog", "usage", "arguments"];

impl TryFrom<syn::DeriveInput> for DeriveDescribe {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let mut attributes = IntermediateAttributes::default();

        for attribute in &value.attrs {
            if attribute.path().is_ident(ATTRIBUTE) {
                let IntermediateAttributes { singletons, pairs } =
                    IntermediateAttributes::try_from(attribute)?;
                attributes.singletons.extend(singletons);

                for (key, values) in pairs {
                    attributes.pairs.entry(key).or_default().extend(values);
                }
            }
        }

        if let Some(singleton) = attributes.singletons.iter().next() {
            return Err(syn::Error::new(
                value.ident.span(),
                format!("Invalid - `{singleton}` requires a value (ex: `{singleton} = ..`)."),
            ));
        }

        for (key, values) in &attributes.pairs {
            if !KEYS.contains(&key.as_str()) {
                return Err(syn::Error::new(
                    value.ident.span(),
                    format!(
                        "Invalid - unknown attribute `{key}`, expected one of: {}.",
                        KEYS.join(", ")
                    ),
                ));
            }

            if values.len() > 1 {
                return Err(syn::Error::new(
                    value.ident.span(),
                    format!("Invalid - attribute `{key}` may only be specified once."),
                ));
            }
        }

        let mut take = |key: &str| {
            attributes
                .pairs
                .remove(key)
                .and_then(|values| values.into_iter().next())
        };
        let description = take("description").or_else(|| documentation(&value.attrs));
        let epilog = take("epilog");
        let usage = take("usage");
        let arguments = take("arguments");

        let (impl_generics, type_generics, where_clause) = value.generics.split_for_impl();
        let generics = DeriveGenerics {
            impl_generics: DeriveValue {
                tokens: impl_generics.to_token_stream(),
            },
            type_generics: DeriveValue {
                tokens: type_generics.to_token_stream(),
            },
            where_clause: DeriveValue {
                tokens: where_clause.to_token_stream(),
            },
        };

        Ok(DeriveDescribe {
            type_name: value.ident.clone(),
            generics,
            description,
            epilog,
            usage,
            arguments,
        })
    }
}

/// The first paragraph of the doc comment, with its lines joined by a space.
fn documentation(attributes: &[syn::Attribute]) -> Option<DeriveValue> {
    let mut lines: Vec<String> = Vec::default();

    for attribute in attributes {
        if !attribute.path().is_ident("doc") {
            continue;
        }

        if let syn::Meta::NameValue(syn::MetaNameValue {
            value:
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(text),
                    ..
                }),
            ..
        }) = &attribute.meta
        {
            for line in text.value().split('\n') {
                lines.push(line.trim().to_string());
            }
        }
    }

    let paragraph: Vec<String> = lines
        .into_iter()
        .skip_while(String::is_empty)
        .take_while(|line| !line.is_empty())
        .collect();

    if paragraph.is_empty() {
        None
    } else {
        Some(DeriveValue {
            tokens: Literal::string(&paragraph.join(" ")).into_token_stream(),
        })
    }
}
