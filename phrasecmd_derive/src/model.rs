use proc_macro2::TokenStream as TokenStream2;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct DeriveValue {
    pub tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        let st = &self.tokens.to_string();
        let ot = &other.tokens.to_string();
        st == ot
    }
}

impl Eq for DeriveValue {}

impl Default for DeriveValue {
    fn default() -> Self {
        Self {
            tokens: TokenStream2::new(),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct IntermediateAttributes {
    pub singletons: HashSet<String>,
    pub pairs: HashMap<String, Vec<DeriveValue>>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeriveGenerics {
    pub impl_generics: DeriveValue,
    pub type_generics: DeriveValue,
    pub where_clause: DeriveValue,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveDescribe {
    pub type_name: syn::Ident,
    pub generics: DeriveGenerics,
    pub description: Option<DeriveValue>,
    pub epilog: Option<DeriveValue>,
    pub usage: Option<DeriveValue>,
    pub arguments: Option<DeriveValue>,
}
