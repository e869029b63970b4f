//! Attribute parsing for `#[pint(...)]`.
//!
//! Container attributes go through darling. Field attributes take a bare
//! string literal (the tag), which darling's meta model does not express, so
//! darling forwards them and [`FieldArgs`] parses them with syn.

use darling::{FromDeriveInput, FromField};
use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Generics, Ident, LitStr, Path, Token, Type};

mod kw {
    syn::custom_keyword!(skip);
}

/// Container-level attributes parsed from `#[pint(...)]` on the struct.
#[derive(Debug, Clone, FromDeriveInput)]
#[darling(attributes(pint), supports(struct_named))]
pub struct ContainerAttrs {
    /// The identifier of the type
    pub ident: Ident,

    /// Generic parameters of the type
    pub generics: Generics,

    /// Path to the runtime crate, for re-exports (`#[pint(crate = "path")]`)
    #[darling(default, rename = "crate")]
    pub krate: Option<Path>,
}

impl ContainerAttrs {
    /// The runtime crate path, `::pint` unless overridden.
    pub fn crate_path(&self) -> Path {
        self.krate
            .clone()
            .unwrap_or_else(|| syn::parse_quote!(::pint))
    }
}

/// Field-level data forwarded by darling.
#[derive(Debug, Clone, FromField)]
#[darling(forward_attrs(pint))]
pub struct FieldAttrs {
    /// Field identifier (None for tuple struct fields)
    pub ident: Option<Ident>,

    /// Field type
    pub ty: Type,

    /// Raw `#[pint(...)]` attributes
    pub attrs: Vec<Attribute>,
}

impl FieldAttrs {
    /// Merge every `#[pint(...)]` attribute on the field.
    pub fn args(&self) -> syn::Result<FieldArgs> {
        let mut merged = FieldArgs::default();
        for attr in &self.attrs {
            let args: FieldArgs = attr.parse_args()?;
            if let Some(tag) = args.tag {
                if merged.tag.is_some() {
                    return Err(syn::Error::new(tag.span(), "duplicate pint tag"));
                }
                merged.tag = Some(tag);
            }
            merged.skip |= args.skip;
        }
        Ok(merged)
    }
}

/// Arguments of one field attribute: `#[pint("tag")]`, `#[pint(skip)]`.
#[derive(Debug, Clone, Default)]
pub struct FieldArgs {
    pub tag: Option<LitStr>,
    pub skip: bool,
}

impl Parse for FieldArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = FieldArgs::default();

        while !input.is_empty() {
            let lookahead = input.lookahead1();
            if lookahead.peek(LitStr) {
                let tag: LitStr = input.parse()?;
                if args.tag.is_some() {
                    return Err(syn::Error::new(tag.span(), "duplicate pint tag"));
                }
                args.tag = Some(tag);
            } else if lookahead.peek(kw::skip) {
                input.parse::<kw::skip>()?;
                args.skip = true;
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(args)
    }
}
