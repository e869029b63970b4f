//! Impl block generation for the FormRecord trait.

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::ext::IdentExt;

use crate::ir::RecordIR;

/// Generates `impl FormRecord for Type`.
#[derive(Debug, Default)]
pub struct ImplBlockGenerator;

impl ImplBlockGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate the complete impl block for a record.
    ///
    /// Field declarations are emitted as a `const` slice so the kind of each
    /// field comes from `<Ty as FormValue>::KIND`, and a field type without a
    /// `FormValue` impl fails to compile at the field.
    pub fn generate(&self, record: &RecordIR) -> TokenStream {
        let krate = &record.krate;
        let name = &record.ident;
        let record_name = name.unraw().to_string();

        let decls = record.fields.iter().map(|field| {
            let ident = field.ident.unraw().to_string();
            let tag = &field.tag;
            let ty = &field.ty;
            quote! {
                #krate::FieldDecl::new(#ident, #tag, <#ty as #krate::FormValue>::KIND)
            }
        });

        let arms = record.fields.iter().enumerate().map(|(index, field)| {
            let index = Literal::usize_unsuffixed(index);
            let ident = &field.ident;
            let ty = &field.ty;
            quote! {
                #index => <#ty as #krate::FormValue>::store(&mut self.#ident, value),
            }
        });

        quote! {
            #[automatically_derived]
            impl #krate::FormRecord for #name {
                fn field_decls() -> &'static [#krate::FieldDecl] {
                    const FIELDS: &[#krate::FieldDecl] = &[#(#decls),*];
                    FIELDS
                }

                fn assign(
                    &mut self,
                    index: usize,
                    value: #krate::FieldValue,
                ) -> ::core::result::Result<(), #krate::FieldValue> {
                    match index {
                        #(#arms)*
                        _ => ::core::result::Result::Err(value),
                    }
                }

                fn record_name() -> &'static str {
                    #record_name
                }
            }
        }
    }
}
