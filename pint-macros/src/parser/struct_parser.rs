//! Struct parsing logic.
//!
//! Only structs with named fields can be records. Generic structs are
//! rejected because the field declarations live in a `const` item.

use darling::{FromDeriveInput, FromField};
use syn::{Data, DeriveInput, Fields};

use crate::error::DeriveError;
use crate::ir::{FieldIR, RecordIR};
use crate::parser::attributes::{ContainerAttrs, FieldAttrs};
use crate::parser::tag::validate_tag;

/// Parses a derive input into a [`RecordIR`].
pub struct StructParser;

impl StructParser {
    pub fn parse(input: &DeriveInput) -> Result<RecordIR, DeriveError> {
        let Data::Struct(data) = &input.data else {
            return Err(DeriveError::UnsupportedShape);
        };
        let Fields::Named(named) = &data.fields else {
            return Err(DeriveError::UnsupportedShape);
        };

        let container = ContainerAttrs::from_derive_input(input)
            .map_err(|e| DeriveError::ContainerAttrs(e.to_string()))?;

        if !container.generics.params.is_empty() {
            return Err(DeriveError::Generic);
        }

        let mut fields = Vec::with_capacity(named.named.len());
        for (index, field) in named.named.iter().enumerate() {
            let attrs =
                FieldAttrs::from_field(field).map_err(|e| DeriveError::FieldAttrs(e.to_string()))?;
            let args = attrs.args()?;
            if args.skip {
                continue;
            }

            let ident = attrs.ident.ok_or(DeriveError::MissingFieldIdent(index))?;
            let tag = match &args.tag {
                Some(lit) => {
                    let tag = lit.value();
                    validate_tag(&tag).map_err(|message| DeriveError::tag(message, lit.span()))?;
                    tag
                }
                None => String::new(),
            };

            fields.push(FieldIR {
                ident,
                ty: attrs.ty,
                tag,
            });
        }

        Ok(RecordIR {
            ident: container.ident.clone(),
            krate: container.crate_path(),
            fields,
        })
    }
}
