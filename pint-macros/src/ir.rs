//! Intermediate representation between parsing and code generation.

use syn::{Ident, Path, Type};

/// A record ready for code generation.
#[derive(Debug, Clone)]
pub struct RecordIR {
    /// The struct's identifier.
    pub ident: Ident,
    /// Path to the runtime crate.
    pub krate: Path,
    /// Decoded fields in declaration order, skipped fields excluded.
    pub fields: Vec<FieldIR>,
}

/// One decoded field.
#[derive(Debug, Clone)]
pub struct FieldIR {
    pub ident: Ident,
    pub ty: Type,
    /// The raw tag, empty when the field has no `#[pint("...")]`.
    pub tag: String,
}

impl RecordIR {
    /// Resolved form names, for diagnostics and tests.
    #[cfg(test)]
    pub fn form_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| {
                let name = field.tag.split(',').next().unwrap_or_default();
                if name.is_empty() {
                    field.ident.to_string()
                } else {
                    name.to_string()
                }
            })
            .collect()
    }
}
