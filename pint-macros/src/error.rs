//! Error types for the macro crate.

use proc_macro2::Span;
use thiserror::Error;

/// Error raised while parsing a `#[derive(FormRecord)]` input.
#[derive(Debug, Clone, Error)]
pub enum DeriveError {
    #[error("Invalid container attributes: {0}")]
    ContainerAttrs(String),

    #[error("Invalid field attributes: {0}")]
    FieldAttrs(String),

    #[error("FormRecord can only be derived for structs with named fields")]
    UnsupportedShape,

    #[error("FormRecord cannot be derived for generic types")]
    Generic,

    #[error("Field at index {0} has no identifier")]
    MissingFieldIdent(usize),

    #[error("{message}")]
    Tag { message: String, span: Span },

    #[error(transparent)]
    Syn(#[from] SynError),
}

/// `syn::Error` wrapper so it can be carried by [`DeriveError`].
#[derive(Debug, Clone)]
pub struct SynError(pub syn::Error);

impl std::fmt::Display for SynError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SynError {}

impl From<syn::Error> for DeriveError {
    fn from(err: syn::Error) -> Self {
        DeriveError::Syn(SynError(err))
    }
}

impl DeriveError {
    /// Create a tag error pointing at `span`.
    pub fn tag(message: impl Into<String>, span: Span) -> Self {
        DeriveError::Tag {
            message: message.into(),
            span,
        }
    }

    /// Convert to a `syn::Error`, falling back to `default_span` when the
    /// error carries no location of its own.
    pub fn into_syn_error(self, default_span: Span) -> syn::Error {
        match self {
            DeriveError::Tag { message, span } => syn::Error::new(span, message),
            DeriveError::Syn(SynError(err)) => err,
            other => syn::Error::new(default_span, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            DeriveError::Generic.to_string(),
            "FormRecord cannot be derived for generic types"
        );
        assert_eq!(
            DeriveError::tag("bad bound", Span::call_site()).to_string(),
            "bad bound"
        );
    }

    #[test]
    fn test_syn_error_passes_through() {
        let err: DeriveError = syn::Error::new(Span::call_site(), "expected string literal").into();
        let syn_err = err.into_syn_error(Span::call_site());
        assert_eq!(syn_err.to_string(), "expected string literal");
    }
}
