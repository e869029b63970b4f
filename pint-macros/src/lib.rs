//! # pint-macros
//!
//! Procedural macros for decoding form fields into typed records.
//!
//! This crate provides `#[derive(FormRecord)]`. Use it through the `pint`
//! crate, which re-exports it next to the trait of the same name.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pint::FormRecord;
//!
//! #[derive(Debug, Default, FormRecord)]
//! struct Signup {
//!     #[pint("username")]
//!     username: String,
//!
//!     #[pint("age,min:13,max:99")]
//!     age: u8,
//!
//!     #[pint("email,omitempty,format:email")]
//!     email: String,
//!
//!     #[pint(skip)]
//!     verified: bool,
//! }
//! ```
//!
//! ## Attributes
//!
//! ### Container Attributes
//!
//! - `#[pint(crate = "path")]` - Path to the `pint` crate, when re-exported
//!
//! ### Field Attributes
//!
//! - `#[pint("name,opt,opt:value")]` - The field's tag; see `pint::tag`
//! - `#[pint(skip)]` - Never decode this field
//!
//! Untagged fields are decoded under their own identifier and are required.

use proc_macro::TokenStream;
use syn::DeriveInput;

mod codegen;
mod error;
mod ir;
mod parser;

use codegen::ImplBlockGenerator;
use parser::struct_parser::StructParser;

/// Derive macro implementing `pint::FormRecord`.
///
/// # Example
///
/// ```rust,ignore
/// use pint::FormRecord;
///
/// #[derive(Default, FormRecord)]
/// struct Login {
///     #[pint("username")]
///     username: String,
///     #[pint("password")]
///     password: String,
/// }
/// ```
#[proc_macro_derive(FormRecord, attributes(pint))]
pub fn derive_form_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match derive_form_record_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn derive_form_record_impl(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let record = StructParser::parse(input).map_err(|e| e.into_syn_error(input.ident.span()))?;
    Ok(ImplBlockGenerator::new().generate(&record))
}
