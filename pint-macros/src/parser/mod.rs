//! Parser module for extracting record information from the derive input.
//!
//! This module contains parsers for:
//! - `#[pint(...)]` attributes
//! - field tags
//! - struct definitions

pub mod attributes;
pub mod struct_parser;
pub mod tag;
