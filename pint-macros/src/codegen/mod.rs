//! Rust code generation module.
//!
//! This module handles generating the `FormRecord` impl block.

pub mod impl_block;

pub use impl_block::ImplBlockGenerator;
