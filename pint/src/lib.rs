//! # pint
//!
//! Decode string-keyed form fields into typed records.
//!
//! Each field of a record carries a tag naming the form key it reads and the
//! rules applied to it. The decoder looks every field up in a
//! [`FormSource`], coerces the raw string into the field's Rust type,
//! validates it and stores it. Decoding stops at the first failure.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pint::{Decoder, FormRecord};
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Default, FormRecord)]
//! struct Signup {
//!     #[pint("username")]
//!     username: String,
//!     #[pint("age,min:13,max:99")]
//!     age: u8,
//!     #[pint("nickname,omitempty")]
//!     nickname: String,
//! }
//!
//! let decoder = Decoder::new();
//! let form: HashMap<&str, &str> = [("username", "ann"), ("age", "30")].into();
//! let signup: Signup = decoder.decode_new(&form)?;
//! ```
//!
//! ## Tag Options
//!
//! | Option | Applies to | Effect |
//! |--------|------------|--------|
//! | `omitempty` | all | an empty value is allowed and goes through the same pipeline; see [`OmitEmpty`] |
//! | `format:<name>` | all | run the named format handler on the raw value first |
//! | `min:<n>` | numbers | inclusive lower bound |
//! | `max:<n>` | numbers | inclusive upper bound |
//!
//! Fields without `omitempty` are required: an empty value fails with
//! [`DecodeError::RequiredFieldMissing`].
//!
//! ## Supported Field Types
//!
//! | Rust type | Parsing |
//! |-----------|---------|
//! | `String` | verbatim |
//! | `i8`..`i64`, `isize` | base 10, checked against the width |
//! | `u8`..`u64`, `usize` | base 10, checked against the width |
//! | `f32`, `f64` | decimal |
//! | `bool` | `"true"`/`"1"` are true; see [`BoolParsing`] |
//!
//! ## Feature Flags
//!
//! - `derive` (default): re-export `#[derive(FormRecord)]` from `pint-macros`

pub mod coerce;
pub mod config;
pub mod decode;
pub mod error;
pub mod format;
pub mod meta;
pub mod source;
pub mod tag;
pub mod traits;
pub mod types;
pub mod validate;

pub use config::{BoolParsing, DecoderConfig, FloatRange, FormatPolicy, OmitEmpty};
pub use decode::Decoder;
pub use error::{
    Bound, ConfigError, DecodeError, DecodeResult, ErrorCode, ErrorResponse, FormatError,
    ParseValueError,
};
pub use format::FormatRegistry;
pub use meta::{FieldCache, FieldMeta};
pub use source::{FnSource, FormSource, OptionFnSource};
pub use tag::{parse_tag, TagOptions};
pub use traits::{FormRecord, FormValue};
pub use types::{FieldDecl, FieldKind, FieldValue, FloatWidth, IntWidth};

#[cfg(feature = "derive")]
pub use pint_macros::FormRecord;
