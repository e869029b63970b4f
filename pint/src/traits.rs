//! Core traits for form decoding.
//!
//! ## Overview
//!
//! - [`FormRecord`] is implemented by destination records. It exposes the
//!   static field declarations and a positional setter.
//! - [`FormValue`] is implemented by every supported field type. It maps the
//!   Rust type to a [`FieldKind`] and stores a coerced [`FieldValue`].
//!
//! Most users derive `FormRecord`:
//!
//! ```rust,ignore
//! use pint::FormRecord;
//!
//! #[derive(Default, FormRecord)]
//! struct Signup {
//!     #[pint("username")]
//!     username: String,
//!     #[pint("age,min:13,max:99")]
//!     age: u8,
//! }
//! ```
//!
//! It can also be implemented by hand:
//!
//! ```rust
//! use pint::{FieldDecl, FieldValue, FormRecord, FormValue};
//!
//! #[derive(Default)]
//! struct Login {
//!     username: String,
//! }
//!
//! impl FormRecord for Login {
//!     fn field_decls() -> &'static [FieldDecl] {
//!         const FIELDS: &[FieldDecl] =
//!             &[FieldDecl::new("username", "username", <String as FormValue>::KIND)];
//!         FIELDS
//!     }
//!
//!     fn assign(&mut self, index: usize, value: FieldValue) -> Result<(), FieldValue> {
//!         match index {
//!             0 => FormValue::store(&mut self.username, value),
//!             _ => Err(value),
//!         }
//!     }
//! }
//! ```

use crate::types::{FieldDecl, FieldKind, FieldValue, FloatWidth, IntWidth};

/// A record that can be populated from form fields.
pub trait FormRecord: 'static {
    /// Declared fields in declaration order.
    fn field_decls() -> &'static [FieldDecl];

    /// Store `value` into the field at `index` (its position in
    /// [`field_decls`](FormRecord::field_decls)).
    ///
    /// Returns the value back if the index is unknown or the value does not
    /// fit the field.
    fn assign(&mut self, index: usize, value: FieldValue) -> Result<(), FieldValue>;

    /// The record's type name, used in logs.
    fn record_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A field type that form values can be coerced into.
pub trait FormValue: Sized {
    /// The kind driving coercion for this type.
    const KIND: FieldKind;

    /// Convert a coerced value into `Self`.
    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue>;

    /// Overwrite `slot` with the converted value.
    fn store(slot: &mut Self, value: FieldValue) -> Result<(), FieldValue> {
        *slot = Self::from_field_value(value)?;
        Ok(())
    }
}

impl FormValue for String {
    const KIND: FieldKind = FieldKind::String;

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Str(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FormValue for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

// =============================================================================
// Integer implementations
// =============================================================================

macro_rules! impl_form_value_for_int {
    ($variant:ident, $kind:ident; $($ty:ty => $width:ident),* $(,)?) => {
        $(
            impl FormValue for $ty {
                const KIND: FieldKind = FieldKind::$kind(IntWidth::$width);

                fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
                    match value {
                        FieldValue::$variant(v) => {
                            <$ty>::try_from(v).map_err(|_| FieldValue::$variant(v))
                        }
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_form_value_for_int!(
    Int, Int;
    i8 => W8,
    i16 => W16,
    i32 => W32,
    i64 => W64,
    isize => Size,
);

impl_form_value_for_int!(
    Uint, Uint;
    u8 => W8,
    u16 => W16,
    u32 => W32,
    u64 => W64,
    usize => Size,
);

// =============================================================================
// Float implementations
// =============================================================================

impl FormValue for f64 {
    const KIND: FieldKind = FieldKind::Float(FloatWidth::W64);

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Float(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl FormValue for f32 {
    const KIND: FieldKind = FieldKind::Float(FloatWidth::W32);

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Float(v) => Ok(v as f32),
            other => Err(other),
        }
    }
}
