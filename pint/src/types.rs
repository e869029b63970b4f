//! Field kinds, coerced values and static field declarations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of a declared integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
    /// `isize` / `usize`
    Size,
}

impl IntWidth {
    /// Number of bits in a value of this width on the current target.
    pub fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
            IntWidth::Size => usize::BITS,
        }
    }

    /// Inclusive range representable by a signed integer of this width.
    pub fn signed_range(self) -> (i64, i64) {
        match self.bits() {
            8 => (i8::MIN.into(), i8::MAX.into()),
            16 => (i16::MIN.into(), i16::MAX.into()),
            32 => (i32::MIN.into(), i32::MAX.into()),
            _ => (i64::MIN, i64::MAX),
        }
    }

    /// Largest value representable by an unsigned integer of this width.
    pub fn unsigned_max(self) -> u64 {
        match self.bits() {
            8 => u8::MAX.into(),
            16 => u16::MAX.into(),
            32 => u32::MAX.into(),
            _ => u64::MAX,
        }
    }
}

/// Width of a declared floating point field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatWidth {
    W32,
    W64,
}

/// The declared value kind of a record field.
///
/// Coercion is driven entirely by this value; it is derived from the field's
/// Rust type through [`FormValue::KIND`](crate::FormValue::KIND).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "width", rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Int(IntWidth),
    Uint(IntWidth),
    Float(FloatWidth),
    Bool,
}

impl FieldKind {
    /// Whether values of this kind go through `min`/`max` validation.
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldKind::Int(_) | FieldKind::Uint(_) | FieldKind::Float(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Int(IntWidth::Size) => write!(f, "isize"),
            FieldKind::Int(w) => write!(f, "i{}", w.bits()),
            FieldKind::Uint(IntWidth::Size) => write!(f, "usize"),
            FieldKind::Uint(w) => write!(f, "u{}", w.bits()),
            FieldKind::Float(FloatWidth::W32) => write!(f, "f32"),
            FieldKind::Float(FloatWidth::W64) => write!(f, "f64"),
            FieldKind::Bool => write!(f, "bool"),
        }
    }
}

/// A coerced value ready to be stored in a record field.
///
/// Integer values have already been checked against the declared width of the
/// destination field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Uint(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

/// Static description of one declared field, as emitted by
/// `#[derive(FormRecord)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    /// The field's Rust identifier.
    pub ident: &'static str,
    /// The raw `#[pint("...")]` tag, empty if untagged.
    pub tag: &'static str,
    /// The declared value kind.
    pub kind: FieldKind,
}

impl FieldDecl {
    /// Create a declaration.
    pub const fn new(ident: &'static str, tag: &'static str, kind: FieldKind) -> Self {
        Self { ident, tag, kind }
    }
}
