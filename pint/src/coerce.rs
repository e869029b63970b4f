//! Type-directed coercion of raw form values.
//!
//! For one field the steps always run in this order:
//!
//! 1. required check (an empty value needs `omitempty`, and is only skipped
//!    when the configuration says [`OmitEmpty::Skip`]);
//! 2. formatting hook (`format:<name>`);
//! 3. parsing into the declared kind, including the width check;
//! 4. range validation (`min`/`max`) for numeric kinds.

use tracing::{trace, warn};

use crate::config::{BoolParsing, DecoderConfig, FormatPolicy, OmitEmpty};
use crate::error::{DecodeError, ParseValueError};
use crate::format::FormatRegistry;
use crate::meta::FieldMeta;
use crate::tag::{FORMAT, OMIT_EMPTY};
use crate::types::{FieldKind, FieldValue, FloatWidth, IntWidth};
use crate::validate::{validate_range, Numeric};

/// Coerces raw strings according to field metadata.
#[derive(Debug, Clone, Copy)]
pub struct Coercer<'a> {
    config: &'a DecoderConfig,
    formats: &'a FormatRegistry,
}

impl<'a> Coercer<'a> {
    /// Create a coercer over a configuration and format registry.
    pub fn new(config: &'a DecoderConfig, formats: &'a FormatRegistry) -> Self {
        Self { config, formats }
    }

    /// Coerce the raw value for `field`.
    ///
    /// Returns `Ok(None)` only for an empty value on an `omitempty` field
    /// under [`OmitEmpty::Skip`]; the destination field keeps its current
    /// value. Otherwise an allowed empty value continues through the pipeline.
    pub fn coerce(&self, field: &FieldMeta, raw: &str) -> Result<Option<FieldValue>, DecodeError> {
        if raw.is_empty() {
            if !field.options.contains(OMIT_EMPTY) {
                return Err(DecodeError::required(&field.name));
            }
            if self.config.omit_empty == OmitEmpty::Skip {
                trace!(field = %field.name, "empty value skipped");
                return Ok(None);
            }
        }

        let formatted = self.apply_format(field, raw)?;
        let value = self.parse(field, &formatted)?;

        if let Some(numeric) = numeric(&value) {
            validate_range(numeric, field, self.config.float_range)?;
        }

        Ok(Some(value))
    }

    fn apply_format(&self, field: &FieldMeta, raw: &str) -> Result<String, DecodeError> {
        let Some(handler) = field.options.get(FORMAT) else {
            return Ok(raw.to_string());
        };
        trace!(field = %field.name, handler, "applying format handler");

        match self.formats.apply(handler, raw) {
            Some(result) => result.map_err(|source| DecodeError::Format {
                field: field.name.clone(),
                source,
            }),
            None => match self.config.unknown_format {
                FormatPolicy::Lenient => {
                    warn!(field = %field.name, handler, "unknown format handler, value passed through");
                    Ok(raw.to_string())
                }
                FormatPolicy::Strict => Err(DecodeError::configuration(
                    &field.name,
                    format!("unknown format handler {:?}", handler),
                )),
            },
        }
    }

    fn parse(&self, field: &FieldMeta, raw: &str) -> Result<FieldValue, DecodeError> {
        let invalid = |source: ParseValueError| DecodeError::invalid_format(&field.name, raw, source);

        match field.kind {
            FieldKind::String => Ok(FieldValue::Str(raw.to_string())),
            FieldKind::Int(width) => parse_int(raw, width).map(FieldValue::Int).map_err(invalid),
            FieldKind::Uint(width) => parse_uint(raw, width).map(FieldValue::Uint).map_err(invalid),
            FieldKind::Float(width) => {
                parse_float(raw, width).map(FieldValue::Float).map_err(invalid)
            }
            FieldKind::Bool => parse_bool(raw, self.config.bool_parsing)
                .map(FieldValue::Bool)
                .map_err(invalid),
        }
    }
}

fn numeric(value: &FieldValue) -> Option<Numeric> {
    match *value {
        FieldValue::Int(v) => Some(Numeric::Int(v)),
        FieldValue::Uint(v) => Some(Numeric::Uint(v)),
        FieldValue::Float(v) => Some(Numeric::Float(v)),
        FieldValue::Str(_) | FieldValue::Bool(_) => None,
    }
}

/// Parse a base-10 signed integer and check it fits `width`.
pub fn parse_int(raw: &str, width: IntWidth) -> Result<i64, ParseValueError> {
    let value: i64 = raw.parse()?;
    let (min, max) = width.signed_range();
    if value < min || value > max {
        return Err(ParseValueError::OutOfRange(FieldKind::Int(width)));
    }
    Ok(value)
}

/// Parse a base-10 unsigned integer and check it fits `width`.
///
/// Unlike `u64::from_str`, a leading `+` is rejected.
pub fn parse_uint(raw: &str, width: IntWidth) -> Result<u64, ParseValueError> {
    if raw.starts_with('+') {
        return Err(ParseValueError::UnexpectedSign);
    }
    let value: u64 = raw.parse()?;
    if value > width.unsigned_max() {
        return Err(ParseValueError::OutOfRange(FieldKind::Uint(width)));
    }
    Ok(value)
}

/// Parse a decimal float. Finite values too large for an `f32` field are
/// rejected rather than stored as infinity.
pub fn parse_float(raw: &str, width: FloatWidth) -> Result<f64, ParseValueError> {
    let value: f64 = raw.parse()?;
    if width == FloatWidth::W32 && value.is_finite() && (value as f32).is_infinite() {
        return Err(ParseValueError::OutOfRange(FieldKind::Float(width)));
    }
    Ok(value)
}

/// Interpret a boolean literal.
pub fn parse_bool(raw: &str, mode: BoolParsing) -> Result<bool, ParseValueError> {
    match (raw, mode) {
        ("true" | "1", _) => Ok(true),
        (_, BoolParsing::Lenient) => Ok(false),
        ("false" | "0", BoolParsing::Strict) => Ok(false),
        (_, BoolParsing::Strict) => Err(ParseValueError::InvalidBool),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FloatRange;
    use crate::error::{Bound, ErrorCode, FormatError};
    use crate::types::FieldDecl;

    fn meta(tag: &'static str, kind: FieldKind) -> FieldMeta {
        FieldMeta::from_decl(0, &FieldDecl::new("value", tag, kind))
    }

    fn coerce_with(
        config: &DecoderConfig,
        tag: &'static str,
        kind: FieldKind,
        raw: &str,
    ) -> Result<Option<FieldValue>, DecodeError> {
        let formats = FormatRegistry::new();
        Coercer::new(config, &formats).coerce(&meta(tag, kind), raw)
    }

    fn coerce(tag: &'static str, kind: FieldKind, raw: &str) -> Result<Option<FieldValue>, DecodeError> {
        coerce_with(&DecoderConfig::default(), tag, kind, raw)
    }

    #[test]
    fn test_string_verbatim() {
        let value = coerce("name", FieldKind::String, " spaced , value ").unwrap();
        assert_eq!(value, Some(FieldValue::Str(" spaced , value ".into())));
    }

    #[test]
    fn test_required_before_everything() {
        let err = coerce("age,min:13,format:email", FieldKind::Int(IntWidth::W8), "").unwrap_err();
        assert_eq!(err, DecodeError::required("age"));
    }

    #[test]
    fn test_omitempty_empty_value_is_assigned() {
        assert_eq!(
            coerce(",omitempty", FieldKind::String, "").unwrap(),
            Some(FieldValue::Str(String::new()))
        );
        assert_eq!(
            coerce("b,omitempty", FieldKind::Bool, "").unwrap(),
            Some(FieldValue::Bool(false))
        );
        let err = coerce("n,omitempty", FieldKind::Int(IntWidth::W32), "").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidFormat { source: ParseValueError::Int(_), .. }
        ));
    }

    #[test]
    fn test_omitempty_empty_value_is_formatted() {
        let err = coerce("email,omitempty,format:email", FieldKind::String, "").unwrap_err();
        assert_eq!(err.code(), ErrorCode::FormatRejected);
    }

    #[test]
    fn test_omitempty_skip_mode() {
        let config = DecoderConfig::new().with_omit_empty(OmitEmpty::Skip);
        assert_eq!(
            coerce_with(&config, "n,omitempty", FieldKind::Int(IntWidth::W32), "").unwrap(),
            None
        );
        assert_eq!(
            coerce_with(&config, "email,omitempty,format:email", FieldKind::String, "").unwrap(),
            None
        );
        // Skipping never relaxes the required check.
        assert_eq!(
            coerce_with(&config, "n", FieldKind::Int(IntWidth::W32), "").unwrap_err(),
            DecodeError::required("n")
        );
    }

    #[test]
    fn test_signed_widths() {
        assert_eq!(
            coerce("n", FieldKind::Int(IntWidth::W8), "-128").unwrap(),
            Some(FieldValue::Int(-128))
        );
        let err = coerce("n", FieldKind::Int(IntWidth::W8), "128").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidFormat { source: ParseValueError::OutOfRange(_), .. }
        ));
        assert_eq!(
            coerce("n", FieldKind::Int(IntWidth::W64), "9223372036854775807").unwrap(),
            Some(FieldValue::Int(i64::MAX))
        );
        assert!(coerce("n", FieldKind::Int(IntWidth::W64), "9223372036854775808").is_err());
    }

    #[test]
    fn test_unsigned_widths() {
        assert_eq!(
            coerce("n", FieldKind::Uint(IntWidth::W64), "18446744073709551615").unwrap(),
            Some(FieldValue::Uint(u64::MAX))
        );
        assert!(coerce("n", FieldKind::Uint(IntWidth::W16), "65536").is_err());
        assert!(coerce("n", FieldKind::Uint(IntWidth::W32), "-1").is_err());
    }

    #[test]
    fn test_unsigned_rejects_plus_sign() {
        let err = coerce("n", FieldKind::Uint(IntWidth::W32), "+5").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidFormat { source: ParseValueError::UnexpectedSign, .. }
        ));
        // Signed fields keep accepting an explicit plus.
        assert_eq!(
            coerce("n", FieldKind::Int(IntWidth::W32), "+5").unwrap(),
            Some(FieldValue::Int(5))
        );
    }

    #[test]
    fn test_invalid_number_reports_raw_value() {
        let err = coerce("age", FieldKind::Int(IntWidth::W32), "twelve").unwrap_err();
        match err {
            DecodeError::InvalidFormat { field, value, source } => {
                assert_eq!(field, "age");
                assert_eq!(value, "twelve");
                assert!(matches!(source, ParseValueError::Int(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_floats() {
        assert_eq!(
            coerce("f", FieldKind::Float(FloatWidth::W64), "1.23456789").unwrap(),
            Some(FieldValue::Float(1.23456789))
        );
        assert!(coerce("f", FieldKind::Float(FloatWidth::W32), "1e39").is_err());
        assert!(coerce("f", FieldKind::Float(FloatWidth::W64), "1e39").is_ok());
        assert!(matches!(
            coerce("f", FieldKind::Float(FloatWidth::W64), "abc").unwrap_err(),
            DecodeError::InvalidFormat { source: ParseValueError::Float(_), .. }
        ));
    }

    #[test]
    fn test_lenient_bool() {
        for (raw, expected) in [("true", true), ("1", true), ("false", false), ("0", false), ("yes", false), ("TRUE", false)] {
            assert_eq!(
                coerce("b", FieldKind::Bool, raw).unwrap(),
                Some(FieldValue::Bool(expected)),
                "raw value {raw:?}"
            );
        }
    }

    #[test]
    fn test_strict_bool() {
        let config = DecoderConfig::new().with_bool_parsing(BoolParsing::Strict);
        assert_eq!(
            coerce_with(&config, "b", FieldKind::Bool, "0").unwrap(),
            Some(FieldValue::Bool(false))
        );
        let err = coerce_with(&config, "b", FieldKind::Bool, "yes").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidFormat { source: ParseValueError::InvalidBool, .. }
        ));
    }

    #[test]
    fn test_range_after_parse() {
        let kind = FieldKind::Uint(IntWidth::W8);
        assert!(matches!(
            coerce("age,min:13,max:99", kind, "12").unwrap_err(),
            DecodeError::ConstraintViolation { bound: Bound::Min(13), .. }
        ));
        assert_eq!(coerce("age,min:13,max:99", kind, "13").unwrap(), Some(FieldValue::Uint(13)));
        assert!(matches!(
            coerce("age,min:13,max:99", kind, "100").unwrap_err(),
            DecodeError::ConstraintViolation { bound: Bound::Max(99), .. }
        ));
    }

    #[test]
    fn test_float_range_modes() {
        let kind = FieldKind::Float(FloatWidth::W64);
        assert!(coerce("r,max:1", kind, "1.9").is_ok());
        let exact = DecoderConfig::new().with_float_range(FloatRange::Exact);
        assert!(coerce_with(&exact, "r,max:1", kind, "1.9").is_err());
    }

    #[test]
    fn test_format_runs_before_parse() {
        let err = coerce("email,format:email", FieldKind::String, "not-an-email").unwrap_err();
        assert_eq!(err.code(), ErrorCode::FormatRejected);
        assert_eq!(
            err.client_message().as_deref(),
            Some("\"not-an-email\" is not a valid email address")
        );

        let ok = coerce("email,format:email", FieldKind::String, "Ann <a@b.com>").unwrap();
        assert_eq!(ok, Some(FieldValue::Str("a@b.com".into())));
    }

    #[test]
    fn test_format_output_feeds_parser() {
        let config = DecoderConfig::default();
        let formats = FormatRegistry::new();
        formats.register("digits", |raw: &str| {
            let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
            if digits.is_empty() {
                Err(FormatError::new("no digits"))
            } else {
                Ok(digits)
            }
        });
        let coercer = Coercer::new(&config, &formats);
        let field = meta("n,format:digits,max:500", FieldKind::Uint(IntWidth::W32));

        assert_eq!(coercer.coerce(&field, "4-2-0").unwrap(), Some(FieldValue::Uint(420)));
        assert!(matches!(
            coercer.coerce(&field, "9-9-9").unwrap_err(),
            DecodeError::ConstraintViolation { .. }
        ));
        assert!(matches!(
            coercer.coerce(&field, "none").unwrap_err(),
            DecodeError::Format { .. }
        ));
    }

    #[test]
    fn test_unknown_format_policy() {
        assert_eq!(
            coerce("v,format:nope", FieldKind::String, "keep").unwrap(),
            Some(FieldValue::Str("keep".into()))
        );

        let strict = DecoderConfig::new().with_format_policy(FormatPolicy::Strict);
        let err = coerce_with(&strict, "v,format:nope", FieldKind::String, "keep").unwrap_err();
        assert_eq!(err.code(), ErrorCode::Configuration);
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any i8 rendered in base 10 parses back at width 8.
        #[test]
        fn prop_i8_round_trips(v in any::<i8>()) {
            prop_assert_eq!(parse_int(&v.to_string(), IntWidth::W8).unwrap(), i64::from(v));
        }

        /// Values outside the i16 range are rejected at width 16.
        #[test]
        fn prop_i16_overflow_rejected(v in prop_oneof![i64::MIN..-32768i64, 32768i64..i64::MAX]) {
            prop_assert!(parse_int(&v.to_string(), IntWidth::W16).is_err());
        }

        /// Any u32 rendered in base 10 parses back at width 32.
        #[test]
        fn prop_u32_round_trips(v in any::<u32>()) {
            prop_assert_eq!(parse_uint(&v.to_string(), IntWidth::W32).unwrap(), u64::from(v));
        }

        /// Lenient bool parsing never fails.
        #[test]
        fn prop_lenient_bool_never_fails(raw in ".*") {
            let parsed = parse_bool(&raw, BoolParsing::Lenient).unwrap();
            prop_assert_eq!(parsed, raw == "true" || raw == "1");
        }
    }
}
