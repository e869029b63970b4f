//! Numeric range validation driven by the `min` and `max` tag options.
//!
//! Bounds are inclusive and parsed as base-10 `i64` each time a value is
//! checked, `min` first. A bound that does not parse is a configuration
//! error, not a silently ignored option, but a value already below `min`
//! reports that violation before `max` is looked at.

use tracing::trace;

use crate::config::FloatRange;
use crate::error::{Bound, DecodeError};
use crate::meta::FieldMeta;
use crate::tag::{MAX, MIN};

/// A coerced numeric value awaiting range validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Numeric {
    fn render(self) -> String {
        match self {
            Numeric::Int(v) => v.to_string(),
            Numeric::Uint(v) => v.to_string(),
            Numeric::Float(v) => v.to_string(),
        }
    }
}

fn parse_bound(field: &FieldMeta, option: &str) -> Result<Option<i64>, DecodeError> {
    let Some(raw) = field.options.get(option) else {
        return Ok(None);
    };
    raw.parse::<i64>().map(Some).map_err(|e| {
        DecodeError::configuration(
            &field.name,
            format!("invalid {} bound {:?}: {}", option, raw, e),
        )
    })
}

/// Check a numeric value against the field's bounds.
///
/// Integers are compared exactly, unsigned values included. Floats are either
/// truncated toward zero to an `i64` first ([`FloatRange::Truncate`]) or
/// compared as floats ([`FloatRange::Exact`]). NaN violates whichever bound
/// is checked first.
pub fn validate_range(
    value: Numeric,
    field: &FieldMeta,
    float_range: FloatRange,
) -> Result<(), DecodeError> {
    if let Some(min) = parse_bound(field, MIN)? {
        if below(value, min, float_range) {
            trace!(field = %field.name, min, "value below minimum");
            return Err(violation(field, Bound::Min(min), value));
        }
    }

    if let Some(max) = parse_bound(field, MAX)? {
        if above(value, max, float_range) {
            trace!(field = %field.name, max, "value above maximum");
            return Err(violation(field, Bound::Max(max), value));
        }
    }

    Ok(())
}

fn below(value: Numeric, min: i64, float_range: FloatRange) -> bool {
    match value {
        Numeric::Int(v) => v < min,
        Numeric::Uint(v) => i128::from(v) < i128::from(min),
        Numeric::Float(v) if v.is_nan() => true,
        Numeric::Float(v) => match float_range {
            FloatRange::Truncate => (v as i64) < min,
            FloatRange::Exact => v < min as f64,
        },
    }
}

fn above(value: Numeric, max: i64, float_range: FloatRange) -> bool {
    match value {
        Numeric::Int(v) => v > max,
        Numeric::Uint(v) => i128::from(v) > i128::from(max),
        Numeric::Float(v) if v.is_nan() => true,
        Numeric::Float(v) => match float_range {
            FloatRange::Truncate => (v as i64) > max,
            FloatRange::Exact => v > max as f64,
        },
    }
}

fn violation(field: &FieldMeta, bound: Bound, value: Numeric) -> DecodeError {
    DecodeError::ConstraintViolation {
        field: field.name.clone(),
        bound,
        actual: value.render(),
    }
}
