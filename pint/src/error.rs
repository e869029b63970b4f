//! Error types for decoding.
//!
//! Every failure aborts the decode that produced it. Errors fall in two
//! classes:
//!
//! - validation failures (a missing required field, a rejected format, a
//!   range violation) carry a plain message that is safe to show to the end
//!   user, available through [`DecodeError::client_message`];
//! - everything else (bad configuration, unparseable values) is meant for logs.
//!
//! `Display` gives the internal form. Validation failures are prefixed with
//! `pint.Validate:`, the rest with `pint:`.
//!
//! # Example
//! ```rust,ignore
//! match decoder.decode(&form, &mut signup) {
//!     Ok(()) => {}
//!     Err(err) => {
//!         tracing::warn!(error = %err, "signup rejected");
//!         let body = err.client_message().unwrap_or_else(|| "bad request".into());
//!         return respond(400, body);
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

use crate::types::FieldKind;

/// Result type alias for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Machine readable classification of a [`DecodeError`].
///
/// Serialized as SCREAMING_SNAKE_CASE (e.g. `RequiredFieldMissing` becomes
/// `"REQUIRED_FIELD_MISSING"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Configuration,
    RequiredFieldMissing,
    InvalidFormat,
    ConstraintViolation,
    FormatRejected,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "CONFIGURATION",
            Self::RequiredFieldMissing => "REQUIRED_FIELD_MISSING",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::ConstraintViolation => "CONSTRAINT_VIOLATION",
            Self::FormatRejected => "FORMAT_REJECTED",
        }
    }

    /// Returns true if the error was caused by the submitted data rather than
    /// by the record declaration or decoder setup.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Configuration)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The bound a numeric value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Min(i64),
    Max(i64),
}

impl Bound {
    /// The bound's value.
    pub fn value(&self) -> i64 {
        match self {
            Bound::Min(v) | Bound::Max(v) => *v,
        }
    }
}

/// Failure to parse a raw value into the declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseValueError {
    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error("value out of range for {0}")]
    OutOfRange(FieldKind),

    #[error("invalid boolean literal")]
    InvalidBool,

    #[error("unsigned value must not carry a sign")]
    UnexpectedSign,
}

/// Error returned by a formatting handler.
///
/// The message is shown to clients as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FormatError {
    message: String,
}

impl FormatError {
    /// Create a new format error with a client-safe message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The client-safe message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error produced while decoding a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The record declaration or decoder setup is invalid.
    #[error("pint: field `{field}`: {message}")]
    Configuration { field: String, message: String },

    /// The value is absent and the field lacks `omitempty`.
    #[error("pint.Validate: {field} cannot be empty")]
    RequiredFieldMissing { field: String },

    /// The value could not be parsed into the field's kind.
    #[error("pint: invalid value {value:?} for field `{field}`: {source}")]
    InvalidFormat {
        field: String,
        value: String,
        #[source]
        source: ParseValueError,
    },

    /// The value parsed but falls outside `min`/`max`.
    #[error("pint.Validate: {}", constraint_message(.field, .bound))]
    ConstraintViolation {
        field: String,
        bound: Bound,
        actual: String,
    },

    /// A formatting handler rejected the value.
    #[error("pint.Validate: {source}")]
    Format {
        field: String,
        #[source]
        source: FormatError,
    },
}

fn constraint_message(field: &str, bound: &Bound) -> String {
    match bound {
        Bound::Min(min) => format!("{} must be greater than {}", field, min),
        Bound::Max(max) => format!("{} must be less than {}", field, max),
    }
}

impl DecodeError {
    /// Create a configuration error.
    pub fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a required-field error.
    pub fn required(field: impl Into<String>) -> Self {
        Self::RequiredFieldMissing {
            field: field.into(),
        }
    }

    /// Create an invalid-format error.
    pub fn invalid_format(
        field: impl Into<String>,
        value: impl Into<String>,
        source: impl Into<ParseValueError>,
    ) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            value: value.into(),
            source: source.into(),
        }
    }

    /// The error's classification.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Configuration { .. } => ErrorCode::Configuration,
            Self::RequiredFieldMissing { .. } => ErrorCode::RequiredFieldMissing,
            Self::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            Self::ConstraintViolation { .. } => ErrorCode::ConstraintViolation,
            Self::Format { .. } => ErrorCode::FormatRejected,
        }
    }

    /// The resolved name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            Self::Configuration { field, .. }
            | Self::RequiredFieldMissing { field }
            | Self::InvalidFormat { field, .. }
            | Self::ConstraintViolation { field, .. }
            | Self::Format { field, .. } => field,
        }
    }

    /// Whether this is a validation failure with a client-safe message.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::RequiredFieldMissing { .. } | Self::ConstraintViolation { .. } | Self::Format { .. }
        )
    }

    /// The plain message to return to the client, for validation failures.
    pub fn client_message(&self) -> Option<String> {
        match self {
            Self::RequiredFieldMissing { field } => Some(format!("{} cannot be empty", field)),
            Self::ConstraintViolation { field, bound, .. } => {
                Some(constraint_message(field, bound))
            }
            Self::Format { source, .. } => Some(source.message().to_string()),
            _ => None,
        }
    }

    /// Build a serializable response body.
    ///
    /// Non-validation errors get a generic message so internal details do not
    /// leak to clients.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code(),
            field: self.field().to_string(),
            message: self
                .client_message()
                .unwrap_or_else(|| format!("{} is invalid", self.field())),
        }
    }
}

/// Serializable, client-safe view of a [`DecodeError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub field: String,
    pub message: String,
}

/// Error loading a [`DecoderConfig`](crate::DecoderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid TOML syntax or schema.
    #[error("Invalid TOML: {message}")]
    InvalidToml {
        path: Option<PathBuf>,
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid TOML error.
    pub fn invalid_toml(path: Option<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }
}
