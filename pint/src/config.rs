//! Decoder configuration.
//!
//! The defaults reproduce the permissive behavior form handlers have
//! traditionally relied on. Each leniency can be switched off individually.
//!
//! # Example
//! ```rust,ignore
//! use pint::{BoolParsing, DecoderConfig, FormatPolicy};
//!
//! let config = DecoderConfig::new()
//!     .with_format_policy(FormatPolicy::Strict)
//!     .with_bool_parsing(BoolParsing::Strict);
//! ```
//!
//! Configuration can also be loaded from TOML:
//!
//! ```toml
//! unknown_format = "strict"
//! bool_parsing = "lenient"
//! float_range = "exact"
//! omit_empty = "skip"
//! debug_logging = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "pint.toml";

/// What to do when a tag names a format handler that is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormatPolicy {
    /// Pass the value through unchanged.
    #[default]
    Lenient,
    /// Fail the decode with a configuration error.
    Strict,
}

/// How boolean fields interpret their raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoolParsing {
    /// `"true"` and `"1"` are true, anything else is false.
    #[default]
    Lenient,
    /// Only `"true"`, `"1"`, `"false"` and `"0"` are accepted.
    Strict,
}

/// How `min`/`max` apply to float fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FloatRange {
    /// Truncate the value toward zero to an `i64` before comparing, so `1.9`
    /// passes `max:1`.
    #[default]
    Truncate,
    /// Compare the float value itself against the bounds.
    Exact,
}

/// What an empty value does to an `omitempty` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OmitEmpty {
    /// Run the empty value through formatting, parsing and validation like
    /// any other value. Strings become `""`, lenient bools become `false` and
    /// numbers fail to parse.
    #[default]
    Assign,
    /// Leave the field at its current value.
    Skip,
}

/// Decoder configuration.
///
/// * `unknown_format` - policy for unregistered format handlers. Default: `Lenient`.
/// * `bool_parsing` - boolean literal handling. Default: `Lenient`.
/// * `float_range` - range check semantics for floats. Default: `Truncate`.
/// * `omit_empty` - handling of empty `omitempty` fields. Default: `Assign`.
/// * `debug_logging` - log every assigned field at `debug` instead of `trace`.
///   Default: false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub unknown_format: FormatPolicy,
    pub bool_parsing: BoolParsing,
    pub float_range: FloatRange,
    pub omit_empty: OmitEmpty,
    pub debug_logging: bool,
}

impl DecoderConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with every leniency turned off.
    pub fn strict() -> Self {
        Self {
            unknown_format: FormatPolicy::Strict,
            bool_parsing: BoolParsing::Strict,
            float_range: FloatRange::Exact,
            omit_empty: OmitEmpty::Assign,
            debug_logging: false,
        }
    }

    /// Set the unknown format handler policy.
    pub fn with_format_policy(mut self, policy: FormatPolicy) -> Self {
        self.unknown_format = policy;
        self
    }

    /// Set the boolean parsing mode.
    pub fn with_bool_parsing(mut self, mode: BoolParsing) -> Self {
        self.bool_parsing = mode;
        self
    }

    /// Set the float range mode.
    pub fn with_float_range(mut self, mode: FloatRange) -> Self {
        self.float_range = mode;
        self
    }

    /// Set how empty `omitempty` fields are handled.
    pub fn with_omit_empty(mut self, mode: OmitEmpty) -> Self {
        self.omit_empty = mode;
        self
    }

    /// Enable or disable debug logging.
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::invalid_toml(None, e.to_string()))
    }

    /// Load configuration from a file path.
    ///
    /// If the path is None, attempts to load [`CONFIG_FILENAME`] from the
    /// current directory. A missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(Some(config_path), e.to_string()))
    }
}
