//! The decode entry point.
//!
//! A [`Decoder`] owns the process-scoped state decoding needs: the field
//! metadata cache, the format handler registry and the configuration. Build
//! one at startup and share it; cloning is cheap and clones share state.
//!
//! # Example
//! ```rust,ignore
//! use pint::{Decoder, FormRecord};
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Default, FormRecord)]
//! struct Login {
//!     #[pint("username")]
//!     username: String,
//!     #[pint("password")]
//!     password: String,
//!     #[pint("remember,omitempty")]
//!     remember: bool,
//! }
//!
//! let decoder = Decoder::new();
//! let form: HashMap<&str, &str> = [("username", "john"), ("password", "hunter2")].into();
//! let login: Login = decoder.decode_new(&form)?;
//! ```

use std::sync::Arc;

use tracing::{debug, trace};

use crate::coerce::Coercer;
use crate::config::DecoderConfig;
use crate::error::{DecodeError, FormatError};
use crate::format::FormatRegistry;
use crate::meta::{FieldCache, FieldMeta};
use crate::source::FormSource;
use crate::traits::FormRecord;

/// Decodes form sources into [`FormRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
    cache: Arc<FieldCache>,
    formats: Arc<FormatRegistry>,
}

impl Decoder {
    /// Create a decoder with default configuration, an empty cache and the
    /// built-in format handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with a custom configuration.
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Use a shared metadata cache.
    pub fn with_cache(mut self, cache: Arc<FieldCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Use a shared format registry.
    pub fn with_formats(mut self, formats: Arc<FormatRegistry>) -> Self {
        self.formats = formats;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// The metadata cache.
    pub fn cache(&self) -> &Arc<FieldCache> {
        &self.cache
    }

    /// The format handler registry.
    pub fn formats(&self) -> &Arc<FormatRegistry> {
        &self.formats
    }

    /// Register a format handler. See [`FormatRegistry::register`].
    pub fn register_format<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&str) -> Result<String, FormatError> + Send + Sync + 'static,
    {
        self.formats.register(name, handler);
    }

    /// Cached field metadata for `T`.
    pub fn fields<T: FormRecord>(&self) -> Arc<[FieldMeta]> {
        self.cache.fields::<T>()
    }

    /// Populate `dest` from `source`.
    ///
    /// Fields are processed in declaration order and the first failure aborts
    /// the decode. Fields assigned before the failure keep their new values.
    #[tracing::instrument(skip_all, fields(record = T::record_name()))]
    pub fn decode<T, S>(&self, source: &S, dest: &mut T) -> Result<(), DecodeError>
    where
        T: FormRecord,
        S: FormSource + ?Sized,
    {
        let fields = self.cache.fields::<T>();
        let coercer = Coercer::new(&self.config, &self.formats);

        for field in fields.iter() {
            let raw = source.value(&field.name);
            let value = match coercer.coerce(field, &raw) {
                Ok(Some(value)) => value,
                Ok(None) => continue,
                Err(err) => {
                    debug!(field = %field.name, error = %err, "decode failed");
                    return Err(err);
                }
            };

            if self.config.debug_logging {
                debug!(field = %field.name, value = %value, "assigning field");
            } else {
                trace!(field = %field.name, "assigning field");
            }

            dest.assign(field.index, value).map_err(|rejected| {
                DecodeError::configuration(
                    &field.name,
                    format!("record rejected {:?} for a {} field", rejected, field.kind),
                )
            })?;
        }

        Ok(())
    }

    /// Decode into a fresh `T::default()`.
    pub fn decode_new<T, S>(&self, source: &S) -> Result<T, DecodeError>
    where
        T: FormRecord + Default,
        S: FormSource + ?Sized,
    {
        let mut record = T::default();
        self.decode(source, &mut record)?;
        Ok(record)
    }
}
