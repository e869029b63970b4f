//! Formatting hooks.
//!
//! A format handler is a named `&str -> Result<String, FormatError>` transform
//! that runs on the raw value before coercion. Fields opt in with the `format`
//! tag option:
//!
//! ```rust,ignore
//! #[derive(FormRecord)]
//! struct Contact {
//!     #[pint("email,format:email")]
//!     email: String,
//!     #[pint("phone,format:phone")]
//!     phone: String,
//! }
//!
//! let decoder = Decoder::new();
//! decoder.register_format("phone", |raw: &str| {
//!     let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
//!     if digits.len() < 7 {
//!         return Err(FormatError::new(format!("\"{}\" is not a valid phone number", raw)));
//!     }
//!     Ok(digits)
//! });
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use regex::Regex;
use tracing::debug;

use crate::error::FormatError;

/// Name of the built-in email handler.
pub const EMAIL: &str = "email";

/// Boxed handler for type erasure
pub(crate) type BoxedFormatHandler = Arc<dyn Fn(&str) -> Result<String, FormatError> + Send + Sync>;

/// Registry of named format handlers.
///
/// Registration is additive and the last registration for a name wins. The
/// registry has its own lock, so handlers may be registered while decodes are
/// running on other threads.
pub struct FormatRegistry {
    handlers: RwLock<HashMap<String, BoxedFormatHandler>>,
}

impl FormatRegistry {
    /// Create a registry holding the built-in handlers.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register(EMAIL, format_email);
        registry
    }

    /// Create a registry with no handlers at all.
    pub fn empty() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a handler, replacing any previous handler with the same name.
    pub fn register<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&str) -> Result<String, FormatError> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(handler = %name, "registering format handler");
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, Arc::new(handler));
    }

    /// Look up a handler by name.
    pub(crate) fn get(&self, name: &str) -> Option<BoxedFormatHandler> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Check whether a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Run the handler registered under `name`.
    ///
    /// Returns `None` if no such handler exists.
    pub fn apply(&self, name: &str, raw: &str) -> Option<Result<String, FormatError>> {
        self.get(name).map(|handler| handler(raw))
    }

    /// Registered handler names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$")
            .expect("email pattern is valid")
    })
}

/// Built-in `email` handler.
///
/// Accepts a bare address or `Display Name <address>` and returns the bare
/// address.
///
/// ```rust
/// use pint::format::format_email;
///
/// assert_eq!(format_email("Jo <jo@example.com>").unwrap(), "jo@example.com");
/// assert!(format_email("not-an-email").is_err());
/// ```
pub fn format_email(raw: &str) -> Result<String, FormatError> {
    let invalid = || FormatError::new(format!("\"{}\" is not a valid email address", raw));

    let trimmed = raw.trim();
    let address = match trimmed.strip_suffix('>') {
        Some(rest) => {
            let (_, address) = rest.rsplit_once('<').ok_or_else(invalid)?;
            address.trim()
        }
        None => trimmed,
    };

    if email_regex().is_match(address) {
        Ok(address.to_string())
    } else {
        Err(invalid())
    }
}
