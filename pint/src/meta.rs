//! Field metadata derivation and caching.
//!
//! [`FieldMeta`] is what the decoder actually walks: the field's resolved
//! form name, its kind, its position in the record and its parsed tag
//! options. It is derived from a record's [`FieldDecl`]s once per record type
//! and kept in a [`FieldCache`] for the lifetime of the cache.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::tag::{parse_tag, TagOptions};
use crate::traits::FormRecord;
use crate::types::{FieldDecl, FieldKind};

/// Derived metadata for one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    /// Form key the value is looked up under.
    pub name: String,
    /// Declared value kind.
    pub kind: FieldKind,
    /// Position of the field in the record's declarations.
    pub index: usize,
    /// Options parsed from the tag.
    pub options: TagOptions,
}

impl FieldMeta {
    /// Derive metadata from a static declaration.
    ///
    /// The tag's name wins over the identifier unless it is empty.
    pub fn from_decl(index: usize, decl: &FieldDecl) -> Self {
        let (tag_name, options) = parse_tag(decl.tag);
        let name = if tag_name.is_empty() {
            decl.ident.to_string()
        } else {
            tag_name
        };

        Self {
            name,
            kind: decl.kind,
            index,
            options,
        }
    }
}

/// Derive the ordered metadata list for a record type without caching.
pub fn derive_fields<T: FormRecord>() -> Vec<FieldMeta> {
    T::field_decls()
        .iter()
        .enumerate()
        .map(|(index, decl)| FieldMeta::from_decl(index, decl))
        .collect()
}

/// Thread-safe cache of field metadata keyed by record type.
///
/// Entries are filled on first use and never evicted: record shapes are fixed
/// at compile time. Lookups take the shared lock. A miss takes the exclusive
/// lock and checks again, so metadata is derived only when no other caller
/// stored it in the meantime.
#[derive(Debug, Default)]
pub struct FieldCache {
    entries: RwLock<HashMap<TypeId, Arc<[FieldMeta]>>>,
}

impl FieldCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the metadata for `T`, deriving it on first use.
    pub fn fields<T: FormRecord>(&self) -> Arc<[FieldMeta]> {
        let key = TypeId::of::<T>();

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(fields) = entries.get(&key) {
                trace!(record = T::record_name(), "field cache hit");
                return Arc::clone(fields);
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.get(&key) {
            trace!(record = T::record_name(), "field cache filled by another caller");
            return Arc::clone(existing);
        }

        let fields: Arc<[FieldMeta]> = derive_fields::<T>().into();
        debug!(
            record = T::record_name(),
            field_count = fields.len(),
            "field cache filled"
        );
        entries.insert(key, Arc::clone(&fields));
        fields
    }

    /// Check whether metadata for `T` has been cached.
    pub fn contains<T: FormRecord>(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>())
    }

    /// Number of cached record types.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
