//! # Additive Reference Index
//!
//! Lookup structure over the regulatory additive reference, keyed by normalized
//! entry name and by lowercased additive code.
//!
//! Lookups try an exact key first, then fall back to a substring scan where the
//! token contains a key or a key contains the token. The scan visits keys
//! longest first (ties keep insertion order), so the most specific key wins.

use crate::scoring_model::AdditiveReferenceEntry;
use crate::scoring_patterns::quantity_pattern_for;
use crate::text_normalizer::{canonical_code, normalize_ingredient};
use log::{debug, info, warn};
use regex::Regex;
use std::cmp::Reverse;
use std::collections::HashMap;

/// A reference entry together with its precompiled quantity pattern
#[derive(Debug, Clone)]
pub struct IndexedAdditive {
    pub entry: AdditiveReferenceEntry,
    /// Normalized display name, recorded in the found-set on a match
    pub normalized_name: String,
    quantity_pattern: Option<Regex>,
}

impl IndexedAdditive {
    fn new(entry: AdditiveReferenceEntry) -> Self {
        let display_name = entry.display_name().to_string();
        let quantity_pattern = match quantity_pattern_for(&display_name) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("No quantity pattern for additive '{}': {}", display_name, e);
                None
            }
        };

        Self {
            normalized_name: normalize_ingredient(&display_name),
            entry,
            quantity_pattern,
        }
    }

    pub fn quantity_pattern(&self) -> Option<&Regex> {
        self.quantity_pattern.as_ref()
    }
}

/// Immutable index over the additive reference
#[derive(Debug, Clone, Default)]
pub struct AdditiveIndex {
    additives: Vec<IndexedAdditive>,
    keys: HashMap<String, usize>,
    /// Keys in substring-scan order
    scan_order: Vec<String>,
}

impl AdditiveIndex {
    /// Build the index; later entries overwrite earlier ones on key collisions
    pub fn build(entries: impl IntoIterator<Item = AdditiveReferenceEntry>) -> Self {
        let mut additives = Vec::new();
        let mut keys: HashMap<String, usize> = HashMap::new();
        let mut insertion_order = Vec::new();

        for entry in entries {
            let id = additives.len();
            let mut entry_keys = Vec::with_capacity(2);

            if let Some(name) = entry.name.as_deref() {
                let key = normalize_ingredient(name);
                if !key.is_empty() {
                    entry_keys.push(key);
                }
            }
            if let Some(code) = entry.code.as_deref() {
                let key = canonical_code(code)
                    .unwrap_or_else(|| code.trim().to_string())
                    .to_lowercase();
                if !key.is_empty() {
                    entry_keys.push(key);
                }
            }

            if entry_keys.is_empty() {
                debug!("Skipping reference entry without name or code: {:?}", entry);
                continue;
            }

            for key in entry_keys {
                if keys.insert(key.clone(), id).is_some() {
                    debug!("Reference key '{}' overwritten by a later entry", key);
                } else {
                    insertion_order.push(key);
                }
            }
            additives.push(IndexedAdditive::new(entry));
        }

        let mut scan_order = insertion_order;
        scan_order.sort_by_key(|key| Reverse(key.chars().count()));

        info!(
            "Built additive index with {} entries and {} keys",
            additives.len(),
            keys.len()
        );

        Self {
            additives,
            keys,
            scan_order,
        }
    }

    pub fn len(&self) -> usize {
        self.additives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.additives.is_empty()
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn get(&self, id: usize) -> Option<&IndexedAdditive> {
        self.additives.get(id)
    }

    /// Resolve a normalized token to an entry id: exact key, then substring scan
    pub fn lookup(&self, token: &str) -> Option<usize> {
        if token.is_empty() {
            return None;
        }

        if let Some(&id) = self.keys.get(token) {
            return Some(id);
        }

        self.scan_order
            .iter()
            .find(|key| token.contains(key.as_str()) || key.contains(token))
            .and_then(|key| self.keys.get(key).copied())
    }

    /// Same as [`lookup`](Self::lookup), returning the indexed entry
    pub fn lookup_entry(&self, token: &str) -> Option<&IndexedAdditive> {
        self.lookup(token).and_then(|id| self.get(id))
    }
}
