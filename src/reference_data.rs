//! # Reference Data Module
//!
//! Loads the two static datasets the scoring engine is built from:
//! the regulatory additive reference and the nutrient rule table.
//!
//! Additive records may be objects or bare strings. Missing fields are
//! tolerated, unknown fields are ignored, and `max_permitted` may be written
//! as a number or a numeric string. Nutrient rules keep their document order.

use crate::nutrient_rules::NutrientRuleTable;
use crate::scoring_errors::{Result, ScoringError};
use crate::scoring_model::{AdditiveCategory, AdditiveReferenceEntry, NutrientRule};
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Additive record as written in the reference file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAdditiveRecord {
    Bare(String),
    Entry {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        max_permitted: Option<Value>,
    },
}

impl RawAdditiveRecord {
    fn into_entry(self) -> AdditiveReferenceEntry {
        match self {
            RawAdditiveRecord::Bare(name) => AdditiveReferenceEntry::named(&name),
            RawAdditiveRecord::Entry {
                name,
                code,
                category,
                max_permitted,
            } => AdditiveReferenceEntry {
                name: name.filter(|n| !n.trim().is_empty()),
                code: code.filter(|c| !c.trim().is_empty()),
                category: category
                    .filter(|c| !c.trim().is_empty())
                    .map(|c| AdditiveCategory::parse(&c)),
                max_permitted: max_permitted.as_ref().and_then(permitted_limit),
            },
        }
    }
}

fn permitted_limit(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => match text.trim().parse::<f64>() {
            Ok(limit) => Some(limit),
            Err(_) => {
                warn!("Ignoring non-numeric max_permitted '{}'", text);
                None
            }
        },
        _ => None,
    }
}

/// Parse an additive reference document
///
/// Accepts a JSON array of records, or an object whose values are the records.
pub fn parse_additive_reference(json: &str) -> Result<Vec<AdditiveReferenceEntry>> {
    let document: Value =
        serde_json::from_str(json).map_err(|source| ScoringError::ReferenceFormat {
            what: "additive reference",
            source,
        })?;

    let records = match document {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        other => {
            warn!("Additive reference is neither an array nor an object: {}", other);
            Vec::new()
        }
    };

    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<RawAdditiveRecord>(record) {
            Ok(raw) => entries.push(raw.into_entry()),
            Err(e) => warn!("Skipping unreadable additive record: {}", e),
        }
    }
    Ok(entries)
}

/// Parse a nutrient rule document (an object keyed by nutrient name)
pub fn parse_nutrient_rules(json: &str) -> Result<NutrientRuleTable> {
    let document: serde_json::Map<String, Value> =
        serde_json::from_str(json).map_err(|source| ScoringError::ReferenceFormat {
            what: "nutrient rules",
            source,
        })?;

    let mut rules = Vec::with_capacity(document.len());
    for (key, value) in document {
        let rule: NutrientRule =
            serde_json::from_value(value).map_err(|source| ScoringError::ReferenceFormat {
                what: "nutrient rules",
                source,
            })?;
        rules.push((key, rule));
    }
    Ok(NutrientRuleTable::new(rules))
}

fn read_reference(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ScoringError::ReferenceRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the additive reference from disk
pub fn load_additive_reference(path: impl AsRef<Path>) -> Result<Vec<AdditiveReferenceEntry>> {
    let path = path.as_ref();
    let entries = parse_additive_reference(&read_reference(path)?)?;
    info!("Loaded {} additive records from {}", entries.len(), path.display());
    Ok(entries)
}

/// Load the nutrient rule table from disk
pub fn load_nutrient_rules(path: impl AsRef<Path>) -> Result<NutrientRuleTable> {
    let path = path.as_ref();
    let rules = parse_nutrient_rules(&read_reference(path)?)?;
    info!("Loaded {} nutrient rules from {}", rules.len(), path.display());
    Ok(rules)
}
