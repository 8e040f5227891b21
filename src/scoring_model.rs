//! # Scoring Data Model
//!
//! This module defines the data structures shared by the scoring pipeline:
//! parsed ingredient tokens, additive reference entries, nutrient rules and
//! the evaluation outcome handed back to callers.
//!
//! ## Core Concepts
//!
//! - **IngredientToken**: one normalized ingredient name or one canonical E-number
//! - **AdditiveReferenceEntry**: a regulated additive with optional code, category and limit
//! - **NutrientRule**: a max/min threshold policy for a single nutrient key
//! - **EvaluationOutcome**: the bounded score plus pros, cons and missing ingredients
//!
//! ## Usage
//!
//! ```rust
//! use food_score::scoring_model::{AdditiveCategory, ConcentrationUnit, IngredientToken};
//!
//! let token = IngredientToken::Code("E330".to_string());
//! assert_eq!(token.lookup_key(), "e330");
//!
//! assert_eq!(AdditiveCategory::parse("Preservative"), AdditiveCategory::Preservative);
//! assert_eq!(ConcentrationUnit::GPerKg.to_mg_per_kg(1.5), 1500.0);
//! ```

use crate::scoring_errors::{Result, ScoringError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Points subtracted when a nutrient exceeds its max and the rule names no penalty
pub const DEFAULT_NUTRIENT_PENALTY: f64 = 10.0;
/// Points added when a nutrient stays below its min and the rule names no bonus
pub const DEFAULT_NUTRIENT_BONUS: f64 = 5.0;
/// Points subtracted for every additive found above its permitted concentration
pub const ADDITIVE_LIMIT_PENALTY: f64 = 15.0;
/// Score every evaluation starts from
pub const BASE_SCORE: f64 = 100.0;
/// Converted concentrations keep six decimals of mg/kg
const MG_PER_KG_PRECISION: f64 = 1e6;

/// A single token produced by the ingredient parser
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientToken {
    /// Normalized, lowercase ingredient name (e.g. "sugar", "acidity regulators")
    Name(String),
    /// Canonical additive code (e.g. "E330", "E150a")
    Code(String),
}

impl IngredientToken {
    pub fn as_str(&self) -> &str {
        match self {
            IngredientToken::Name(name) => name,
            IngredientToken::Code(code) => code,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, IngredientToken::Code(_))
    }

    /// Form used for index lookups and for found/missing bookkeeping
    pub fn lookup_key(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for IngredientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Regulatory category of an additive
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AdditiveCategory {
    Preservative,
    ArtificialColor,
    Vitamin,
    Mineral,
    Fiber,
    Emulsifier,
    Stabilizer,
    AcidityRegulator,
    FlavourEnhancer,
    /// Any category outside the known set, stored lowercased
    Other(String),
}

impl AdditiveCategory {
    /// Parse a category label, case-insensitively
    pub fn parse(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        match label.as_str() {
            "preservative" => AdditiveCategory::Preservative,
            "artificial color" | "artificial colour" => AdditiveCategory::ArtificialColor,
            "vitamin" => AdditiveCategory::Vitamin,
            "mineral" => AdditiveCategory::Mineral,
            "fiber" | "fibre" => AdditiveCategory::Fiber,
            "emulsifier" => AdditiveCategory::Emulsifier,
            "stabilizer" | "stabiliser" => AdditiveCategory::Stabilizer,
            "acidity regulator" => AdditiveCategory::AcidityRegulator,
            "flavour enhancer" | "flavor enhancer" => AdditiveCategory::FlavourEnhancer,
            _ => AdditiveCategory::Other(label),
        }
    }

    /// Lowercase label used in pros/cons
    pub fn label(&self) -> &str {
        match self {
            AdditiveCategory::Preservative => "preservative",
            AdditiveCategory::ArtificialColor => "artificial color",
            AdditiveCategory::Vitamin => "vitamin",
            AdditiveCategory::Mineral => "mineral",
            AdditiveCategory::Fiber => "fiber",
            AdditiveCategory::Emulsifier => "emulsifier",
            AdditiveCategory::Stabilizer => "stabilizer",
            AdditiveCategory::AcidityRegulator => "acidity regulator",
            AdditiveCategory::FlavourEnhancer => "flavour enhancer",
            AdditiveCategory::Other(label) => label,
        }
    }
}

impl From<String> for AdditiveCategory {
    fn from(label: String) -> Self {
        AdditiveCategory::parse(&label)
    }
}

impl From<AdditiveCategory> for String {
    fn from(category: AdditiveCategory) -> Self {
        category.label().to_string()
    }
}

impl fmt::Display for AdditiveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One record of the regulatory additive reference
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdditiveReferenceEntry {
    /// Display name as written in the reference (e.g. "Sodium Benzoate")
    pub name: Option<String>,
    /// Additive code (e.g. "E211")
    pub code: Option<String>,
    pub category: Option<AdditiveCategory>,
    /// Maximum permitted concentration in mg/kg
    pub max_permitted: Option<f64>,
}

impl AdditiveReferenceEntry {
    /// Name-only entry, as produced by bare-string reference records
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }

    pub fn with_category(mut self, category: AdditiveCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_max_permitted(mut self, max_permitted: f64) -> Self {
        self.max_permitted = Some(max_permitted);
        self
    }

    /// Name shown in pros/cons; falls back to the code, then to a placeholder
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.code.as_deref().filter(|code| !code.trim().is_empty()))
            .unwrap_or("Unknown additive")
    }
}

/// Concentration units recognised next to additive names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcentrationUnit {
    MgPerKg,
    GPerKg,
    Percent,
}

impl ConcentrationUnit {
    pub fn parse(unit: &str) -> Option<Self> {
        match unit.trim().to_lowercase().as_str() {
            "mg/kg" => Some(ConcentrationUnit::MgPerKg),
            "g/kg" => Some(ConcentrationUnit::GPerKg),
            "%" => Some(ConcentrationUnit::Percent),
            _ => None,
        }
    }

    /// Convert an amount in this unit to the canonical mg/kg
    ///
    /// The result is rounded to six decimals so that values written at a
    /// limit ("0.035%") compare equal to it (350 mg/kg).
    pub fn to_mg_per_kg(self, amount: f64) -> f64 {
        let factor = match self {
            ConcentrationUnit::MgPerKg => 1.0,
            ConcentrationUnit::GPerKg => 1000.0,
            ConcentrationUnit::Percent => 10000.0,
        };
        (amount * factor * MG_PER_KG_PRECISION).round() / MG_PER_KG_PRECISION
    }
}

/// A concentration found near an additive name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Amount as written in the text
    pub amount: f64,
    pub unit: ConcentrationUnit,
    /// Amount converted to mg/kg
    pub mg_per_kg: f64,
}

impl Quantity {
    pub fn new(amount: f64, unit: ConcentrationUnit) -> Self {
        Self {
            amount,
            unit,
            mg_per_kg: unit.to_mg_per_kg(amount),
        }
    }
}

/// Threshold policy for one nutrient key
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientRule {
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub penalty: Option<f64>,
    pub bonus: Option<f64>,
    pub unit: Option<String>,
}

impl NutrientRule {
    pub fn penalty_points(&self) -> f64 {
        self.penalty.unwrap_or(DEFAULT_NUTRIENT_PENALTY)
    }

    pub fn bonus_points(&self) -> f64 {
        self.bonus.unwrap_or(DEFAULT_NUTRIENT_BONUS)
    }

    pub fn unit_label(&self) -> &str {
        self.unit.as_deref().unwrap_or("")
    }
}

/// A nutrient value as supplied by the lookup or OCR layer: a number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutrientValue {
    Number(f64),
    Text(String),
}

impl NutrientValue {
    /// Read the value as a float, failing with `InvalidNutrientValue` for non-numeric text
    pub fn as_f64(&self, nutrient: &str) -> Result<f64> {
        match self {
            NutrientValue::Number(value) => Ok(*value),
            NutrientValue::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                ScoringError::InvalidNutrientValue {
                    nutrient: nutrient.to_string(),
                    value: text.clone(),
                }
            }),
        }
    }
}

impl From<f64> for NutrientValue {
    fn from(value: f64) -> Self {
        NutrientValue::Number(value)
    }
}

impl From<&str> for NutrientValue {
    fn from(value: &str) -> Self {
        NutrientValue::Text(value.to_string())
    }
}

impl From<&serde_json::Value> for NutrientValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(number) => match number.as_f64() {
                Some(value) => NutrientValue::Number(value),
                None => NutrientValue::Text(number.to_string()),
            },
            serde_json::Value::String(text) => NutrientValue::Text(text.clone()),
            other => NutrientValue::Text(other.to_string()),
        }
    }
}

/// Nutrient name to value, with units implied by the matching rule
pub type Nutrients = HashMap<String, NutrientValue>;

/// A reference entry resolved for one parsed token
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    /// The token that hit the index
    pub token: IngredientToken,
    /// Position of the entry in the index, stable for the index lifetime
    pub entry_id: usize,
    pub entry: &'a AdditiveReferenceEntry,
    pub quantity: Option<Quantity>,
}

/// Result of scoring one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    /// Health score, always within 0..=100
    pub score: u8,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    /// Parsed ingredients that matched no reference entry, in input order
    pub missing: Vec<String>,
}

/// Which input path populated a product record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSource {
    Barcode,
    LabelText,
    Manual,
}

/// Normalized product data handed to the scoring engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_name: String,
    pub ingredients_text: String,
    pub nutrients: Nutrients,
    pub source: InputSource,
}

impl ProductRecord {
    pub fn new(source: InputSource) -> Self {
        Self {
            product_name: String::new(),
            ingredients_text: String::new(),
            nutrients: Nutrients::new(),
            source,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.ingredients_text.trim().is_empty() || !self.nutrients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing_is_case_insensitive() {
        assert_eq!(AdditiveCategory::parse("PRESERVATIVE"), AdditiveCategory::Preservative);
        assert_eq!(
            AdditiveCategory::parse("Artificial Colour"),
            AdditiveCategory::ArtificialColor
        );
        assert_eq!(
            AdditiveCategory::parse("Thickener"),
            AdditiveCategory::Other("thickener".to_string())
        );
        assert_eq!(AdditiveCategory::parse("Thickener").label(), "thickener");
    }

    #[test]
    fn test_category_deserializes_from_string() {
        let entry: AdditiveReferenceEntry = serde_json::from_str(
            r#"{"name": "Riboflavin", "code": "E101", "category": "Vitamin"}"#,
        )
        .unwrap();
        assert_eq!(entry.category, Some(AdditiveCategory::Vitamin));
        assert_eq!(entry.max_permitted, None);
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(AdditiveReferenceEntry::named("Pectin").display_name(), "Pectin");

        let code_only = AdditiveReferenceEntry {
            code: Some("E440".to_string()),
            ..Default::default()
        };
        assert_eq!(code_only.display_name(), "E440");
        assert_eq!(
            AdditiveReferenceEntry::default().display_name(),
            "Unknown additive"
        );
    }

    #[test]
    fn test_concentration_conversion() {
        assert_eq!(ConcentrationUnit::parse("MG/KG"), Some(ConcentrationUnit::MgPerKg));
        assert_eq!(ConcentrationUnit::parse("ppm"), None);

        let qty = Quantity::new(0.2, ConcentrationUnit::Percent);
        assert_eq!(qty.mg_per_kg, 2000.0);
        assert_eq!(Quantity::new(1200.0, ConcentrationUnit::MgPerKg).mg_per_kg, 1200.0);
    }

    #[test]
    fn test_percent_conversion_has_no_float_noise() {
        // 0.035 * 10000.0 is 350.00000000000006 before rounding
        assert_eq!(ConcentrationUnit::Percent.to_mg_per_kg(0.035), 350.0);
        assert_eq!(ConcentrationUnit::Percent.to_mg_per_kg(0.07), 700.0);
        assert_eq!(ConcentrationUnit::GPerKg.to_mg_per_kg(0.35), 350.0);
        assert_eq!(ConcentrationUnit::MgPerKg.to_mg_per_kg(12.5), 12.5);
    }

    #[test]
    fn test_nutrient_value_parsing() {
        assert_eq!(NutrientValue::from(8.0).as_f64("sugar").unwrap(), 8.0);
        assert_eq!(NutrientValue::from(" 2.5 ").as_f64("salt").unwrap(), 2.5);

        let err = NutrientValue::from("n/a").as_f64("salt").unwrap_err();
        assert!(matches!(
            err,
            ScoringError::InvalidNutrientValue { ref nutrient, .. } if nutrient == "salt"
        ));
    }

    #[test]
    fn test_nutrient_value_from_json() {
        let value = serde_json::json!(12);
        assert_eq!(NutrientValue::from(&value), NutrientValue::Number(12.0));

        let value = serde_json::json!("4.1");
        assert_eq!(NutrientValue::from(&value), NutrientValue::Text("4.1".to_string()));

        let value = serde_json::json!(true);
        assert!(NutrientValue::from(&value).as_f64("flag").is_err());
    }

    #[test]
    fn test_rule_defaults() {
        let rule = NutrientRule::default();
        assert_eq!(rule.penalty_points(), 10.0);
        assert_eq!(rule.bonus_points(), 5.0);
        assert_eq!(rule.unit_label(), "");
    }
}
