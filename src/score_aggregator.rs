//! # Score Aggregator
//!
//! Combines additive findings and nutrient rule outcomes into one bounded
//! health score with pros, cons and the list of unmatched ingredients.
//!
//! ## Usage
//!
//! ```rust
//! use food_score::score_aggregator::ScoringEngine;
//! use food_score::scoring_model::{AdditiveReferenceEntry, NutrientRule, NutrientValue, Nutrients};
//! use food_score::nutrient_rules::NutrientRuleTable;
//!
//! let rules = NutrientRuleTable::new(vec![(
//!     "sugar".to_string(),
//!     NutrientRule {
//!         max: Some(5.0),
//!         penalty: Some(20.0),
//!         unit: Some("g".to_string()),
//!         ..Default::default()
//!     },
//! )]);
//! let engine = ScoringEngine::new(vec![AdditiveReferenceEntry::named("Salt")], rules);
//!
//! let mut nutrients = Nutrients::new();
//! nutrients.insert("sugar".to_string(), NutrientValue::Number(8.0));
//!
//! let outcome = engine.evaluate_product(&nutrients, "Sugar, Salt")?;
//! assert_eq!(outcome.score, 80);
//! assert_eq!(outcome.missing, vec!["sugar"]);
//! # Ok::<(), food_score::scoring_errors::ScoringError>(())
//! ```

use crate::additive_index::AdditiveIndex;
use crate::additive_matcher::{assess_match, match_additives};
use crate::ingredient_parser::parse_ingredients;
use crate::nutrient_rules::{evaluate_nutrients, NutrientRuleTable};
use crate::reference_data::{load_additive_reference, load_nutrient_rules};
use crate::scoring_errors::Result;
use crate::scoring_model::{
    AdditiveReferenceEntry, EvaluationOutcome, Nutrients, ADDITIVE_LIMIT_PENALTY, BASE_SCORE,
};
use log::{debug, info};
use std::path::Path;

/// Immutable scoring configuration, built once and shared by reference
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    index: AdditiveIndex,
    rules: NutrientRuleTable,
}

impl ScoringEngine {
    pub fn new(
        additives: impl IntoIterator<Item = AdditiveReferenceEntry>,
        rules: NutrientRuleTable,
    ) -> Self {
        Self {
            index: AdditiveIndex::build(additives),
            rules,
        }
    }

    /// Load both reference datasets from disk
    pub fn from_files(
        additive_path: impl AsRef<Path>,
        rules_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let additives = load_additive_reference(additive_path)?;
        let rules = load_nutrient_rules(rules_path)?;
        Ok(Self::new(additives, rules))
    }

    pub fn index(&self) -> &AdditiveIndex {
        &self.index
    }

    pub fn rules(&self) -> &NutrientRuleTable {
        &self.rules
    }

    /// Score a product from its nutrients and ingredients statement
    ///
    /// Additive pros/cons come first, then nutrient pros/cons. Fails only when
    /// a nutrient covered by a rule holds a non-numeric value.
    pub fn evaluate_product(
        &self,
        nutrients: &Nutrients,
        ingredients_text: &str,
    ) -> Result<EvaluationOutcome> {
        let mut pros = Vec::new();
        let mut cons = Vec::new();
        let mut score = BASE_SCORE;

        let tokens = parse_ingredients(ingredients_text);
        let matches = match_additives(ingredients_text, &tokens, &self.index);

        let mut exceeded = 0usize;
        for matched in matches.distinct() {
            let assessment = assess_match(matched);
            if assessment.exceeds_limit {
                exceeded += 1;
            }
            pros.extend(assessment.pros);
            cons.extend(assessment.cons);
        }
        score -= ADDITIVE_LIMIT_PENALTY * exceeded as f64;

        let missing: Vec<String> = tokens
            .iter()
            .filter(|token| !matches.is_found(token))
            .map(|token| token.to_string())
            .collect();

        let nutrient_findings = evaluate_nutrients(nutrients, &self.rules)?;
        score += nutrient_findings.score_delta;
        pros.extend(nutrient_findings.pros);
        cons.extend(nutrient_findings.cons);

        let score = clamp_score(score);
        debug!(
            "Scored {} tokens: {} matched, {} over limit, {} missing",
            tokens.len(),
            matches.matches.len(),
            exceeded,
            missing.len()
        );
        info!("Evaluation finished with score {}", score);

        Ok(EvaluationOutcome {
            score,
            pros,
            cons,
            missing,
        })
    }
}

/// Round and clamp a raw score into 0..=100
pub fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
