//! # Food Score
//!
//! Estimates a packaged-food health score (0-100) from nutrient values and an
//! ingredients statement, with human-readable pros, cons and the list of
//! ingredients that matched no regulatory reference entry.

pub mod additive_index;
pub mod additive_matcher;
pub mod config;
pub mod ingredient_parser;
pub mod label_text;
pub mod nutrient_rules;
pub mod product_lookup;
pub mod reference_data;
pub mod report;
pub mod score_aggregator;
pub mod scoring_errors;
pub mod scoring_model;
pub mod scoring_patterns;
pub mod text_normalizer;

pub use score_aggregator::ScoringEngine;
pub use scoring_errors::ScoringError;
pub use scoring_model::{EvaluationOutcome, NutrientValue, Nutrients, ProductRecord};
