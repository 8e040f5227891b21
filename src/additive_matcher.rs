//! # Additive Matcher
//!
//! Resolves parsed ingredient tokens against the additive reference index,
//! extracts concentrations written next to additive names and turns every
//! matched additive into pros and cons.
//!
//! Quantity extraction scans the original ingredients text for the additive's
//! display name followed, anywhere later on the same line, by a number and a
//! concentration unit (mg/kg, g/kg or %). The scan is not anchored to the
//! token's own position, so a number belonging to a later ingredient can be
//! attributed to an earlier additive.
//!
//! Index lookups fall back to a substring scan in both directions, so very
//! short tokens such as the `a`, `c` and `e` of "Vitamins (A, C, E)" resolve
//! to the longest reference key containing that letter and count as found.

use crate::additive_index::{AdditiveIndex, IndexedAdditive};
use crate::scoring_model::{
    AdditiveCategory, ConcentrationUnit, IngredientToken, MatchResult, Quantity,
};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// How a category affects the verdict, independent of any measured quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySentiment {
    /// Always reported as a con
    Concern,
    /// Always reported as a pro
    Benefit,
    Neutral,
}

/// Categories with a fixed sentiment; every other category is neutral
pub const CATEGORY_SENTIMENTS: &[(AdditiveCategory, CategorySentiment)] = &[
    (AdditiveCategory::Preservative, CategorySentiment::Concern),
    (AdditiveCategory::ArtificialColor, CategorySentiment::Concern),
    (AdditiveCategory::Vitamin, CategorySentiment::Benefit),
    (AdditiveCategory::Mineral, CategorySentiment::Benefit),
    (AdditiveCategory::Fiber, CategorySentiment::Benefit),
];

pub fn category_sentiment(category: &AdditiveCategory) -> CategorySentiment {
    CATEGORY_SENTIMENTS
        .iter()
        .find(|(known, _)| known == category)
        .map(|(_, sentiment)| *sentiment)
        .unwrap_or(CategorySentiment::Neutral)
}

/// Matches for one ingredients statement
#[derive(Debug, Clone, Default)]
pub struct AdditiveMatches<'a> {
    /// One result per token that hit the index, in token order
    pub matches: Vec<MatchResult<'a>>,
    /// Normalized names of matched entries and the lookup keys of matching tokens
    pub found: HashSet<String>,
}

impl<'a> AdditiveMatches<'a> {
    /// First match of each distinct reference entry, in match order
    pub fn distinct(&self) -> impl Iterator<Item = &MatchResult<'a>> {
        let mut seen = HashSet::new();
        self.matches
            .iter()
            .filter(move |m| seen.insert(m.entry_id))
    }

    pub fn is_found(&self, token: &IngredientToken) -> bool {
        self.found.contains(&token.lookup_key())
    }
}

/// Pros, cons and limit verdict for one matched additive
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdditiveAssessment {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub exceeds_limit: bool,
}

/// Resolve every token against the index
pub fn match_additives<'a>(
    ingredients_text: &str,
    tokens: &[IngredientToken],
    index: &'a AdditiveIndex,
) -> AdditiveMatches<'a> {
    let mut result = AdditiveMatches::default();
    let mut quantities: HashMap<usize, Option<Quantity>> = HashMap::new();

    for token in tokens {
        let key = token.lookup_key();
        let Some(id) = index.lookup(&key) else {
            trace!("No reference entry for token '{}'", token);
            continue;
        };
        let Some(additive) = index.get(id) else {
            continue;
        };

        let quantity = *quantities
            .entry(id)
            .or_insert_with(|| extract_quantity(additive, ingredients_text));

        debug!(
            "Token '{}' matched additive '{}' (quantity: {:?})",
            token,
            additive.entry.display_name(),
            quantity
        );

        result.found.insert(additive.normalized_name.clone());
        result.found.insert(key);
        result.matches.push(MatchResult {
            token: token.clone(),
            entry_id: id,
            entry: &additive.entry,
            quantity,
        });
    }

    result
}

/// Find the first concentration following the additive's name in the raw text
pub fn extract_quantity(additive: &IndexedAdditive, ingredients_text: &str) -> Option<Quantity> {
    let caps = additive.quantity_pattern()?.captures(ingredients_text)?;
    let amount = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let unit = ConcentrationUnit::parse(caps.get(2)?.as_str())?;
    Some(Quantity::new(amount, unit))
}

/// Turn one match into pros and cons
///
/// The quantity check and the category check are independent; both can fire.
pub fn assess_match(matched: &MatchResult<'_>) -> AdditiveAssessment {
    let mut assessment = AdditiveAssessment::default();
    let entry = matched.entry;
    let name = entry.display_name();

    if let Some(quantity) = matched.quantity {
        match entry.max_permitted {
            Some(limit) if limit > 0.0 && quantity.mg_per_kg > limit => {
                assessment.exceeds_limit = true;
                assessment.cons.push(format!(
                    "{} exceeds limit ({}>{} mg/kg)",
                    name, quantity.mg_per_kg, limit
                ));
            }
            _ => assessment.pros.push(format!("{} within safe limits", name)),
        }
    }

    if let Some(category) = &entry.category {
        let note = format!("Contains {}: {}", category.label(), name);
        match category_sentiment(category) {
            CategorySentiment::Concern => assessment.cons.push(note),
            CategorySentiment::Benefit => assessment.pros.push(note),
            CategorySentiment::Neutral => {}
        }
    }

    assessment
}
