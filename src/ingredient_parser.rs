//! # Ingredient Parser
//!
//! This module splits a raw ingredients statement into a flat list of normalized
//! ingredient tokens and explicit additive codes.
//!
//! ## Features
//!
//! - Splits on commas and on both parenthesis characters, so qualifier text
//!   inside parentheses becomes its own candidate token
//! - Emits every additive code found in a fragment as a separate code token
//! - Emits the normalized fragment itself as a name token when non-empty
//! - Keeps input order and does not deduplicate
//!
//! ## Usage
//!
//! ```rust
//! use food_score::ingredient_parser::parse_ingredients;
//!
//! let tokens = parse_ingredients("Sugar, Colour (E150), Salt");
//! let tokens: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
//!
//! assert_eq!(tokens, vec!["sugar", "colour", "E150", "e150", "salt"]);
//! ```

use crate::scoring_model::IngredientToken;
use crate::scoring_patterns::INGREDIENT_DELIMITER_REGEX;
use crate::text_normalizer::{extract_additive_codes, normalize_ingredient};
use log::debug;

/// Parse an ingredients statement into tokens
///
/// Empty or whitespace-only input yields no tokens.
pub fn parse_ingredients(ingredients_text: &str) -> Vec<IngredientToken> {
    let mut tokens = Vec::new();

    for fragment in INGREDIENT_DELIMITER_REGEX.split(ingredients_text) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }

        tokens.extend(
            extract_additive_codes(fragment)
                .into_iter()
                .map(IngredientToken::Code),
        );

        let name = normalize_ingredient(fragment);
        if !name.is_empty() {
            tokens.push(IngredientToken::Name(name));
        }
    }

    debug!(
        "Parsed {} tokens ({} codes) from ingredients text",
        tokens.len(),
        tokens.iter().filter(|t| t.is_code()).count()
    );
    tokens
}
