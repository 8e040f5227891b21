//! # Text Normalizer Module
//!
//! Canonicalizes ingredient fragments so that free text from labels and product
//! databases can be compared against the additive reference.
//!
//! ## Features
//!
//! - Removes parenthetical asides and percentage annotations
//! - Rewrites loose additive codes ("e-330") into canonical form ("E330")
//! - Folds singular additive-category words to their plural reference form
//! - Lowercases, trims and collapses whitespace

use crate::scoring_patterns::{
    ADDITIVE_CODE_REGEX, CATEGORY_SYNONYMS, CATEGORY_SYNONYM_REGEX, EXACT_ADDITIVE_CODE_REGEX,
    PARENTHETICAL_REGEX, PERCENTAGE_REGEX,
};
use log::trace;

/// Normalize an ingredient fragment for matching
///
/// Never fails; the result may be empty when the fragment only held
/// parenthetical or percentage content.
///
/// # Examples
///
/// ```rust
/// use food_score::text_normalizer::normalize_ingredient;
///
/// assert_eq!(normalize_ingredient("Acidity Regulator (E330) 2%"), "acidity regulators");
/// assert_eq!(normalize_ingredient("e-471"), "e471");
/// assert_eq!(normalize_ingredient("(contains milk)"), "");
/// ```
pub fn normalize_ingredient(raw: &str) -> String {
    let text = PARENTHETICAL_REGEX.replace_all(raw, "");
    let text = PERCENTAGE_REGEX.replace_all(&text, "");
    let text = ADDITIVE_CODE_REGEX.replace_all(&text, "E$1");
    let text = text.to_lowercase();

    let text = CATEGORY_SYNONYM_REGEX.replace_all(&text, |caps: &regex::Captures| {
        let word = &caps[0];
        CATEGORY_SYNONYMS
            .iter()
            .find(|(singular, _)| *singular == word)
            .map(|(_, plural)| plural.to_string())
            .unwrap_or_else(|| word.to_string())
    });

    let normalized = text.split_whitespace().collect::<Vec<&str>>().join(" ");
    trace!("Normalized ingredient '{}' -> '{}'", raw, normalized);
    normalized
}

/// Canonical `E<digits><suffix?>` form of a code, if the whole input is one
pub fn canonical_code(raw: &str) -> Option<String> {
    EXACT_ADDITIVE_CODE_REGEX
        .captures(raw.trim())
        .map(|caps| format!("E{}", &caps[1]))
}

/// Every additive code embedded in a fragment, canonicalized, in order of appearance
pub fn extract_additive_codes(fragment: &str) -> Vec<String> {
    ADDITIVE_CODE_REGEX
        .captures_iter(fragment)
        .map(|caps| format!("E{}", &caps[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_parentheses_and_percentages() {
        assert_eq!(normalize_ingredient("Cocoa Butter (12%)"), "cocoa butter");
        assert_eq!(normalize_ingredient("Milk Solids 14.5 %"), "milk solids");
        assert_eq!(normalize_ingredient("Sugar (cane) Syrup"), "sugar syrup");
    }

    #[test]
    fn test_nested_parentheses_are_removed_flat() {
        // Non-greedy removal stops at the first closing parenthesis
        assert_eq!(normalize_ingredient("Spice (pepper (black)) Mix"), "spice ) mix");
    }

    #[test]
    fn test_synonym_folding() {
        assert_eq!(normalize_ingredient("Emulsifier"), "emulsifiers");
        assert_eq!(normalize_ingredient("Emulsifiers"), "emulsifiers");
        assert_eq!(normalize_ingredient("Flavour Enhancer"), "flavour enhancers");
        assert_eq!(normalize_ingredient("Stabilizer"), "stabilizers");
        assert_eq!(normalize_ingredient("Class II Preservative"), "class ii preservatives");
    }

    #[test]
    fn test_code_rewriting() {
        assert_eq!(normalize_ingredient("E-322"), "e322");
        assert_eq!(normalize_ingredient("e150d"), "e150d");
    }

    #[test]
    fn test_canonical_code() {
        assert_eq!(canonical_code("e-211"), Some("E211".to_string()));
        assert_eq!(canonical_code(" E150a "), Some("E150a".to_string()));
        assert_eq!(canonical_code("sugar"), None);
        assert_eq!(canonical_code("E21"), None);
    }

    #[test]
    fn test_extract_additive_codes() {
        assert_eq!(extract_additive_codes("Acidity Regulator (E330) 2%"), vec!["E330"]);
        assert_eq!(
            extract_additive_codes("emulsifiers e-471, E322"),
            vec!["E471", "E322"]
        );
        assert!(extract_additive_codes("wheat flour").is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_ingredient(""), "");
        assert_eq!(normalize_ingredient("   "), "");
    }
}
