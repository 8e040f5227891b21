//! # Scoring Patterns Module
//!
//! This module contains the regex patterns and lookup tables used to normalize
//! and split ingredient text.

use lazy_static::lazy_static;
use regex::Regex;

// Parenthetical asides, non-greedy; nested parentheses are not balanced
pub const PARENTHETICAL_PATTERN: &str = r"\(.*?\)";

// Percentage annotations such as "2%", "12.5 %"
pub const PERCENTAGE_PATTERN: &str = r"\d+\.?\d*\s*%";

// Loose additive code spellings: "E330", "e-330", "E150a"
pub const ADDITIVE_CODE_PATTERN: &str = r"[Ee]-?(\d{3}[a-zA-Z]?)";

// Fragment delimiters for ingredient lists
pub const INGREDIENT_DELIMITER_PATTERN: &str = r"[,()]";

// Quantity tail appended to an escaped additive name
pub const QUANTITY_TAIL_PATTERN: &str = r".*?(\d+(?:\.\d+)?)\s*(mg/kg|g/kg|%)";

/// Additive-category words folded to the plural form used by reference categories
pub const CATEGORY_SYNONYMS: &[(&str, &str)] = &[
    ("acidity regulator", "acidity regulators"),
    ("emulsifier", "emulsifiers"),
    ("flavour enhancer", "flavour enhancers"),
    ("stabilizer", "stabilizers"),
    ("preservative", "preservatives"),
];

lazy_static! {
    pub static ref PARENTHETICAL_REGEX: Regex =
        Regex::new(PARENTHETICAL_PATTERN).expect("Parenthetical pattern should be valid");
    pub static ref PERCENTAGE_REGEX: Regex =
        Regex::new(PERCENTAGE_PATTERN).expect("Percentage pattern should be valid");
    pub static ref ADDITIVE_CODE_REGEX: Regex =
        Regex::new(ADDITIVE_CODE_PATTERN).expect("Additive code pattern should be valid");
    pub static ref EXACT_ADDITIVE_CODE_REGEX: Regex =
        Regex::new(&format!("^{ADDITIVE_CODE_PATTERN}$"))
            .expect("Exact additive code pattern should be valid");
    pub static ref INGREDIENT_DELIMITER_REGEX: Regex = Regex::new(INGREDIENT_DELIMITER_PATTERN)
        .expect("Ingredient delimiter pattern should be valid");
    // Whole-word match on the singular forms only, so plurals are left alone
    pub static ref CATEGORY_SYNONYM_REGEX: Regex = Regex::new(&format!(
        r"\b(?:{})\b",
        CATEGORY_SYNONYMS
            .iter()
            .map(|(singular, _)| regex::escape(singular))
            .collect::<Vec<_>>()
            .join("|")
    ))
    .expect("Category synonym pattern should be valid");
}

/// Build the case-insensitive quantity pattern anchored on an additive name
pub fn quantity_pattern_for(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "(?i){}{}",
        regex::escape(name),
        QUANTITY_TAIL_PATTERN
    ))
}
