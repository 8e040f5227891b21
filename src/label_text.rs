//! # Label Text Module
//!
//! Helpers for text that was OCR'd from a product label: whitespace cleanup
//! and locating the ingredients statement among the other label sections.

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

/// Maximum number of lines read after an ingredients header
pub const MAX_SECTION_LINES: usize = 5;

lazy_static! {
    // Header at the start of a line: "Ingredients", "INGREDIENTS:", "Ingredients list -"
    static ref INGREDIENTS_HEADER_REGEX: Regex =
        Regex::new(r"(?i)^ingredients\b(?:\s+list)?\s*[:\-]?\s*")
            .expect("Ingredients header pattern should be valid");
    // Headers of the label sections that usually follow the ingredients
    static ref NEXT_SECTION_REGEX: Regex = Regex::new(
        r"(?i)^(?:nutrition|nutritional|allergen|allergy|storage|contains|best before|manufactured|net\s+(?:wt|weight))\b"
    )
    .expect("Section header pattern should be valid");
}

/// Trim every line and drop the empty ones
///
/// # Examples
///
/// ```rust
/// use food_score::label_text::clean_ocr_text;
///
/// assert_eq!(clean_ocr_text("  Sugar \n\n  Salt  \n"), "Sugar\nSalt");
/// ```
pub fn clean_ocr_text(raw: &str) -> String {
    raw.trim()
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Extract the ingredients statement from label text
///
/// Reads the rest of the header line plus up to [`MAX_SECTION_LINES`]
/// following lines, stopping early at a blank line or the next label section.
///
/// # Examples
///
/// ```rust
/// use food_score::label_text::extract_ingredients_section;
///
/// let text = "Choco Wafers\nIngredients: Sugar, Wheat Flour,\nCocoa (8%)\nNutrition Facts\nEnergy 520 kcal";
/// assert_eq!(
///     extract_ingredients_section(text).as_deref(),
///     Some("Sugar, Wheat Flour, Cocoa (8%)")
/// );
/// ```
pub fn extract_ingredients_section(text: &str) -> Option<String> {
    let mut lines = text.lines().map(str::trim);

    let header_rest = lines.by_ref().find_map(|line| {
        INGREDIENTS_HEADER_REGEX
            .find(line)
            .map(|header| line[header.end()..].to_string())
    })?;

    let mut parts = Vec::new();
    if !header_rest.is_empty() {
        parts.push(header_rest);
    }

    for line in lines.take(MAX_SECTION_LINES) {
        if line.is_empty() || NEXT_SECTION_REGEX.is_match(line) {
            break;
        }
        parts.push(line.to_string());
    }

    if parts.is_empty() {
        debug!("Ingredients header found but the section is empty");
        return None;
    }

    let section = parts.join(" ");
    info!("Extracted ingredients section of {} characters", section.len());
    Some(section)
}
