//! # Report Module
//!
//! Plain-text rendering of an evaluation outcome for the command line.

use crate::scoring_model::{EvaluationOutcome, ProductRecord};

/// Render a product's outcome as a multi-line report
pub fn format_outcome(product: &ProductRecord, outcome: &EvaluationOutcome) -> String {
    let mut output = String::new();

    if !product.product_name.is_empty() {
        output.push_str(&format!("{}\n", product.product_name));
    }
    output.push_str(&format!("Health Score: {}/100\n", outcome.score));

    if !outcome.pros.is_empty() {
        output.push_str("\n✅ Pros\n");
        for pro in &outcome.pros {
            output.push_str(&format!("- {}\n", pro));
        }
    }

    if !outcome.cons.is_empty() {
        output.push_str("\n⚠️ Cons\n");
        for con in &outcome.cons {
            output.push_str(&format!("- {}\n", con));
        }
    }

    if !outcome.missing.is_empty() {
        output.push_str(&format!("\n🔍 No data found for: {}\n", outcome.missing.join(", ")));
    }

    output
}

/// Render the message shown when a product could not be scored
pub fn format_unscored(product: &ProductRecord, reason: &str) -> String {
    let name = if product.product_name.is_empty() {
        "Product"
    } else {
        product.product_name.as_str()
    };
    format!("{} is unscored: {}\n", name, reason)
}
