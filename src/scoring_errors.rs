//! # Scoring Error Types Module
//!
//! This module defines the error type shared by the scoring engine, the reference
//! data loaders and the product lookup client.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading reference data or evaluating a product
#[derive(Debug, Error)]
pub enum ScoringError {
    /// A supplied nutrient value could not be read as a number
    #[error("Invalid value for nutrient '{nutrient}': '{value}' is not numeric")]
    InvalidNutrientValue { nutrient: String, value: String },

    /// A reference dataset could not be read from disk
    #[error("Failed to read reference file {}: {source}", path.display())]
    ReferenceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A reference dataset is not valid JSON or has the wrong shape
    #[error("Malformed {what}: {source}")]
    ReferenceFormat {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The product database lookup failed at the transport or decoding level
    #[error("Product lookup error: {0}")]
    Lookup(String),
}

impl From<reqwest::Error> for ScoringError {
    fn from(err: reqwest::Error) -> Self {
        ScoringError::Lookup(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_nutrient_value_message() {
        let err = ScoringError::InvalidNutrientValue {
            nutrient: "sugar".to_string(),
            value: "lots".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for nutrient 'sugar': 'lots' is not numeric"
        );
    }

    #[test]
    fn test_reference_read_keeps_source() {
        use std::error::Error as _;

        let err = ScoringError::ReferenceRead {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("missing.json"));
        assert!(err.source().is_some());
    }
}
