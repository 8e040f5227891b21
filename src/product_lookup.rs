//! # Product Lookup Module
//!
//! Thin client for the public OpenFoodFacts product database. It turns a
//! barcode into the normalized product record the scoring engine consumes.

use crate::scoring_errors::Result;
use crate::scoring_model::{InputSource, NutrientValue, Nutrients, ProductRecord};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_API_BASE_URL: &str = "https://world.openfoodfacts.org";

/// Barcode lookup against an OpenFoodFacts-compatible API
#[derive(Debug, Clone)]
pub struct ProductLookup {
    client: reqwest::Client,
    base_url: String,
}

impl ProductLookup {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn product_url(&self, barcode: &str) -> String {
        format!("{}/api/v0/product/{}.json", self.base_url, barcode.trim())
    }

    /// Fetch a product; `Ok(None)` when the database does not know the barcode
    pub async fn lookup_barcode(&self, barcode: &str) -> Result<Option<ProductRecord>> {
        let url = self.product_url(barcode);
        debug!(%url, "Requesting product");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(barcode, %status, "Product lookup returned a non-success status");
            return Ok(None);
        }

        let body: Value = response.json().await?;
        let product = product_from_response(&body);
        match &product {
            Some(record) => info!(barcode, name = %record.product_name, "Product found"),
            None => info!(barcode, "Product not found"),
        }
        Ok(product)
    }
}

/// Decode an OpenFoodFacts product response
///
/// Returns `None` when the response reports `status: 0` or carries no product.
pub fn product_from_response(body: &Value) -> Option<ProductRecord> {
    if body.get("status").and_then(Value::as_i64) == Some(0) {
        return None;
    }
    let product = body.get("product")?.as_object()?;

    let text_field = |key: &str| {
        product
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let nutrients: Nutrients = product
        .get("nutriments")
        .and_then(Value::as_object)
        .map(|nutriments| {
            nutriments
                .iter()
                .map(|(key, value)| (key.clone(), NutrientValue::from(value)))
                .collect()
        })
        .unwrap_or_default();

    Some(ProductRecord {
        product_name: text_field("product_name"),
        ingredients_text: text_field("ingredients_text"),
        nutrients,
        source: InputSource::Barcode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_url() {
        let lookup = ProductLookup::new("https://example.org/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            lookup.product_url(" 3017620422003 "),
            "https://example.org/api/v0/product/3017620422003.json"
        );
    }

    #[test]
    fn test_decode_found_product() {
        let body = json!({
            "status": 1,
            "product": {
                "product_name": "Hazelnut Spread",
                "ingredients_text": "Sugar, Palm Oil, Hazelnuts 13%, Emulsifier (Lecithins)",
                "nutriments": {
                    "sugars_100g": 56.3,
                    "salt_100g": "0.107",
                    "sugars_unit": "g"
                }
            }
        });
        let record = product_from_response(&body).unwrap();

        assert_eq!(record.product_name, "Hazelnut Spread");
        assert_eq!(record.source, InputSource::Barcode);
        assert_eq!(record.nutrients["sugars_100g"], NutrientValue::Number(56.3));
        assert_eq!(record.nutrients["salt_100g"].as_f64("salt_100g").unwrap(), 0.107);
        assert!(record.has_data());
    }

    #[test]
    fn test_decode_missing_product() {
        let not_found = json!({"status": 0, "status_verbose": "product not found"});
        assert!(product_from_response(&not_found).is_none());
        assert!(product_from_response(&json!({"status": 1})).is_none());
    }

    #[test]
    fn test_decode_sparse_product() {
        let record = product_from_response(&json!({"status": 1, "product": {}})).unwrap();
        assert_eq!(record.product_name, "");
        assert!(record.nutrients.is_empty());
        assert!(!record.has_data());
    }
}
