//! # Configuration Module
//!
//! Runtime settings read from the environment (after `.env` is loaded by the
//! binary). Every setting has a default so the tool runs from a fresh checkout.

use crate::product_lookup::DEFAULT_API_BASE_URL;
use log::warn;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ADDITIVE_REFERENCE_PATH: &str = "references/fssai_regulations.json";
pub const DEFAULT_NUTRIENT_RULES_PATH: &str = "references/nutrient_limits.json";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Regulatory additive reference (JSON)
    pub additive_reference_path: PathBuf,
    /// Nutrient threshold rules (JSON)
    pub nutrient_rules_path: PathBuf,
    pub product_api_base_url: String,
    pub lookup_timeout: Duration,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            additive_reference_path: PathBuf::from(DEFAULT_ADDITIVE_REFERENCE_PATH),
            nutrient_rules_path: PathBuf::from(DEFAULT_NUTRIENT_RULES_PATH),
            product_api_base_url: DEFAULT_API_BASE_URL.to_string(),
            lookup_timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup; unset keys keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let lookup_timeout = match value("LOOKUP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    warn!("Invalid LOOKUP_TIMEOUT_SECS '{}', using default", raw);
                    defaults.lookup_timeout
                }
            },
            None => defaults.lookup_timeout,
        };

        let log_format = match value("LOG_FORMAT").map(|f| f.trim().to_lowercase()) {
            Some(format) if format == "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            additive_reference_path: value("ADDITIVE_REFERENCE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.additive_reference_path),
            nutrient_rules_path: value("NUTRIENT_RULES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.nutrient_rules_path),
            product_api_base_url: value("PRODUCT_API_BASE_URL")
                .unwrap_or(defaults.product_api_base_url),
            lookup_timeout,
            log_level: value("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format,
        }
    }
}
