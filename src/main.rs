use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser};
use food_score::config::{AppConfig, LogFormat};
use food_score::label_text::{clean_ocr_text, extract_ingredients_section};
use food_score::product_lookup::ProductLookup;
use food_score::report::{format_outcome, format_unscored};
use food_score::scoring_model::{InputSource, NutrientValue, ProductRecord};
use food_score::ScoringEngine;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Estimate a packaged-food health score from a barcode, label text or manual input
#[derive(Parser, Debug)]
#[command(name = "food-score", version)]
struct Cli {
    #[command(flatten)]
    input: InputArgs,

    /// Nutrient value, repeatable (e.g. --nutrient sugars_100g=12.5)
    #[arg(long = "nutrient", value_name = "KEY=VALUE", value_parser = parse_nutrient)]
    nutrients: Vec<(String, NutrientValue)>,

    /// Additive reference file, overrides ADDITIVE_REFERENCE_PATH
    #[arg(long, value_name = "PATH")]
    additives: Option<PathBuf>,

    /// Nutrient rules file, overrides NUTRIENT_RULES_PATH
    #[arg(long, value_name = "PATH")]
    rules: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct InputArgs {
    /// Look the product up by barcode
    #[arg(long)]
    barcode: Option<String>,

    /// Ingredients statement typed by hand
    #[arg(long)]
    ingredients: Option<String>,

    /// Text file holding OCR output from a product label
    #[arg(long, value_name = "PATH")]
    label_file: Option<PathBuf>,
}

fn parse_nutrient(raw: &str) -> Result<(String, NutrientValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing nutrient name in '{raw}'"));
    }
    let value = match value.trim().parse::<f64>() {
        Ok(number) => NutrientValue::Number(number),
        Err(_) => NutrientValue::Text(value.trim().to_string()),
    };
    Ok((key.to_string(), value))
}

fn init_tracing(config: &AppConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("Invalid log level '{}'", config.log_level))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.compact().try_init(),
    }
    .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

async fn load_product(input: &InputArgs, config: &AppConfig) -> Result<Option<ProductRecord>> {
    if let Some(barcode) = &input.barcode {
        let lookup = ProductLookup::new(&config.product_api_base_url, config.lookup_timeout)?;
        return lookup
            .lookup_barcode(barcode)
            .await
            .with_context(|| format!("Lookup failed for barcode {barcode}"));
    }

    if let Some(path) = &input.label_file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read label text from {}", path.display()))?;
        let text = clean_ocr_text(&raw);
        let ingredients = extract_ingredients_section(&text).unwrap_or_else(|| {
            warn!("No ingredients header in label text, scoring the full text");
            text.replace('\n', " ")
        });

        let mut product = ProductRecord::new(InputSource::LabelText);
        product.ingredients_text = ingredients;
        return Ok(Some(product));
    }

    let mut product = ProductRecord::new(InputSource::Manual);
    product.ingredients_text = input.ingredients.clone().unwrap_or_default();
    Ok(Some(product))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    init_tracing(&config)?;

    info!("Starting food-score");

    let additive_path = cli.additives.as_ref().unwrap_or(&config.additive_reference_path);
    let rules_path = cli.rules.as_ref().unwrap_or(&config.nutrient_rules_path);
    let engine = ScoringEngine::from_files(additive_path, rules_path)
        .context("Failed to load reference data")?;
    info!(
        additives = engine.index().len(),
        rules = engine.rules().len(),
        "Reference data loaded"
    );

    let Some(mut product) = load_product(&cli.input, &config).await? else {
        println!("❌ Product not found");
        return Ok(ExitCode::FAILURE);
    };
    product.nutrients.extend(cli.nutrients);

    if !product.has_data() {
        println!("Nothing to score: no ingredients or nutrients were supplied");
        return Ok(ExitCode::FAILURE);
    }

    match engine.evaluate_product(&product.nutrients, &product.ingredients_text) {
        Ok(outcome) => {
            if cli.json {
                let body = serde_json::json!({ "product": product, "outcome": outcome });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print!("{}", format_outcome(&product, &outcome));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("Evaluation failed: {e}");
            print!("{}", format_unscored(&product, &e.to_string()));
            Ok(ExitCode::FAILURE)
        }
    }
}
