#[cfg(test)]
mod tests {
    use food_score::ingredient_parser::parse_ingredients;
    use food_score::label_text::{clean_ocr_text, extract_ingredients_section};
    use food_score::scoring_model::IngredientToken;
    use food_score::text_normalizer::{canonical_code, extract_additive_codes, normalize_ingredient};

    #[test]
    fn test_normalization_round_trip() {
        let raw = "Acidity Regulator (E330) 2%";
        let normalized = normalize_ingredient(raw);

        assert!(normalized.contains("acidity regulators"));
        assert!(!normalized.contains('%'));
        assert!(!normalized.contains('('));
        assert!(!normalized.contains("e330"));

        assert_eq!(extract_additive_codes(raw), vec!["E330"]);
    }

    #[test]
    fn test_normalization_is_stable() {
        let inputs = [
            "Emulsifier (Soy Lecithin)",
            "Wheat Flour 62%",
            "E-471",
            "Flavour Enhancer: Monosodium Glutamate",
        ];
        for input in inputs {
            let once = normalize_ingredient(input);
            assert_eq!(normalize_ingredient(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_parse_relative_order() {
        let tokens = parse_ingredients("Sugar, Colour (E150), Salt");
        let position = |wanted: &IngredientToken| tokens.iter().position(|t| t == wanted).unwrap();

        let sugar = position(&IngredientToken::Name("sugar".to_string()));
        let colour = position(&IngredientToken::Name("colour".to_string()));
        let code = position(&IngredientToken::Code("E150".to_string()));
        let salt = position(&IngredientToken::Name("salt".to_string()));

        assert!(sugar < colour);
        assert!(colour < code);
        assert!(code < salt);
    }

    #[test]
    fn test_parse_fragments_nested_qualifiers() {
        let tokens: Vec<String> = parse_ingredients("Chocolate (Cocoa Mass, Sugar (Cane)), Milk")
            .into_iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(tokens, vec!["chocolate", "cocoa mass", "sugar", "cane", "milk"]);
    }

    #[test]
    fn test_parse_open_food_facts_style_text() {
        let text = "Wheat flour, palm oil, sugar, raising agents (e-503, e500), salt, emulsifier: e322";
        let codes: Vec<String> = parse_ingredients(text)
            .into_iter()
            .filter(|t| t.is_code())
            .map(|t| t.to_string())
            .collect();
        assert_eq!(codes, vec!["E503", "E500", "E322"]);
    }

    #[test]
    fn test_canonical_code_forms() {
        assert_eq!(canonical_code("e-150d").as_deref(), Some("E150d"));
        assert_eq!(canonical_code("E 150"), None);
    }

    #[test]
    fn test_label_text_to_tokens() {
        let ocr = "  NUTTY CRUNCH BAR  \n\nINGREDIENTS: Peanuts (40%), Glucose Syrup,\n  Sugar, Salt, Preservative (E202)\nNutrition Information\nEnergy 480 kcal\n";
        let cleaned = clean_ocr_text(ocr);
        let section = extract_ingredients_section(&cleaned).unwrap();
        assert_eq!(
            section,
            "Peanuts (40%), Glucose Syrup, Sugar, Salt, Preservative (E202)"
        );

        let tokens: Vec<String> = parse_ingredients(&section)
            .into_iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(
            tokens,
            vec!["peanuts", "glucose syrup", "sugar", "salt", "preservatives", "E202", "e202"]
        );
    }
}
