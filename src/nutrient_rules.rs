//! # Nutrient Rules
//!
//! Per-nutrient threshold rules and their evaluation against supplied values.
//! A value strictly above `max` costs the rule's penalty; a value strictly
//! below `min` earns the rule's bonus. Both checks are independent.

use crate::scoring_errors::Result;
use crate::scoring_model::{NutrientRule, Nutrients};
use log::debug;

/// Ordered table of nutrient rules, one per key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutrientRuleTable {
    rules: Vec<(String, NutrientRule)>,
}

impl NutrientRuleTable {
    /// Build a table; a repeated key replaces the earlier rule in place
    pub fn new(rules: impl IntoIterator<Item = (String, NutrientRule)>) -> Self {
        let mut table = Self::default();
        for (key, rule) in rules {
            match table.rules.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = rule,
                None => table.rules.push((key, rule)),
            }
        }
        table
    }

    pub fn get(&self, key: &str) -> Option<&NutrientRule> {
        self.rules
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NutrientRule)> {
        self.rules.iter().map(|(key, rule)| (key.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Pros, cons and score change produced by the nutrient rules
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NutrientFindings {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    /// Sum of bonuses minus penalties
    pub score_delta: f64,
}

/// Apply every rule whose key is present in `nutrients`, in table order
///
/// Fails with `InvalidNutrientValue` on the first non-numeric value a rule reads.
pub fn evaluate_nutrients(
    nutrients: &Nutrients,
    rules: &NutrientRuleTable,
) -> Result<NutrientFindings> {
    let mut findings = NutrientFindings::default();

    for (key, rule) in rules.iter() {
        let Some(raw) = nutrients.get(key) else {
            continue;
        };
        let value = raw.as_f64(key)?;

        if rule.max.is_some_and(|max| value > max) {
            findings.score_delta -= rule.penalty_points();
            findings
                .cons
                .push(format!("High {} ({}{})", key, value, rule.unit_label()));
            debug!("Nutrient '{}' = {} exceeds max {:?}", key, value, rule.max);
        }

        if rule.min.is_some_and(|min| value < min) {
            findings.score_delta += rule.bonus_points();
            findings
                .pros
                .push(format!("Low {} ({}{})", key, value, rule.unit_label()));
            debug!("Nutrient '{}' = {} below min {:?}", key, value, rule.min);
        }
    }

    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring_errors::ScoringError;
    use crate::scoring_model::NutrientValue;

    fn sugar_rules() -> NutrientRuleTable {
        NutrientRuleTable::new(vec![(
            "sugar".to_string(),
            NutrientRule {
                max: Some(5.0),
                penalty: Some(20.0),
                unit: Some("g".to_string()),
                ..Default::default()
            },
        )])
    }

    fn nutrients(pairs: &[(&str, NutrientValue)]) -> Nutrients {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_max_exceeded() {
        let input = nutrients(&[("sugar", NutrientValue::Number(8.0))]);
        let findings = evaluate_nutrients(&input, &sugar_rules()).unwrap();
        assert_eq!(findings.score_delta, -20.0);
        assert_eq!(findings.cons, vec!["High sugar (8g)".to_string()]);
        assert!(findings.pros.is_empty());
    }

    #[test]
    fn test_threshold_boundaries_are_strict() {
        let rules = NutrientRuleTable::new(vec![(
            "salt".to_string(),
            NutrientRule {
                max: Some(1.5),
                min: Some(0.3),
                ..Default::default()
            },
        )]);
        let input = nutrients(&[("salt", NutrientValue::Number(1.5))]);
        let at_max = evaluate_nutrients(&input, &rules).unwrap();
        assert_eq!(at_max, NutrientFindings::default());

        let input = nutrients(&[("salt", NutrientValue::Number(0.3))]);
        let at_min = evaluate_nutrients(&input, &rules).unwrap();
        assert_eq!(at_min, NutrientFindings::default());
    }

    #[test]
    fn test_default_penalty_and_bonus() {
        let rules = NutrientRuleTable::new(vec![
            (
                "fat".to_string(),
                NutrientRule {
                    max: Some(17.5),
                    ..Default::default()
                },
            ),
            (
                "sodium".to_string(),
                NutrientRule {
                    min: Some(0.1),
                    unit: Some("g".to_string()),
                    ..Default::default()
                },
            ),
        ]);
        let findings = evaluate_nutrients(
            &nutrients(&[("fat", NutrientValue::Number(20.0)), ("sodium", "0.05".into())]),
            &rules,
        )
        .unwrap();

        assert_eq!(findings.score_delta, -5.0);
        assert_eq!(findings.cons, vec!["High fat (20)".to_string()]);
        assert_eq!(findings.pros, vec!["Low sodium (0.05g)".to_string()]);
    }

    #[test]
    fn test_max_and_min_fire_independently() {
        // An inverted rule lets a single value trip both checks
        let rules = NutrientRuleTable::new(vec![(
            "sugar".to_string(),
            NutrientRule {
                max: Some(5.0),
                min: Some(10.0),
                penalty: Some(20.0),
                bonus: Some(5.0),
                ..Default::default()
            },
        )]);
        let input = nutrients(&[("sugar", NutrientValue::Number(8.0))]);
        let findings = evaluate_nutrients(&input, &rules).unwrap();
        assert_eq!(findings.cons.len(), 1);
        assert_eq!(findings.pros.len(), 1);
        assert_eq!(findings.score_delta, -15.0);
    }

    #[test]
    fn test_invalid_value_fails() {
        let err = evaluate_nutrients(&nutrients(&[("sugar", "high".into())]), &sugar_rules())
            .unwrap_err();
        assert!(matches!(err, ScoringError::InvalidNutrientValue { .. }));
    }

    #[test]
    fn test_nutrients_without_rules_are_ignored() {
        let findings = evaluate_nutrients(
            &nutrients(&[("protein", "not a number".into())]),
            &sugar_rules(),
        )
        .unwrap();
        assert_eq!(findings, NutrientFindings::default());
    }

    #[test]
    fn test_repeated_key_replaces_rule() {
        let table = NutrientRuleTable::new(vec![
            ("sugar".to_string(), NutrientRule::default()),
            ("salt".to_string(), NutrientRule::default()),
            (
                "sugar".to_string(),
                NutrientRule {
                    max: Some(1.0),
                    ..Default::default()
                },
            ),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("sugar").unwrap().max, Some(1.0));
        assert_eq!(table.iter().next().unwrap().0, "sugar");
    }
}
