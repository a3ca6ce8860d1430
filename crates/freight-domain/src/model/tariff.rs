//! Customer tariffs

use freight_types::{Error, Length, LengthUnit, Result};
use serde::{Deserialize, Serialize};

/// One overlength fee band. `max_length` of `None` means open ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlengthRule {
    pub min_length: Length,
    #[serde(default)]
    pub max_length: Option<Length>,
    pub fee_cents: u64,
}

impl OverlengthRule {
    /// Whether a length in inches falls inside this band (both ends inclusive)
    pub fn matches(&self, length_in: f64) -> bool {
        if length_in < self.min_length.in_unit(LengthUnit::Inches) {
            return false;
        }
        match self.max_length {
            Some(max) => length_in <= max.in_unit(LengthUnit::Inches),
            None => true,
        }
    }
}

/// Overlength fee schedule, evaluated in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TariffDef")]
pub struct Tariff {
    overlength_rules: Vec<OverlengthRule>,
}

#[derive(Deserialize)]
struct TariffDef {
    #[serde(default)]
    overlength_rules: Vec<OverlengthRule>,
}

impl TryFrom<TariffDef> for Tariff {
    type Error = Error;

    fn try_from(def: TariffDef) -> Result<Self> {
        Tariff::new(def.overlength_rules)
    }
}

impl Tariff {
    pub fn new(overlength_rules: Vec<OverlengthRule>) -> Result<Self> {
        for (index, rule) in overlength_rules.iter().enumerate() {
            validate_length("min_length", index, &rule.min_length)?;
            if let Some(max) = rule.max_length {
                validate_length("max_length", index, &max)?;
                if rule.min_length.exceeds(&max) {
                    return Err(Error::InvalidTariff(format!(
                        "overlength rule {}: max_length {} is below min_length {}",
                        index, max, rule.min_length
                    )));
                }
            }
        }
        Ok(Self { overlength_rules })
    }

    pub fn overlength_rules(&self) -> &[OverlengthRule] {
        &self.overlength_rules
    }

    pub fn is_empty(&self) -> bool {
        self.overlength_rules.is_empty()
    }

    /// Whether any rule could match a package of this length
    pub fn covers(&self, length_in: f64) -> bool {
        self.overlength_rules.iter().any(|r| r.matches(length_in))
    }
}

fn validate_length(field: &str, index: usize, length: &Length) -> Result<()> {
    if !length.value.is_finite() || length.value < 0.0 {
        return Err(Error::InvalidTariff(format!(
            "overlength rule {}: {} must be a non-negative length, got {}",
            index, field, length.value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(min: f64, max: Option<f64>, fee_cents: u64) -> OverlengthRule {
        OverlengthRule {
            min_length: Length::inches(min),
            max_length: max.map(Length::inches),
            fee_cents,
        }
    }

    #[test]
    fn test_rule_bounds_inclusive() {
        let r = rule(96.0, Some(143.0), 5000);
        assert!(!r.matches(95.99));
        assert!(r.matches(96.0));
        assert!(r.matches(143.0));
        assert!(!r.matches(143.01));
    }

    #[test]
    fn test_open_ended_rule() {
        let r = rule(144.0, None, 9000);
        assert!(r.matches(10_000.0));
    }

    #[test]
    fn test_rule_in_centimeters() {
        let r = OverlengthRule {
            min_length: Length::centimeters(254.0),
            max_length: None,
            fee_cents: 100,
        };
        assert!(r.matches(100.0));
        assert!(!r.matches(99.9));
    }

    #[test]
    fn test_rejects_negative_length() {
        let err = Tariff::new(vec![rule(-1.0, None, 100)]).unwrap_err();
        assert!(matches!(err, Error::InvalidTariff(_)));
    }

    #[test]
    fn test_rejects_inverted_band() {
        let err = Tariff::new(vec![rule(100.0, Some(50.0), 100)]).unwrap_err();
        assert!(err.to_string().contains("max_length"));
    }

    #[test]
    fn test_keeps_declaration_order() {
        let tariff = Tariff::new(vec![rule(144.0, None, 9000), rule(96.0, Some(143.0), 5000)])
            .unwrap();
        assert_eq!(tariff.overlength_rules()[0].fee_cents, 9000);
    }

    #[test]
    fn test_covers() {
        let tariff = Tariff::new(vec![rule(96.0, Some(143.0), 5000)]).unwrap();
        assert!(tariff.covers(100.0));
        assert!(!tariff.covers(150.0));
        assert!(!Tariff::default().covers(100.0));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Tariff = serde_json::from_str(
            r#"{"overlength_rules": [{"min_length": {"value": 96, "unit": "in"}, "fee_cents": 5000}]}"#,
        )
        .unwrap();
        assert_eq!(ok.overlength_rules().len(), 1);

        let negative_fee = serde_json::from_str::<Tariff>(
            r#"{"overlength_rules": [{"min_length": {"value": 96, "unit": "in"}, "fee_cents": -5}]}"#,
        );
        assert!(negative_fee.is_err());

        let missing_min = serde_json::from_str::<Tariff>(
            r#"{"overlength_rules": [{"fee_cents": 5}]}"#,
        );
        assert!(missing_min.is_err());
    }
}
