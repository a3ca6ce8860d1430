//! Overlength fee evaluation

use freight_types::LengthUnit;
use serde::Serialize;
use tracing::{debug, warn};

use crate::model::{CarrierCapability, Package, Tariff};

/// Outcome of matching a package against a tariff's overlength rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OverlengthAssessment {
    /// Longest side is under the carrier's overlength threshold
    BelowThreshold,
    /// A rule matched; `fee_cents` already multiplied by quantity, capped
    /// at `u64::MAX`
    Matched { rule_index: usize, fee_cents: u64 },
    /// Over the threshold but no rule covers the length. The fee is zero
    /// only because nothing is configured.
    NoRuleMatched { max_dimension_in: f64 },
}

impl OverlengthAssessment {
    pub fn fee_cents(&self) -> u64 {
        match self {
            OverlengthAssessment::Matched { fee_cents, .. } => *fee_cents,
            _ => 0,
        }
    }
}

/// Longer of length and width, in inches
pub fn max_horizontal_dimension_in(package: &Package) -> f64 {
    package
        .length(LengthUnit::Inches)
        .max(package.width(LengthUnit::Inches))
}

pub fn assess_overlength(
    carrier: &CarrierCapability,
    tariff: &Tariff,
    package: &Package,
) -> OverlengthAssessment {
    let max_dimension_in = max_horizontal_dimension_in(package);
    let threshold_in = carrier
        .minimum_length_for_overlength_fees
        .in_unit(LengthUnit::Inches);

    if max_dimension_in < threshold_in {
        return OverlengthAssessment::BelowThreshold;
    }

    match tariff
        .overlength_rules()
        .iter()
        .position(|rule| rule.matches(max_dimension_in))
    {
        Some(rule_index) => {
            let fee_cents = u64::from(package.quantity())
                .saturating_mul(tariff.overlength_rules()[rule_index].fee_cents);
            debug!(
                carrier = carrier.name.as_str(),
                max_dimension_in, rule_index, fee_cents, "overlength rule matched"
            );
            OverlengthAssessment::Matched {
                rule_index,
                fee_cents,
            }
        }
        None => {
            warn!(
                carrier = carrier.name.as_str(),
                max_dimension_in,
                threshold_in,
                rules = tariff.overlength_rules().len(),
                "package exceeds overlength threshold but no tariff rule matched; fee is zero"
            );
            OverlengthAssessment::NoRuleMatched { max_dimension_in }
        }
    }
}

/// Overlength fee in cents for `package`, zero when none applies or none is
/// configured. Use [`assess_overlength`] to tell those apart.
pub fn overlength_fee(carrier: &CarrierCapability, tariff: &Tariff, package: &Package) -> u64 {
    assess_overlength(carrier, tariff, package).fee_cents()
}
