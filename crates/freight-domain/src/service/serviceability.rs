//! Carrier serviceability checks
//!
//! Every limit is checked and all violations are reported together, so a
//! caller sees the full list of reasons a carrier rejected a shipment.

use freight_types::{Error, LengthUnit, MassUnit, Result};
use tracing::debug;

use crate::model::{CarrierCapability, Package, Tariff, WeightScope};
use crate::service::overlength::max_horizontal_dimension_in;

/// Check packages against a carrier's height, weight and tariff requirements
pub fn validate_packages(
    carrier: &CarrierCapability,
    packages: &[Package],
    tariff: Option<&Tariff>,
) -> Result<()> {
    if packages.is_empty() {
        return Err(Error::Unserviceable(
            "At least one package is required".to_string(),
        ));
    }

    let violations = collect_violations(carrier, packages, tariff);
    if violations.is_empty() {
        debug!(
            carrier = carrier.name.as_str(),
            packages = packages.len(),
            "packages serviceable"
        );
        return Ok(());
    }

    debug!(
        carrier = carrier.name.as_str(),
        violations = violations.len(),
        "packages unserviceable"
    );
    Err(Error::Unserviceable(capitalize(&violations.join(", "))))
}

/// Violation messages in check order; empty when the carrier accepts
pub fn collect_violations(
    carrier: &CarrierCapability,
    packages: &[Package],
    tariff: Option<&Tariff>,
) -> Vec<String> {
    let mut violations = Vec::new();

    let max_height_in = carrier.maximum_height.in_unit(LengthUnit::Inches);
    let tallest_in = packages
        .iter()
        .map(|p| p.height(LengthUnit::Inches))
        .fold(0.0, f64::max);
    if tallest_in > max_height_in {
        violations.push(format!(
            "items must be {:.1} inches tall or less",
            max_height_in
        ));
    }

    let max_weight_lb = carrier.maximum_weight.in_unit(MassUnit::Pounds);
    let total_lb: f64 = packages.iter().map(|p| p.pounds(WeightScope::Total)).sum();
    if total_lb > max_weight_lb {
        violations.push(format!("items must weigh {:.1} lbs or less", max_weight_lb));
    }

    let has_usable_tariff = tariff.is_some_and(|t| !t.is_empty());
    if carrier.overlength_fees_require_tariff && !has_usable_tariff {
        if packages.iter().any(|p| p.has_missing_dimensions()) {
            violations.push("item dimensions are required".to_string());
        } else {
            let threshold_in = carrier
                .minimum_length_for_overlength_fees
                .in_unit(LengthUnit::Inches);
            let longest_in = packages
                .iter()
                .map(max_horizontal_dimension_in)
                .fold(0.0, f64::max);
            if longest_in >= threshold_in {
                violations.push("tariff must be defined to calculate overlength fees".to_string());
            }
        }
    }

    violations
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
