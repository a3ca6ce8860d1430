//! Shipment assessment use case
//!
//! Runs the carrier checks over a shipment and gathers the per-package
//! figures a rating request needs:
//! 1. Validate heights, total weight and tariff requirements
//! 2. Check and map requested accessorials
//! 3. Compute cubic feet, density, class and billable weight per package
//! 4. Evaluate overlength fees against the tariff

use freight_domain::model::{
    CarrierCapability, DimensionalWeightMode, FreightClass, Packaging, Shipment, Tariff,
    WeightScope,
};
use freight_domain::service::{
    assess_overlength, map_accessorials, validate_packages, OverlengthAssessment,
};
use freight_types::{MassUnit, Result};
use serde::Serialize;
use tracing::info;

/// Figures for one package line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageAssessment {
    pub packaging: Packaging,
    pub quantity: u32,
    pub total_pounds: f64,
    pub cubic_ft: Option<f64>,
    pub density: Option<f64>,
    pub calculated_freight_class: Option<FreightClass>,
    pub freight_class: Option<FreightClass>,
    pub billable_pounds: f64,
    pub hazmat: bool,
    /// `None` when no tariff was supplied
    pub overlength: Option<OverlengthAssessment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Handling {
    Loose,
    Palletized,
    Mixed,
}

impl Handling {
    fn of(shipment: &Shipment) -> Self {
        if shipment.is_palletized() {
            Handling::Palletized
        } else if shipment.is_loose_and_palletized() {
            Handling::Mixed
        } else {
            Handling::Loose
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Handling::Loose => "loose",
            Handling::Palletized => "palletized",
            Handling::Mixed => "mixed",
        }
    }
}

/// Result of assessing a shipment against one carrier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentAssessment {
    pub carrier: String,
    pub dim_weight_mode: DimensionalWeightMode,
    pub packages: Vec<PackageAssessment>,
    /// Carrier codes for the requested accessorials
    pub accessorial_codes: Vec<String>,
    pub total_pieces: u64,
    pub total_pounds: f64,
    pub billable_pounds: f64,
    pub handling: Handling,
    pub hazmat: bool,
    /// Sum of package fees, capped at `u64::MAX`
    pub overlength_fee_cents: u64,
    /// Carrier rates already carry overlength fees, so none were added
    pub overlength_fees_included_in_rates: bool,
}

impl ShipmentAssessment {
    /// Packages over the overlength threshold that no tariff rule priced
    pub fn unmatched_overlength_count(&self) -> usize {
        self.packages
            .iter()
            .filter(|p| matches!(p.overlength, Some(OverlengthAssessment::NoRuleMatched { .. })))
            .count()
    }
}

/// Assess a shipment for a carrier, rejecting it when the carrier cannot
/// service the packages or the requested accessorials
pub fn assess_shipment(
    carrier: &CarrierCapability,
    tariff: Option<&Tariff>,
    shipment: &Shipment,
    mode: DimensionalWeightMode,
) -> Result<ShipmentAssessment> {
    validate_packages(carrier, &shipment.packages, tariff)?;
    let accessorial_codes = map_accessorials(carrier, &shipment.accessorials)?;

    let packages: Vec<PackageAssessment> = shipment
        .packages
        .iter()
        .map(|package| PackageAssessment {
            packaging: package.packaging(),
            quantity: package.quantity(),
            total_pounds: package.pounds(WeightScope::Total),
            cubic_ft: package.cubic_ft(WeightScope::Total),
            density: package.density(),
            calculated_freight_class: package.calculated_freight_class(),
            freight_class: package.freight_class(),
            billable_pounds: package
                .billable_weight(WeightScope::Total, mode)
                .in_unit(MassUnit::Pounds),
            hazmat: package.is_hazmat(),
            overlength: tariff.map(|t| assess_overlength(carrier, t, package)),
        })
        .collect();

    let overlength_fee_cents = if carrier.rates_include_overlength_fees {
        0
    } else {
        packages
            .iter()
            .filter_map(|p| p.overlength.as_ref())
            .map(OverlengthAssessment::fee_cents)
            .fold(0, u64::saturating_add)
    };

    let assessment = ShipmentAssessment {
        carrier: carrier.name.clone(),
        dim_weight_mode: mode,
        total_pieces: shipment.total_pieces(),
        total_pounds: shipment.total_pounds(),
        billable_pounds: packages.iter().map(|p| p.billable_pounds).sum(),
        handling: Handling::of(shipment),
        hazmat: shipment.is_hazmat(),
        packages,
        accessorial_codes,
        overlength_fee_cents,
        overlength_fees_included_in_rates: carrier.rates_include_overlength_fees,
    };

    info!(
        carrier = assessment.carrier.as_str(),
        packages = assessment.packages.len(),
        total_pounds = assessment.total_pounds,
        overlength_fee_cents = assessment.overlength_fee_cents,
        unmatched_overlength = assessment.unmatched_overlength_count(),
        "shipment assessed"
    );

    Ok(assessment)
}

pub fn generate_assessment_report(assessment: &ShipmentAssessment) -> String {
    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("              Freight Assessment Report            \n");
    report.push_str("==================================================\n\n");
    report.push_str("[Summary]\n");
    report.push_str(&format!("  Carrier:          {}\n", assessment.carrier));
    report.push_str(&format!("  Pieces:           {}\n", assessment.total_pieces));
    report.push_str(&format!("  Total weight:     {:.1} lbs\n", assessment.total_pounds));
    report.push_str(&format!(
        "  Billable weight:  {:.1} lbs ({})\n",
        assessment.billable_pounds, assessment.dim_weight_mode
    ));
    report.push_str(&format!(
        "  Handling:         {}\n",
        assessment.handling.as_str()
    ));
    report.push_str(&format!(
        "  Hazmat:           {}\n",
        if assessment.hazmat { "yes" } else { "no" }
    ));
    if !assessment.accessorial_codes.is_empty() {
        report.push_str(&format!(
            "  Accessorials:     {}\n",
            assessment.accessorial_codes.join(", ")
        ));
    }
    report.push('\n');

    report.push_str("[Packages]\n");
    report.push_str("-".repeat(70).as_str());
    report.push('\n');
    report.push_str(&format!(
        "{:<4} {:<10} {:>4} {:>10} {:>9} {:>8} {:>6} {:>12}\n",
        "#", "Packaging", "Qty", "Weight", "Cu.Ft", "Density", "Class", "Overlength"
    ));
    report.push_str("-".repeat(70).as_str());
    report.push('\n');
    for (i, package) in assessment.packages.iter().enumerate() {
        report.push_str(&format!(
            "{:<4} {:<10} {:>4} {:>9.1}# {:>9} {:>8} {:>6} {:>12}\n",
            i + 1,
            package.packaging.as_str(),
            package.quantity,
            package.total_pounds,
            format_optional(package.cubic_ft),
            format_optional(package.density),
            package
                .freight_class
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            format_overlength(package.overlength.as_ref()),
        ));
    }
    report.push('\n');

    report.push_str("[Overlength]\n");
    if assessment.overlength_fees_included_in_rates {
        report.push_str("  Included in carrier rates\n");
    } else {
        report.push_str(&format!(
            "  Fees:             {}\n",
            format_cents(assessment.overlength_fee_cents)
        ));
    }
    let unmatched = assessment.unmatched_overlength_count();
    if unmatched > 0 {
        report.push_str(&format!(
            "  WARNING: {} package(s) over the threshold matched no tariff rule\n",
            unmatched
        ));
    }
    report.push('\n');

    report.push_str("==================================================\n");
    report
}

fn format_optional(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn format_overlength(overlength: Option<&OverlengthAssessment>) -> String {
    match overlength {
        None => "-".to_string(),
        Some(OverlengthAssessment::BelowThreshold) => "none".to_string(),
        Some(OverlengthAssessment::Matched { fee_cents, .. }) => format_cents(*fee_cents),
        Some(OverlengthAssessment::NoRuleMatched { .. }) => "unmatched".to_string(),
    }
}

fn format_cents(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(12_345), "$123.45");
        assert_eq!(format_cents(5), "$0.05");
    }

    #[test]
    fn test_format_overlength() {
        assert_eq!(format_overlength(None), "-");
        assert_eq!(
            format_overlength(Some(&OverlengthAssessment::NoRuleMatched {
                max_dimension_in: 60.0
            })),
            "unmatched"
        );
        assert_eq!(
            format_overlength(Some(&OverlengthAssessment::Matched {
                rule_index: 0,
                fee_cents: 2_500
            })),
            "$25.00"
        );
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(9.376)), "9.38");
        assert_eq!(format_optional(None), "-");
    }
}
