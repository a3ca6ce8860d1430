//! Output formatting module

use freight_app::{generate_assessment_report, ShipmentAssessment};
use freight_domain::model::{
    CarrierCapability, DimensionalWeightMode, FreightClass, Package, WeightScope,
};
use freight_types::{LengthUnit, MassUnit, OutputFormat, Result};
use serde::Serialize;

/// Per-package figures printed by `manifest` without a carrier
#[derive(Debug, Serialize)]
struct PackageMetrics {
    packaging: String,
    quantity: u32,
    total_pounds: f64,
    dimensions_in: [f64; 3],
    cubic_ft: Option<f64>,
    density: Option<f64>,
    freight_class: Option<FreightClass>,
    billable_pounds: f64,
    hazmat: bool,
}

pub fn output_assessment(output_format: OutputFormat, assessment: &ShipmentAssessment) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(assessment)?;
        println!("{}", content);
    } else {
        print!("{}", generate_assessment_report(assessment));
    }
    Ok(())
}

pub fn output_packages(
    output_format: OutputFormat,
    packages: &[Package],
    mode: DimensionalWeightMode,
) -> Result<()> {
    let metrics: Vec<PackageMetrics> = packages
        .iter()
        .map(|p| PackageMetrics {
            packaging: p.packaging().to_string(),
            quantity: p.quantity(),
            total_pounds: p.pounds(WeightScope::Total),
            dimensions_in: p.inches(),
            cubic_ft: p.cubic_ft(WeightScope::Total),
            density: p.density(),
            freight_class: p.freight_class(),
            billable_pounds: p.billable_weight(WeightScope::Total, mode).in_unit(MassUnit::Pounds),
            hazmat: p.is_hazmat(),
        })
        .collect();

    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&metrics)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nPackages ({} lines)", metrics.len());
    println!("{}", "-".repeat(78));
    println!(
        "{:<4} {:<10} {:>4} {:>10} {:>20} {:>9} {:>8} {:>6}",
        "#", "Packaging", "Qty", "Weight", "H x W x L (in)", "Cu.Ft", "Density", "Class"
    );
    println!("{}", "-".repeat(78));
    for (i, m) in metrics.iter().enumerate() {
        let [h, w, l] = m.dimensions_in;
        println!(
            "{:<4} {:<10} {:>4} {:>9.1}# {:>20} {:>9} {:>8} {:>6}{}",
            i + 1,
            m.packaging,
            m.quantity,
            m.total_pounds,
            format!("{:.1} x {:.1} x {:.1}", h, w, l),
            format_optional(m.cubic_ft),
            format_optional(m.density),
            m.freight_class
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            if m.hazmat { "  HAZMAT" } else { "" }
        );
    }
    let total: f64 = metrics.iter().map(|m| m.total_pounds).sum();
    let billable: f64 = metrics.iter().map(|m| m.billable_pounds).sum();
    println!("{}", "-".repeat(78));
    println!("Total weight:     {:.1} lbs", total);
    println!("Billable weight:  {:.1} lbs ({})", billable, mode);

    Ok(())
}

pub fn output_classification(
    output_format: OutputFormat,
    density: f64,
    class: Option<FreightClass>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&serde_json::json!({
            "density": density,
            "freight_class": class,
        }))?;
        println!("{}", content);
    } else {
        match class {
            Some(class) => println!("Density {:.2} lb/ft³ -> class {}", density, class),
            None => println!("Density {} lb/ft³ -> no class", density),
        }
    }
    Ok(())
}

pub fn output_carriers(
    output_format: OutputFormat,
    carriers: &[&CarrierCapability],
    tariffs: &[&str],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&serde_json::json!({
            "carriers": carriers,
            "tariffs": tariffs,
        }))?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nCarriers ({})", carriers.len());
    println!("{}", "-".repeat(72));
    println!(
        "{:<16} {:>10} {:>12} {:>12} {:>8} {:>8}",
        "Name", "Max H(in)", "Max W(lbs)", "Overlen(in)", "Tariff", "Incl."
    );
    println!("{}", "-".repeat(72));
    for carrier in carriers {
        println!(
            "{:<16} {:>10.1} {:>12.1} {:>12.1} {:>8} {:>8}",
            carrier.name,
            carrier.maximum_height.in_unit(LengthUnit::Inches),
            carrier.maximum_weight.in_unit(MassUnit::Pounds),
            carrier
                .minimum_length_for_overlength_fees
                .in_unit(LengthUnit::Inches),
            if carrier.overlength_fees_require_tariff { "req" } else { "-" },
            if carrier.rates_include_overlength_fees { "yes" } else { "no" },
        );
    }
    println!();
    if tariffs.is_empty() {
        println!("No tariffs defined");
    } else {
        println!("Tariffs: {}", tariffs.join(", "));
    }
    Ok(())
}

fn format_optional(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}
