//! Command handlers

use std::path::{Path, PathBuf};

use freight_app::config::Config;
use freight_app::{assess_shipment, ShipmentInput};
use freight_domain::model::{DimensionalWeightMode, PackageDefaults, Shipment};
use freight_domain::service::classify;
use freight_infra::{load_packages_from_csv, CarrierProfileLoader};
use freight_types::{Error, OutputFormat, Result, UnitSystem};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::output::{output_assessment, output_carriers, output_classification, output_packages};

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);
    let carriers_override = cli.carriers.as_deref();

    match cli.command {
        Commands::Assess {
            shipment,
            carrier,
            tariff,
            dim_mode,
        } => cmd_assess(
            &config,
            carriers_override,
            &shipment,
            carrier,
            tariff,
            dim_mode.unwrap_or(config.dim_weight_mode),
            output_format,
        ),
        Commands::Manifest {
            csv,
            carrier,
            tariff,
            accessorials,
            units,
            dim_mode,
        } => cmd_manifest(
            &config,
            carriers_override,
            &csv,
            carrier,
            tariff,
            accessorials,
            units,
            dim_mode.unwrap_or(config.dim_weight_mode),
            output_format,
        ),
        Commands::Classify { density } => cmd_classify(density, output_format),
        Commands::Carriers => cmd_carriers(&config, carriers_override, output_format),
        Commands::Config {
            show,
            set_units,
            set_dim_mode,
            set_output,
            set_carriers,
            reset,
        } => cmd_config(show, set_units, set_dim_mode, set_output, set_carriers, reset),
    }
}

fn load_profiles(config: &Config, carriers_override: Option<&Path>) -> Result<CarrierProfileLoader> {
    let path = config.carriers_path(carriers_override)?;
    if !path.exists() {
        return Err(Error::Config(freight_types::ConfigError::ParseError(format!(
            "Carrier profile file not found: {}. Set one with: freight-checker config --set-carriers <path>",
            path.display()
        ))));
    }
    debug!(path = %path.display(), "loading carrier profiles");
    CarrierProfileLoader::load_from_file(&path)
}

fn cmd_assess(
    config: &Config,
    carriers_override: Option<&Path>,
    shipment_path: &Path,
    carrier: Option<String>,
    tariff: Option<String>,
    mode: DimensionalWeightMode,
    output_format: OutputFormat,
) -> Result<()> {
    let mut input = ShipmentInput::load_from_file(shipment_path)?;
    if let Some(carrier) = carrier {
        input.carrier = carrier;
    }
    if tariff.is_some() {
        input.tariff = tariff;
    }

    let profiles = load_profiles(config, carriers_override)?;
    let capability = profiles.require_carrier(&input.carrier)?;
    let tariff = input
        .tariff
        .as_deref()
        .map(|name| profiles.require_tariff(name))
        .transpose()?;

    let shipment = input.into_shipment(&config.package_defaults())?;
    let assessment = assess_shipment(capability, tariff, &shipment, mode)?;
    output_assessment(output_format, &assessment)
}

#[allow(clippy::too_many_arguments)]
fn cmd_manifest(
    config: &Config,
    carriers_override: Option<&Path>,
    csv_path: &Path,
    carrier: Option<String>,
    tariff: Option<String>,
    accessorials: Vec<String>,
    units: Option<UnitSystem>,
    mode: DimensionalWeightMode,
    output_format: OutputFormat,
) -> Result<()> {
    let defaults = match units {
        Some(units) => PackageDefaults { units },
        None => config.package_defaults(),
    };
    let packages = load_packages_from_csv(csv_path, &defaults)?;

    let Some(carrier) = carrier else {
        return output_packages(output_format, &packages, mode);
    };

    let profiles = load_profiles(config, carriers_override)?;
    let capability = profiles.require_carrier(&carrier)?;
    let tariff = tariff
        .as_deref()
        .map(|name| profiles.require_tariff(name))
        .transpose()?;

    let shipment = Shipment::new(packages, accessorials);
    let assessment = assess_shipment(capability, tariff, &shipment, mode)?;
    output_assessment(output_format, &assessment)
}

fn cmd_classify(density: f64, output_format: OutputFormat) -> Result<()> {
    if !density.is_finite() || density < 0.0 {
        return Err(Error::InvalidPackage(format!(
            "density must be a non-negative number, got {}",
            density
        )));
    }
    output_classification(output_format, density, classify(Some(density)))
}

fn cmd_carriers(
    config: &Config,
    carriers_override: Option<&Path>,
    output_format: OutputFormat,
) -> Result<()> {
    let profiles = load_profiles(config, carriers_override)?;
    output_carriers(output_format, &profiles.all_carriers(), &profiles.tariff_names())
}

fn cmd_config(
    show: bool,
    set_units: Option<UnitSystem>,
    set_dim_mode: Option<DimensionalWeightMode>,
    set_output: Option<OutputFormat>,
    set_carriers: Option<PathBuf>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(units) = set_units {
        config.default_units = units;
        modified = true;
    }

    if let Some(mode) = set_dim_mode {
        config.dim_weight_mode = mode;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(path) = set_carriers {
        config.carriers_file = Some(path);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
