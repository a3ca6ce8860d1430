//! CLI definition using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use freight_domain::model::DimensionalWeightMode;
use freight_types::{OutputFormat, UnitSystem};

#[derive(Parser)]
#[command(name = "freight-checker")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Freight classification, carrier serviceability and overlength fee checks")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Carrier profile TOML. Uses config value if not specified.
    #[arg(long, global = true)]
    pub carriers: Option<PathBuf>,

    /// Verbose output (debug logging to stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assess a shipment document (JSON) against its carrier
    Assess {
        /// Path to shipment JSON
        shipment: PathBuf,

        /// Override the document's carrier
        #[arg(long)]
        carrier: Option<String>,

        /// Override the document's tariff
        #[arg(long)]
        tariff: Option<String>,

        /// Dimensional weight formula (volumetric, divisor139)
        #[arg(long)]
        dim_mode: Option<DimensionalWeightMode>,
    },

    /// Classify packages from a CSV manifest, optionally assessing them
    Manifest {
        /// Path to manifest CSV
        csv: PathBuf,

        /// Assess the packages against this carrier
        #[arg(long)]
        carrier: Option<String>,

        /// Tariff for overlength fees
        #[arg(long)]
        tariff: Option<String>,

        /// Requested accessorial (repeatable)
        #[arg(long = "accessorial", short = 'a')]
        accessorials: Vec<String>,

        /// Unit system for bare numbers. Uses config value if not specified.
        #[arg(long)]
        units: Option<UnitSystem>,

        /// Dimensional weight formula (volumetric, divisor139)
        #[arg(long)]
        dim_mode: Option<DimensionalWeightMode>,
    },

    /// Look up the freight class for a density in lb/ft³
    Classify {
        /// Density in pounds per cubic foot
        density: f64,
    },

    /// List carrier profiles and tariffs
    Carriers,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default unit system (metric, imperial)
        #[arg(long)]
        set_units: Option<UnitSystem>,

        /// Set dimensional weight formula (volumetric, divisor139)
        #[arg(long)]
        set_dim_mode: Option<DimensionalWeightMode>,

        /// Set default output format (json, table)
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set carrier profile TOML path
        #[arg(long)]
        set_carriers: Option<PathBuf>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
