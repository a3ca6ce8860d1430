//! Configuration management for freight-checker
//!
//! Config stored at: ~/.config/freight-checker/config.json

use std::path::{Path, PathBuf};

use freight_domain::model::{DimensionalWeightMode, PackageDefaults};
use freight_types::{ConfigError, OutputFormat, Result, UnitSystem};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "freight-checker";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Unit system for bare numbers in package input (metric, imperial)
    #[serde(default)]
    pub default_units: UnitSystem,

    /// Dimensional weight formula used for billable weight
    #[serde(default)]
    pub dim_weight_mode: DimensionalWeightMode,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Carrier profile TOML override
    #[serde(default)]
    pub carriers_file: Option<PathBuf>,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Carrier profile file: explicit override, then config, then the
    /// default location beside config.json
    pub fn carriers_path(&self, override_path: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = override_path {
            return Ok(path.to_path_buf());
        }
        if let Some(ref path) = self.carriers_file {
            return Ok(path.clone());
        }
        Ok(Self::config_dir()?.join("carriers.toml"))
    }

    /// Defaults handed to every package built from loose input
    pub fn package_defaults(&self) -> PackageDefaults {
        PackageDefaults {
            units: self.default_units,
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Freight Checker Configuration")?;
        writeln!(f, "=============================")?;
        writeln!(f)?;
        writeln!(f, "Default units:    {}", self.default_units)?;
        writeln!(f, "Dim weight mode:  {}", self.dim_weight_mode)?;
        writeln!(f, "Output format:    {}", self.output_format)?;
        writeln!(
            f,
            "Carriers file:    {}",
            self.carriers_path(None)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:      {}", path.display())?;
        }

        Ok(())
    }
}
