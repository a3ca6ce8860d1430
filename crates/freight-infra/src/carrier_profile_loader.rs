//! Carrier capability profiles and tariffs loaded from TOML
//!
//! ```toml
//! [[carriers]]
//! name = "ACME"
//! maximum_height = { value = 105, unit = "in" }
//!
//! [carriers.accessorials.mappable]
//! liftgate_delivery = "LGD"
//!
//! [[tariffs]]
//! name = "standard"
//!
//! [[tariffs.overlength_rules]]
//! min_length = { value = 96, unit = "in" }
//! fee_cents = 5000
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use freight_domain::model::{CarrierCapability, Tariff};
use freight_types::{ConfigError, Error, Result};
use serde::Deserialize;
use tracing::debug;

/// Container for parsing carriers.toml
#[derive(Debug, Deserialize)]
struct CarrierProfileConfig {
    #[serde(default)]
    carriers: Vec<CarrierCapability>,
    #[serde(default)]
    tariffs: Vec<NamedTariff>,
}

#[derive(Debug, Deserialize)]
struct NamedTariff {
    name: String,
    #[serde(flatten)]
    tariff: Tariff,
}

/// Carrier profiles and tariffs keyed by name
#[derive(Debug, Default)]
pub struct CarrierProfileLoader {
    carriers: HashMap<String, CarrierCapability>,
    tariffs: HashMap<String, Tariff>,
}

impl CarrierProfileLoader {
    /// Load carrier profiles from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read carrier profile file {}: {}",
                path.display(),
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load carrier profiles from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let config: CarrierProfileConfig = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse carrier profile TOML: {}",
                e
            )))
        })?;

        let mut carriers = HashMap::new();
        for carrier in config.carriers {
            if carriers.contains_key(&carrier.name) {
                return Err(Error::Config(ConfigError::ParseError(format!(
                    "Duplicate carrier profile: {}",
                    carrier.name
                ))));
            }
            carriers.insert(carrier.name.clone(), carrier);
        }

        let mut tariffs = HashMap::new();
        for named in config.tariffs {
            if tariffs.contains_key(&named.name) {
                return Err(Error::Config(ConfigError::ParseError(format!(
                    "Duplicate tariff: {}",
                    named.name
                ))));
            }
            tariffs.insert(named.name, named.tariff);
        }

        debug!(
            carriers = carriers.len(),
            tariffs = tariffs.len(),
            "loaded carrier profiles"
        );
        Ok(Self { carriers, tariffs })
    }

    pub fn get_carrier(&self, name: &str) -> Option<&CarrierCapability> {
        self.carriers.get(name)
    }

    /// Look up a carrier, failing with `UnknownCarrier`
    pub fn require_carrier(&self, name: &str) -> Result<&CarrierCapability> {
        self.get_carrier(name)
            .ok_or_else(|| Error::UnknownCarrier(name.to_string()))
    }

    pub fn get_tariff(&self, name: &str) -> Option<&Tariff> {
        self.tariffs.get(name)
    }

    /// Look up a tariff, failing with `UnknownTariff`
    pub fn require_tariff(&self, name: &str) -> Result<&Tariff> {
        self.get_tariff(name)
            .ok_or_else(|| Error::UnknownTariff(name.to_string()))
    }

    /// All carriers sorted by name
    pub fn all_carriers(&self) -> Vec<&CarrierCapability> {
        let mut carriers: Vec<&CarrierCapability> = self.carriers.values().collect();
        carriers.sort_by(|a, b| a.name.cmp(&b.name));
        carriers
    }

    pub fn tariff_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tariffs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn count(&self) -> usize {
        self.carriers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_types::{Length, LengthUnit, Mass};
    use std::io::Write;

    const TEST_TOML: &str = r#"
[[carriers]]
name = "ACME"
maximum_weight = { value = 20000, unit = "lbs" }
rates_include_overlength_fees = true

[carriers.accessorials]
unquotable = ["appointment_delivery"]
unserviceable = ["inside_delivery"]

[carriers.accessorials.mappable]
liftgate_delivery = "LGD"
residential_delivery = "RES"

[[carriers]]
name = "EuroFreight"
maximum_height = { value = 240, unit = "cm" }
overlength_fees_require_tariff = false

[[tariffs]]
name = "standard"

[[tariffs.overlength_rules]]
min_length = { value = 96, unit = "in" }
max_length = { value = 143.99, unit = "in" }
fee_cents = 5000

[[tariffs.overlength_rules]]
min_length = { value = 144, unit = "in" }
fee_cents = 10000
"#;

    #[test]
    fn test_load_from_str() {
        let loader = CarrierProfileLoader::load_from_str(TEST_TOML).unwrap();
        assert_eq!(loader.count(), 2);
        assert_eq!(loader.tariff_names(), vec!["standard"]);
    }

    #[test]
    fn test_carrier_fields() {
        let loader = CarrierProfileLoader::load_from_str(TEST_TOML).unwrap();
        let acme = loader.get_carrier("ACME").unwrap();
        assert_eq!(acme.maximum_weight, Mass::pounds(20_000.0));
        assert_eq!(acme.maximum_height, Length::inches(105.0));
        assert!(acme.rates_include_overlength_fees);
        assert_eq!(acme.accessorials.mappable.len(), 2);
        assert!(acme.accessorials.unserviceable.contains("inside_delivery"));

        let euro = loader.get_carrier("EuroFreight").unwrap();
        assert_eq!(euro.maximum_height.unit, LengthUnit::Centimeters);
        assert!(!euro.overlength_fees_require_tariff);
    }

    #[test]
    fn test_tariff_rules() {
        let loader = CarrierProfileLoader::load_from_str(TEST_TOML).unwrap();
        let tariff = loader.require_tariff("standard").unwrap();
        assert_eq!(tariff.overlength_rules().len(), 2);
        assert_eq!(tariff.overlength_rules()[1].max_length, None);
        assert_eq!(tariff.overlength_rules()[1].fee_cents, 10_000);
    }

    #[test]
    fn test_unknown_lookups() {
        let loader = CarrierProfileLoader::load_from_str(TEST_TOML).unwrap();
        assert!(matches!(
            loader.require_carrier("Nope"),
            Err(Error::UnknownCarrier(_))
        ));
        assert!(matches!(
            loader.require_tariff("premium"),
            Err(Error::UnknownTariff(_))
        ));
    }

    #[test]
    fn test_all_carriers_sorted() {
        let loader = CarrierProfileLoader::load_from_str(TEST_TOML).unwrap();
        let names: Vec<&str> = loader.all_carriers().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ACME", "EuroFreight"]);
    }

    #[test]
    fn test_invalid_tariff_rejected() {
        let toml = r#"
[[tariffs]]
name = "broken"

[[tariffs.overlength_rules]]
min_length = { value = 100, unit = "in" }
max_length = { value = 50, unit = "in" }
fee_cents = 100
"#;
        let err = CarrierProfileLoader::load_from_str(toml).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_duplicate_carrier_rejected() {
        let toml = r#"
[[carriers]]
name = "ACME"

[[carriers]]
name = "ACME"
"#;
        assert!(CarrierProfileLoader::load_from_str(toml).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEST_TOML.as_bytes()).unwrap();
        let loader = CarrierProfileLoader::load_from_file(file.path()).unwrap();
        assert!(loader.get_carrier("ACME").is_some());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CarrierProfileLoader::load_from_file(&dir.path().join("missing.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read carrier profile file"));
    }
}
