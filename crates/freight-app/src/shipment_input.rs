//! Shipment documents
//!
//! ```json
//! {
//!   "carrier": "ACME",
//!   "tariff": "standard",
//!   "accessorials": ["liftgate_delivery"],
//!   "packages": [
//!     {"quantity": 1, "weight": {"value": 500, "unit": "lb"},
//!      "dimensions": [48, 40, 48], "packaging": "pallet"}
//!   ]
//! }
//! ```

use std::path::Path;

use freight_domain::model::{Package, PackageDefaults, PackageInput, Shipment};
use freight_types::{Error, Money, MoneyInput, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentInput {
    pub carrier: String,
    #[serde(default)]
    pub tariff: Option<String>,
    #[serde(default)]
    pub accessorials: Vec<String>,
    #[serde(default)]
    pub declared_value: Option<MoneyInput>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub packages: Vec<PackageInput>,
}

impl ShipmentInput {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the domain shipment. Package errors name the 1-based package.
    pub fn into_shipment(self, defaults: &PackageDefaults) -> Result<Shipment> {
        let packages = self
            .packages
            .into_iter()
            .enumerate()
            .map(|(i, input)| {
                Package::from_input(input, defaults).map_err(|e| match e {
                    Error::InvalidPackage(msg) => {
                        Error::InvalidPackage(format!("package {}: {}", i + 1, msg))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<Package>>>()?;

        let declared_value = match self.declared_value {
            Some(ref value) => {
                let cents = value.cents().ok_or_else(|| {
                    Error::InvalidPackage(format!(
                        "shipment declared value {:?} is not a number",
                        value
                    ))
                })?;
                Some(Money::new(cents, self.currency.clone()))
            }
            None => None,
        };

        let mut shipment = Shipment::new(packages, self.accessorials);
        shipment.declared_value = declared_value;
        Ok(shipment)
    }
}
