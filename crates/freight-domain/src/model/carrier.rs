//! Static carrier capability limits

use std::collections::{BTreeMap, BTreeSet};

use freight_types::{Length, Mass};
use serde::{Deserialize, Serialize};

/// How a carrier treats each accessorial code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessorialPolicy {
    /// Accessorial code to the carrier's own code
    pub mappable: BTreeMap<String, String>,
    /// Accepted but not priced by the carrier
    pub unquotable: BTreeSet<String>,
    /// Rejected outright
    pub unserviceable: BTreeSet<String>,
}

/// Physical and contractual limits of one carrier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierCapability {
    pub name: String,
    #[serde(default = "default_maximum_height")]
    pub maximum_height: Length,
    #[serde(default = "default_maximum_weight")]
    pub maximum_weight: Mass,
    #[serde(default = "default_minimum_length_for_overlength_fees")]
    pub minimum_length_for_overlength_fees: Length,
    /// The carrier does not quote overlength fees, so a tariff must
    #[serde(default = "default_true")]
    pub overlength_fees_require_tariff: bool,
    /// Quoted rates already carry excessive length fees
    #[serde(default)]
    pub rates_include_overlength_fees: bool,
    #[serde(default)]
    pub accessorials: AccessorialPolicy,
}

fn default_maximum_height() -> Length {
    Length::inches(105.0)
}

fn default_maximum_weight() -> Mass {
    Mass::pounds(10_000.0)
}

fn default_minimum_length_for_overlength_fees() -> Length {
    Length::inches(48.0)
}

fn default_true() -> bool {
    true
}

impl CarrierCapability {
    /// A carrier with the standard LTL limits and no accessorials
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            maximum_height: default_maximum_height(),
            maximum_weight: default_maximum_weight(),
            minimum_length_for_overlength_fees: default_minimum_length_for_overlength_fees(),
            overlength_fees_require_tariff: true,
            rates_include_overlength_fees: false,
            accessorials: AccessorialPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_types::{LengthUnit, MassUnit};

    #[test]
    fn test_standard_limits() {
        let carrier = CarrierCapability::new("ACME");
        assert_eq!(carrier.maximum_height.in_unit(LengthUnit::Inches), 105.0);
        assert_eq!(carrier.maximum_weight.in_unit(MassUnit::Pounds), 10_000.0);
        assert_eq!(
            carrier
                .minimum_length_for_overlength_fees
                .in_unit(LengthUnit::Inches),
            48.0
        );
        assert!(carrier.overlength_fees_require_tariff);
        assert!(!carrier.rates_include_overlength_fees);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let carrier: CarrierCapability = serde_json::from_str(
            r#"{
                "name": "ACME",
                "maximum_weight": {"value": 5000, "unit": "kg"},
                "accessorials": {"mappable": {"liftgate_delivery": "LGD"}}
            }"#,
        )
        .unwrap();
        assert_eq!(carrier.maximum_weight, Mass::kilograms(5000.0));
        assert_eq!(carrier.maximum_height, Length::inches(105.0));
        assert_eq!(
            carrier.accessorials.mappable.get("liftgate_delivery").map(String::as_str),
            Some("LGD")
        );
        assert!(carrier.accessorials.unserviceable.is_empty());
    }
}
