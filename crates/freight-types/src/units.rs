//! Mass and length units
//!
//! Every conversion is an exact multiplicative scalar against the family's
//! base unit (grams for mass, centimeters for length). Nothing here rounds;
//! truncation belongs to whoever serializes the value.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const GRAMS_PER_OUNCE: f64 = 28.349523125;
pub const GRAMS_PER_POUND: f64 = 453.59237;
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;
pub const CENTIMETERS_PER_INCH: f64 = 2.54;

/// A unit belonging to a single dimension family.
///
/// Conversions are only defined between units of the same family, so
/// `convert(1.0, MassUnit::Pounds, LengthUnit::Inches)` does not compile.
pub trait Unit: Copy + PartialEq + fmt::Debug + fmt::Display {
    /// Size of one of this unit expressed in the family's base unit
    fn base_factor(self) -> f64;
}

/// Convert `value` from one unit to another within the same family
pub fn convert<U: Unit>(value: f64, from: U, to: U) -> f64 {
    if from == to {
        return value;
    }
    value * from.base_factor() / to.base_factor()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MassUnit {
    #[serde(rename = "g", alias = "gram", alias = "grams")]
    Grams,
    #[serde(rename = "oz", alias = "ounce", alias = "ounces")]
    Ounces,
    #[serde(rename = "lb", alias = "lbs", alias = "pound", alias = "pounds")]
    Pounds,
    #[serde(rename = "kg", alias = "kgs", alias = "kilogram", alias = "kilograms")]
    Kilograms,
}

impl Unit for MassUnit {
    fn base_factor(self) -> f64 {
        match self {
            MassUnit::Grams => 1.0,
            MassUnit::Ounces => GRAMS_PER_OUNCE,
            MassUnit::Pounds => GRAMS_PER_POUND,
            MassUnit::Kilograms => GRAMS_PER_KILOGRAM,
        }
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MassUnit::Grams => write!(f, "g"),
            MassUnit::Ounces => write!(f, "oz"),
            MassUnit::Pounds => write!(f, "lb"),
            MassUnit::Kilograms => write!(f, "kg"),
        }
    }
}

impl FromStr for MassUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gram" | "grams" => Ok(MassUnit::Grams),
            "oz" | "ounce" | "ounces" => Ok(MassUnit::Ounces),
            "lb" | "lbs" | "pound" | "pounds" => Ok(MassUnit::Pounds),
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(MassUnit::Kilograms),
            other => Err(Error::InvalidUnit(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(
        rename = "cm",
        alias = "centimeter",
        alias = "centimeters",
        alias = "centimetre",
        alias = "centimetres"
    )]
    Centimeters,
    #[serde(rename = "in", alias = "inch", alias = "inches")]
    Inches,
}

impl Unit for LengthUnit {
    fn base_factor(self) -> f64 {
        match self {
            LengthUnit::Centimeters => 1.0,
            LengthUnit::Inches => CENTIMETERS_PER_INCH,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthUnit::Centimeters => write!(f, "cm"),
            LengthUnit::Inches => write!(f, "in"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(LengthUnit::Centimeters)
            }
            "in" | "inch" | "inches" => Ok(LengthUnit::Inches),
            other => Err(Error::InvalidUnit(other.to_string())),
        }
    }
}

/// Unit system used to interpret bare numbers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Mass unit for bare weights: grams (metric) or ounces (imperial)
    pub fn mass_unit(self) -> MassUnit {
        match self {
            UnitSystem::Metric => MassUnit::Grams,
            UnitSystem::Imperial => MassUnit::Ounces,
        }
    }

    /// Length unit for bare dimensions: centimeters (metric) or inches (imperial)
    pub fn length_unit(self) -> LengthUnit {
        match self {
            UnitSystem::Metric => LengthUnit::Centimeters,
            UnitSystem::Imperial => LengthUnit::Inches,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}

/// A value together with the unit it was given in.
///
/// The stored value is never rewritten; conversion happens when read.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quantity<U> {
    pub value: f64,
    pub unit: U,
}

pub type Mass = Quantity<MassUnit>;
pub type Length = Quantity<LengthUnit>;

impl<U: Unit> Quantity<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }

    /// Numeric value expressed in `unit`
    pub fn in_unit(&self, unit: U) -> f64 {
        convert(self.value, self.unit, unit)
    }

    pub fn convert_to(&self, unit: U) -> Self {
        Self::new(self.in_unit(unit), unit)
    }

    /// Same unit, value multiplied by `factor`
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.value * factor, self.unit)
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }

    /// Compare two quantities of the same family regardless of their units
    pub fn exceeds(&self, other: &Self) -> bool {
        self.in_unit(other.unit) > other.value
    }
}

impl Quantity<MassUnit> {
    pub fn grams(value: f64) -> Self {
        Self::new(value, MassUnit::Grams)
    }

    pub fn ounces(value: f64) -> Self {
        Self::new(value, MassUnit::Ounces)
    }

    pub fn pounds(value: f64) -> Self {
        Self::new(value, MassUnit::Pounds)
    }

    pub fn kilograms(value: f64) -> Self {
        Self::new(value, MassUnit::Kilograms)
    }
}

impl Quantity<LengthUnit> {
    pub fn centimeters(value: f64) -> Self {
        Self::new(value, LengthUnit::Centimeters)
    }

    pub fn inches(value: f64) -> Self {
        Self::new(value, LengthUnit::Inches)
    }
}

impl<U: Unit> fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASS_UNITS: [MassUnit; 4] = [
        MassUnit::Grams,
        MassUnit::Ounces,
        MassUnit::Pounds,
        MassUnit::Kilograms,
    ];

    #[test]
    fn test_pound_to_grams_is_exact() {
        assert_eq!(convert(1.0, MassUnit::Pounds, MassUnit::Grams), 453.59237);
    }

    #[test]
    fn test_inch_to_centimeters_is_exact() {
        assert_eq!(convert(1.0, LengthUnit::Inches, LengthUnit::Centimeters), 2.54);
    }

    #[test]
    fn test_pound_is_sixteen_ounces() {
        let oz = convert(1.0, MassUnit::Pounds, MassUnit::Ounces);
        assert!((oz - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_unit_is_identity() {
        assert_eq!(convert(123.456, MassUnit::Kilograms, MassUnit::Kilograms), 123.456);
    }

    #[test]
    fn test_mass_round_trip() {
        for value in [0.0, 0.001, 1.0, 500.0, 10_000.0, 123_456.789] {
            for from in MASS_UNITS {
                for to in MASS_UNITS {
                    let back = convert(convert(value, from, to), to, from);
                    assert!(
                        (back - value).abs() <= 1e-9 * value.max(1.0),
                        "{} {} -> {} -> {}",
                        value,
                        from,
                        to,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn test_length_round_trip() {
        for value in [0.0, 1.0, 48.0, 105.0, 2540.0] {
            let cm = convert(value, LengthUnit::Inches, LengthUnit::Centimeters);
            let back = convert(cm, LengthUnit::Centimeters, LengthUnit::Inches);
            assert!((back - value).abs() < 1e-9);
        }
    }

    #[test]
    fn test_quantity_keeps_original_unit() {
        let mass = Mass::pounds(500.0);
        assert!((mass.in_unit(MassUnit::Kilograms) - 226.796185).abs() < 1e-6);
        assert_eq!(mass.unit, MassUnit::Pounds);
        assert_eq!(mass.value, 500.0);
    }

    #[test]
    fn test_exceeds_across_units() {
        assert!(Length::centimeters(300.0).exceeds(&Length::inches(105.0)));
        assert!(!Length::centimeters(266.0).exceeds(&Length::inches(105.0)));
    }

    #[test]
    fn test_unit_aliases() {
        assert_eq!("lbs".parse::<MassUnit>().unwrap(), MassUnit::Pounds);
        assert_eq!("KG".parse::<MassUnit>().unwrap(), MassUnit::Kilograms);
        assert_eq!("kgs".parse::<MassUnit>().unwrap(), MassUnit::Kilograms);
        assert_eq!("inches".parse::<LengthUnit>().unwrap(), LengthUnit::Inches);
        assert!("furlong".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_quantity_deserializes_with_alias() {
        let length: Length = serde_json::from_str(r#"{"value": 48, "unit": "inches"}"#).unwrap();
        assert_eq!(length, Length::inches(48.0));
    }

    #[test]
    fn test_unit_system_bare_units() {
        assert_eq!(UnitSystem::Metric.mass_unit(), MassUnit::Grams);
        assert_eq!(UnitSystem::Imperial.mass_unit(), MassUnit::Ounces);
        assert_eq!(UnitSystem::Imperial.length_unit(), LengthUnit::Inches);
    }
}
