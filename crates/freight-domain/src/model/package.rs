//! Package model
//!
//! A package stores its weight and dimensions exactly as given (value plus
//! unit) and converts on read. Derived figures that only depend on the
//! stored measurements are computed once at construction and never change,
//! so a `Package` can be shared across threads without synchronization.

use std::f64::consts::PI;
use std::str::FromStr;

use freight_types::{
    Error, Length, LengthUnit, Mass, MassUnit, Money, MoneyInput, Result, UnitSystem,
};
use serde::{Deserialize, Serialize};

use super::freight_class::FreightClass;
use super::packaging::Packaging;
use crate::service::freight_class::classify;

const CUBIC_INCHES_PER_CUBIC_FOOT: f64 = 1728.0;
/// IATA volumetric divisor: cm³ per kilogram
const VOLUMETRIC_CM3_PER_KG: f64 = 6000.0;
/// Domestic dimensional divisor: in³ per pound
const DIM_DIVISOR_IN3_PER_LB: f64 = 139.0;

/// Whether a figure is for a single piece or for the whole quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightScope {
    Each,
    Total,
}

/// Formula used for dimensional weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionalWeightMode {
    /// cm³ / 6000 in kilograms, reported in the package's weight unit system
    #[default]
    Volumetric,
    /// ⌈L⌉ × ⌈W⌉ × ⌈H⌉ in inches / 139, in pounds
    Divisor139,
}

impl FromStr for DimensionalWeightMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "volumetric" | "iata" => Ok(DimensionalWeightMode::Volumetric),
            "divisor139" | "divisor_139" | "139" => Ok(DimensionalWeightMode::Divisor139),
            other => Err(Error::Config(freight_types::ConfigError::ParseError(format!(
                "unknown dimensional weight mode `{}`",
                other
            )))),
        }
    }
}

impl std::fmt::Display for DimensionalWeightMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DimensionalWeightMode::Volumetric => write!(f, "volumetric"),
            DimensionalWeightMode::Divisor139 => write!(f, "divisor139"),
        }
    }
}

/// Linear and volume measurements derived from the three dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Height,
    Width,
    Length,
    /// Circumference for cylinders, 2H + 2W otherwise
    Girth,
    BoxVolume,
    /// Cylinder volume for cylinders, box volume otherwise
    Volume,
}

/// A weight given either as a bare number or with an explicit unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightInput {
    Raw(f64),
    Measured(Mass),
}

impl WeightInput {
    fn resolve(self, system: UnitSystem) -> Result<Mass> {
        let mass = match self {
            WeightInput::Raw(value) => Mass::new(value, system.mass_unit()),
            WeightInput::Measured(mass) => mass,
        };
        if !mass.value.is_finite() || mass.value < 0.0 {
            return Err(Error::InvalidPackage(format!(
                "weight must be a non-negative number, got {}",
                mass.value
            )));
        }
        Ok(mass)
    }
}

impl From<Mass> for WeightInput {
    fn from(mass: Mass) -> Self {
        WeightInput::Measured(mass)
    }
}

impl From<f64> for WeightInput {
    fn from(value: f64) -> Self {
        WeightInput::Raw(value)
    }
}

/// A length given either as a bare number or with an explicit unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LengthInput {
    Raw(f64),
    Measured(Length),
}

impl LengthInput {
    fn resolve(self, system: UnitSystem) -> Result<Length> {
        let length = match self {
            LengthInput::Raw(value) => Length::new(value, system.length_unit()),
            LengthInput::Measured(length) => length,
        };
        if !length.value.is_finite() || length.value < 0.0 {
            return Err(Error::InvalidPackage(format!(
                "dimensions must be non-negative numbers, got {}",
                length.value
            )));
        }
        Ok(length)
    }
}

impl From<Length> for LengthInput {
    fn from(length: Length) -> Self {
        LengthInput::Measured(length)
    }
}

impl From<f64> for LengthInput {
    fn from(value: f64) -> Self {
        LengthInput::Raw(value)
    }
}

/// Up to three dimensions, positionally (H, W, L) or by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionsInput {
    List(Vec<Option<LengthInput>>),
    Named {
        height: Option<LengthInput>,
        width: Option<LengthInput>,
        length: Option<LengthInput>,
    },
}

impl Default for DimensionsInput {
    fn default() -> Self {
        DimensionsInput::List(Vec::new())
    }
}

impl DimensionsInput {
    /// Positional dimensions in height, width, length order
    pub fn hwl<T: Into<LengthInput>>(values: impl IntoIterator<Item = T>) -> Self {
        DimensionsInput::List(values.into_iter().map(|v| Some(v.into())).collect())
    }

    fn resolve(self, system: UnitSystem) -> Result<[Length; 3]> {
        let supplied: Vec<LengthInput> = match self {
            DimensionsInput::List(values) => values.into_iter().flatten().collect(),
            DimensionsInput::Named {
                height,
                width,
                length,
            } => [height, width, length].into_iter().flatten().collect(),
        };

        if supplied.len() > 3 {
            return Err(Error::InvalidPackage(format!(
                "at most three dimensions are accepted, got {}",
                supplied.len()
            )));
        }

        let mut lengths = supplied
            .into_iter()
            .map(|l| l.resolve(system))
            .collect::<Result<Vec<Length>>>()?;

        if lengths.is_empty() {
            return Ok([Length::new(0.0, system.length_unit()); 3]);
        }

        // [5] => [5, 5, 5], [1, 2] => [1, 1, 2]
        while lengths.len() < 3 {
            lengths.insert(0, lengths[0]);
        }

        Ok([lengths[0], lengths[1], lengths[2]])
    }
}

/// Caller-supplied defaults applied to every package built from loose input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDefaults {
    #[serde(default)]
    pub units: UnitSystem,
}

/// Optional package attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageOptions {
    /// Unit system for both weight and dimensions
    pub units: Option<UnitSystem>,
    /// Overrides `units` for weight
    pub weight_units: Option<UnitSystem>,
    /// Overrides `units` for dimensions
    pub dim_units: Option<UnitSystem>,
    #[serde(alias = "freight_class")]
    pub declared_freight_class: Option<FreightClass>,
    pub hazmat: bool,
    pub cylinder: bool,
    pub tube: bool,
    pub oversized: bool,
    pub gift: bool,
    pub unpackaged: bool,
    pub value: Option<MoneyInput>,
    pub currency: Option<String>,
    pub nmfc: Option<String>,
    pub description: Option<String>,
}

impl PackageOptions {
    /// Fill in the unit system from `defaults` when none was given
    pub fn with_defaults(mut self, defaults: &PackageDefaults) -> Self {
        if self.units.is_none() {
            self.units = Some(defaults.units);
        }
        self
    }
}

/// Loosely typed package description, as read from JSON or CSV
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageInput {
    pub quantity: Option<i64>,
    pub weight: Option<WeightInput>,
    #[serde(default)]
    pub dimensions: DimensionsInput,
    pub packaging: Option<String>,
    #[serde(flatten)]
    pub options: PackageOptions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Derived {
    inches: [f64; 3],
    centimeters: [f64; 3],
    /// Box volume of one piece, `None` when any dimension is zero
    cubic_inches_each: Option<f64>,
    density: Option<f64>,
    calculated_freight_class: Option<FreightClass>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    quantity: u32,
    total_weight: Mass,
    each_weight: Mass,
    /// Height, width, length. Freight carriers expect H × W × L, so these
    /// are never sorted.
    dimensions: [Length; 3],
    weight_unit_system: UnitSystem,
    dimensions_unit_system: UnitSystem,
    packaging: Packaging,
    declared_freight_class: Option<FreightClass>,
    hazmat: bool,
    cylinder: bool,
    oversized: bool,
    gift: bool,
    unpackaged: bool,
    declared_value: Option<Money>,
    nmfc: Option<String>,
    description: Option<String>,
    derived: Derived,
}

impl Package {
    /// Build a package from a total weight, up to three dimensions and a
    /// packaging type. Bare numbers are read in the unit system chosen by
    /// `options` (metric when unset).
    pub fn new(
        quantity: u32,
        total_weight: impl Into<WeightInput>,
        dimensions: DimensionsInput,
        packaging: Packaging,
        options: PackageOptions,
    ) -> Result<Self> {
        if quantity < 1 {
            return Err(Error::InvalidPackage(
                "quantity must be at least 1".to_string(),
            ));
        }

        let units = options.units.unwrap_or_default();
        let weight_unit_system = options.weight_units.unwrap_or(units);
        let dimensions_unit_system = options.dim_units.unwrap_or(units);

        let total_weight = total_weight.into().resolve(weight_unit_system)?;
        let each_weight = total_weight.scale(1.0 / quantity as f64);
        let dimensions = dimensions.resolve(dimensions_unit_system)?;

        let declared_value = match options.value {
            Some(ref value) => {
                let cents = value.cents().ok_or_else(|| {
                    Error::InvalidPackage(format!("declared value {:?} is not a number", value))
                })?;
                Some(Money::new(cents, options.currency.clone()))
            }
            None => None,
        };

        let derived = Derived::compute(&dimensions, &each_weight);

        Ok(Self {
            quantity,
            total_weight,
            each_weight,
            dimensions,
            weight_unit_system,
            dimensions_unit_system,
            packaging,
            declared_freight_class: options.declared_freight_class,
            hazmat: options.hazmat,
            cylinder: options.cylinder || options.tube,
            oversized: options.oversized,
            gift: options.gift,
            unpackaged: options.unpackaged,
            declared_value,
            nmfc: options.nmfc.filter(|s| !s.trim().is_empty()),
            description: options.description,
            derived,
        })
    }

    /// Build a package from loose input, rejecting missing or malformed
    /// required fields
    pub fn from_input(input: PackageInput, defaults: &PackageDefaults) -> Result<Self> {
        let quantity = match input.quantity {
            None => return Err(Error::InvalidPackage("quantity is required".to_string())),
            Some(q) if q < 1 => {
                return Err(Error::InvalidPackage(format!(
                    "quantity must be at least 1, got {}",
                    q
                )))
            }
            Some(q) => u32::try_from(q)
                .map_err(|_| Error::InvalidPackage(format!("quantity {} is too large", q)))?,
        };

        let packaging: Packaging = input
            .packaging
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::InvalidPackage("packaging is required".to_string()))?
            .parse()?;

        let weight = input
            .weight
            .ok_or_else(|| Error::InvalidPackage("weight is required".to_string()))?;

        Self::new(
            quantity,
            weight,
            input.dimensions,
            packaging,
            input.options.with_defaults(defaults),
        )
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn packaging(&self) -> Packaging {
        self.packaging
    }

    pub fn is_pallet(&self) -> bool {
        self.packaging.is_pallet()
    }

    pub fn weight_unit_system(&self) -> UnitSystem {
        self.weight_unit_system
    }

    pub fn dimensions_unit_system(&self) -> UnitSystem {
        self.dimensions_unit_system
    }

    /// Stored dimensions as given, in height, width, length order
    pub fn dimensions(&self) -> &[Length; 3] {
        &self.dimensions
    }

    pub fn height(&self, unit: LengthUnit) -> f64 {
        self.dimensions[0].in_unit(unit)
    }

    pub fn width(&self, unit: LengthUnit) -> f64 {
        self.dimensions[1].in_unit(unit)
    }

    pub fn length(&self, unit: LengthUnit) -> f64 {
        self.dimensions[2].in_unit(unit)
    }

    pub fn inches(&self) -> [f64; 3] {
        self.derived.inches
    }

    pub fn centimeters(&self) -> [f64; 3] {
        self.derived.centimeters
    }

    /// Whether any of height, width or length is zero
    pub fn has_missing_dimensions(&self) -> bool {
        self.dimensions.iter().any(|d| d.is_zero())
    }

    pub fn measure(&self, measure: Measure, unit: LengthUnit) -> f64 {
        let [h, w, l] = self.dimensions.map(|d| d.in_unit(unit));
        match measure {
            Measure::Height => h,
            Measure::Width => w,
            Measure::Length => l,
            Measure::Girth => {
                if self.cylinder {
                    PI * (h + w) / 2.0
                } else {
                    2.0 * h + 2.0 * w
                }
            }
            Measure::BoxVolume => h * w * l,
            Measure::Volume => {
                if self.cylinder {
                    PI * ((h + w) / 4.0).powi(2) * l
                } else {
                    h * w * l
                }
            }
        }
    }

    pub fn weight(&self, scope: WeightScope) -> Mass {
        match scope {
            WeightScope::Each => self.each_weight,
            WeightScope::Total => self.total_weight,
        }
    }

    pub fn grams(&self, scope: WeightScope) -> f64 {
        self.weight(scope).in_unit(MassUnit::Grams)
    }

    pub fn ounces(&self, scope: WeightScope) -> f64 {
        self.weight(scope).in_unit(MassUnit::Ounces)
    }

    pub fn pounds(&self, scope: WeightScope) -> f64 {
        self.weight(scope).in_unit(MassUnit::Pounds)
    }

    pub fn kilograms(&self, scope: WeightScope) -> f64 {
        self.weight(scope).in_unit(MassUnit::Kilograms)
    }

    /// Cubic feet rounded to two places, `None` when a dimension is zero
    pub fn cubic_ft(&self, scope: WeightScope) -> Option<f64> {
        let cubic_inches = self.derived.cubic_inches_each?;
        let pieces = match scope {
            WeightScope::Each => 1.0,
            WeightScope::Total => self.quantity as f64,
        };
        Some(round2(cubic_inches / CUBIC_INCHES_PER_CUBIC_FOOT * pieces))
    }

    /// Pounds per cubic foot of one piece, rounded to two places
    pub fn density(&self) -> Option<f64> {
        self.derived.density
    }

    pub fn calculated_freight_class(&self) -> Option<FreightClass> {
        self.derived.calculated_freight_class
    }

    pub fn declared_freight_class(&self) -> Option<FreightClass> {
        self.declared_freight_class
    }

    /// Declared class when present, otherwise the density-derived one
    pub fn freight_class(&self) -> Option<FreightClass> {
        self.declared_freight_class
            .or(self.derived.calculated_freight_class)
    }

    /// Assign the declared freight class. Allowed once.
    pub fn declare_freight_class(&mut self, class: FreightClass) -> Result<()> {
        if let Some(existing) = self.declared_freight_class {
            return Err(Error::InvalidPackage(format!(
                "freight class already declared as {}",
                existing
            )));
        }
        self.declared_freight_class = Some(class);
        Ok(())
    }

    /// Dimensional weight under `mode`, `None` when a dimension is zero
    pub fn dimensional_weight(
        &self,
        scope: WeightScope,
        mode: DimensionalWeightMode,
    ) -> Option<Mass> {
        if self.has_missing_dimensions() {
            return None;
        }
        let pieces = match scope {
            WeightScope::Each => 1.0,
            WeightScope::Total => self.quantity as f64,
        };
        let each = match mode {
            DimensionalWeightMode::Volumetric => {
                let cm3 = self.measure(Measure::BoxVolume, LengthUnit::Centimeters);
                Mass::kilograms(cm3 / VOLUMETRIC_CM3_PER_KG)
                    .convert_to(self.weight_unit_system.mass_unit())
            }
            DimensionalWeightMode::Divisor139 => {
                let [h, w, l] = self.derived.inches.map(f64::ceil);
                Mass::pounds(h * w * l / DIM_DIVISOR_IN3_PER_LB)
            }
        };
        Some(each.scale(pieces))
    }

    pub fn volumetric_weight(&self, scope: WeightScope) -> Option<Mass> {
        self.dimensional_weight(scope, DimensionalWeightMode::Volumetric)
    }

    /// The greater of actual and dimensional weight
    pub fn billable_weight(&self, scope: WeightScope, mode: DimensionalWeightMode) -> Mass {
        let actual = self.weight(scope);
        match self.dimensional_weight(scope, mode) {
            Some(dim) if dim.in_unit(MassUnit::Grams) > actual.in_unit(MassUnit::Grams) => dim,
            _ => actual,
        }
    }

    pub fn is_hazmat(&self) -> bool {
        self.hazmat
    }

    pub fn is_cylinder(&self) -> bool {
        self.cylinder
    }

    pub fn is_tube(&self) -> bool {
        self.cylinder
    }

    pub fn is_oversized(&self) -> bool {
        self.oversized
    }

    pub fn is_gift(&self) -> bool {
        self.gift
    }

    pub fn is_unpackaged(&self) -> bool {
        self.unpackaged
    }

    pub fn declared_value(&self) -> Option<&Money> {
        self.declared_value.as_ref()
    }

    pub fn nmfc(&self) -> Option<&str> {
        self.nmfc.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Derived {
    fn compute(dimensions: &[Length; 3], each_weight: &Mass) -> Self {
        let inches = dimensions.map(|d| d.in_unit(LengthUnit::Inches));
        let centimeters = dimensions.map(|d| d.in_unit(LengthUnit::Centimeters));

        let cubic_inches_each = if inches.iter().any(|v| *v == 0.0) {
            None
        } else {
            Some(inches[0] * inches[1] * inches[2])
        };

        let density = cubic_inches_each
            .map(|ci| round2(ci / CUBIC_INCHES_PER_CUBIC_FOOT))
            .filter(|cubic_ft| *cubic_ft > 0.0)
            .map(|cubic_ft| round2(each_weight.in_unit(MassUnit::Pounds) / cubic_ft));

        Self {
            inches,
            centimeters,
            cubic_inches_each,
            density,
            calculated_freight_class: classify(density),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
