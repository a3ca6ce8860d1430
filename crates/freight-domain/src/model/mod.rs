//! Domain model types

pub mod carrier;
pub mod freight_class;
pub mod package;
pub mod packaging;
pub mod shipment;
pub mod tariff;

pub use carrier::{AccessorialPolicy, CarrierCapability};
pub use freight_class::FreightClass;
pub use package::{
    DimensionalWeightMode, DimensionsInput, LengthInput, Measure, Package, PackageDefaults,
    PackageInput, PackageOptions, WeightInput, WeightScope,
};
pub use packaging::Packaging;
pub use shipment::Shipment;
pub use tariff::{OverlengthRule, Tariff};
