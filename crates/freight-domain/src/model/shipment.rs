//! Shipment aggregate

use freight_types::Money;

use super::package::{Package, WeightScope};

/// A set of packages moving together with the services requested for them
#[derive(Debug, Clone, Default)]
pub struct Shipment {
    pub packages: Vec<Package>,
    pub accessorials: Vec<String>,
    pub declared_value: Option<Money>,
}

impl Shipment {
    pub fn new(packages: Vec<Package>, accessorials: Vec<String>) -> Self {
        Self {
            packages,
            accessorials,
            declared_value: None,
        }
    }

    /// No package is palletized
    pub fn is_loose(&self) -> bool {
        !self.packages.is_empty() && self.packages.iter().all(|p| !p.is_pallet())
    }

    /// Every package is palletized
    pub fn is_palletized(&self) -> bool {
        !self.packages.is_empty() && self.packages.iter().all(|p| p.is_pallet())
    }

    /// A mix of loose and palletized packages
    pub fn is_loose_and_palletized(&self) -> bool {
        !self.is_loose() && !self.is_palletized() && !self.packages.is_empty()
    }

    pub fn is_hazmat(&self) -> bool {
        self.packages.iter().any(|p| p.is_hazmat())
    }

    pub fn total_pounds(&self) -> f64 {
        self.packages.iter().map(|p| p.pounds(WeightScope::Total)).sum()
    }

    pub fn total_pieces(&self) -> u64 {
        self.packages.iter().map(|p| u64::from(p.quantity())).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DimensionsInput, PackageOptions, Packaging};
    use freight_types::Mass;

    fn package(packaging: Packaging, pounds: f64, hazmat: bool) -> Package {
        Package::new(
            1,
            Mass::pounds(pounds),
            DimensionsInput::hwl([40.0, 48.0, 48.0]),
            packaging,
            PackageOptions {
                hazmat,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_palletized() {
        let shipment = Shipment::new(
            vec![
                package(Packaging::Pallet, 500.0, false),
                package(Packaging::Crate, 300.0, false),
            ],
            vec![],
        );
        assert!(shipment.is_palletized());
        assert!(!shipment.is_loose());
        assert!(!shipment.is_loose_and_palletized());
    }

    #[test]
    fn test_loose() {
        let shipment = Shipment::new(vec![package(Packaging::Box, 50.0, false)], vec![]);
        assert!(shipment.is_loose());
        assert!(!shipment.is_palletized());
    }

    #[test]
    fn test_mixed() {
        let shipment = Shipment::new(
            vec![
                package(Packaging::Box, 50.0, false),
                package(Packaging::Pallet, 500.0, true),
            ],
            vec![],
        );
        assert!(shipment.is_loose_and_palletized());
        assert!(shipment.is_hazmat());
        assert!((shipment.total_pounds() - 550.0).abs() < 1e-9);
        assert_eq!(shipment.total_pieces(), 2);
    }

    #[test]
    fn test_total_pieces_exceeds_u32() {
        let big = |packaging| {
            Package::new(
                3_000_000_000,
                Mass::pounds(1.0),
                DimensionsInput::hwl([10.0, 10.0, 10.0]),
                packaging,
                PackageOptions::default(),
            )
            .unwrap()
        };
        let shipment = Shipment::new(vec![big(Packaging::Box), big(Packaging::Pallet)], vec![]);
        assert_eq!(shipment.total_pieces(), 6_000_000_000);
    }

    #[test]
    fn test_empty_shipment_is_neither() {
        let shipment = Shipment::default();
        assert!(!shipment.is_loose());
        assert!(!shipment.is_palletized());
        assert!(!shipment.is_loose_and_palletized());
    }
}
