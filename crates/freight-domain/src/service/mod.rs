//! Domain services

pub mod accessorials;
pub mod freight_class;
pub mod overlength;
pub mod serviceability;

pub use accessorials::{check_accessorials, map_accessorials};
pub use freight_class::classify;
pub use overlength::{assess_overlength, overlength_fee, OverlengthAssessment};
pub use serviceability::validate_packages;
