//! Application service layer - config, shipment documents, assessment use case, reports

pub mod assessment;
pub mod config;
pub mod shipment_input;

pub use assessment::{
    assess_shipment, generate_assessment_report, Handling, PackageAssessment, ShipmentAssessment,
};
pub use config::Config;
pub use shipment_input::ShipmentInput;
