//! Infrastructure layer - loaders for carrier profiles and package manifests

pub mod carrier_profile_loader;
pub mod manifest_csv;

pub use carrier_profile_loader::CarrierProfileLoader;
pub use manifest_csv::{load_packages_from_csv, load_packages_from_reader, ManifestError};
