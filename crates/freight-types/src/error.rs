//! Error types for freight-checker

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed package construction input
    #[error("Invalid package: {0}")]
    InvalidPackage(String),

    /// Malformed tariff rule table
    #[error("Invalid tariff: {0}")]
    InvalidTariff(String),

    #[error("Unknown unit: {0}")]
    InvalidUnit(String),

    /// The carrier cannot physically or contractually handle the shipment
    #[error("{0}")]
    Unserviceable(String),

    /// One or more requested accessorials cannot be serviced
    #[error("{}", unserviceable_accessorials_message(.accessorials))]
    UnserviceableAccessorials { accessorials: Vec<String> },

    #[error("Unknown carrier: {0}")]
    UnknownCarrier(String),

    #[error("Unknown tariff: {0}")]
    UnknownTariff(String),

    #[error("Manifest error: {0}")]
    Manifest(String),
}

impl Error {
    /// Whether this error is a carrier rejection of a well-formed shipment
    /// rather than malformed input.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::Unserviceable(_) | Error::UnserviceableAccessorials { .. }
        )
    }
}

fn unserviceable_accessorials_message(accessorials: &[String]) -> String {
    let readable: Vec<String> = accessorials.iter().map(|a| a.replace('_', " ")).collect();
    format!("Unable to service {}", readable.join(", "))
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unserviceable_accessorials_message() {
        let err = Error::UnserviceableAccessorials {
            accessorials: vec!["inside_delivery".to_string(), "unknown_code".to_string()],
        };
        assert_eq!(err.to_string(), "Unable to service inside delivery, unknown code");
    }

    #[test]
    fn test_unserviceable_message_is_verbatim() {
        let err = Error::Unserviceable("Items must weigh 10000.0 lbs or less".to_string());
        assert_eq!(err.to_string(), "Items must weigh 10000.0 lbs or less");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_invalid_package_is_not_rejection() {
        let err = Error::InvalidPackage("quantity is required".to_string());
        assert!(!err.is_rejection());
        assert!(err.to_string().starts_with("Invalid package"));
    }
}
