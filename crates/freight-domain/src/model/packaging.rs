//! Packaging types

use std::fmt;
use std::str::FromStr;

use freight_types::Error;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Packaging {
    Box,
    Bundle,
    Container,
    Crate,
    Cylinder,
    Drum,
    Luggage,
    Pail,
    Pallet,
    Piece,
    Roll,
    Tote,
    Truckload,
}

impl Packaging {
    pub const ALL: [Packaging; 13] = [
        Packaging::Box,
        Packaging::Bundle,
        Packaging::Container,
        Packaging::Crate,
        Packaging::Cylinder,
        Packaging::Drum,
        Packaging::Luggage,
        Packaging::Pail,
        Packaging::Pallet,
        Packaging::Piece,
        Packaging::Roll,
        Packaging::Tote,
        Packaging::Truckload,
    ];

    /// Crates, drums, pallets and totes ship as palletized freight
    pub fn is_pallet(self) -> bool {
        matches!(
            self,
            Packaging::Crate | Packaging::Drum | Packaging::Pallet | Packaging::Tote
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Packaging::Box => "box",
            Packaging::Bundle => "bundle",
            Packaging::Container => "container",
            Packaging::Crate => "crate",
            Packaging::Cylinder => "cylinder",
            Packaging::Drum => "drum",
            Packaging::Luggage => "luggage",
            Packaging::Pail => "pail",
            Packaging::Pallet => "pallet",
            Packaging::Piece => "piece",
            Packaging::Roll => "roll",
            Packaging::Tote => "tote",
            Packaging::Truckload => "truckload",
        }
    }
}

impl fmt::Display for Packaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Packaging {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Packaging::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = Packaging::ALL.iter().map(|p| p.as_str()).collect();
                Error::InvalidPackage(format!(
                    "packaging `{}` should be one of {}",
                    s.trim(),
                    valid.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pallet_types() {
        let pallets: Vec<Packaging> = Packaging::ALL.into_iter().filter(|p| p.is_pallet()).collect();
        assert_eq!(
            pallets,
            vec![Packaging::Crate, Packaging::Drum, Packaging::Pallet, Packaging::Tote]
        );
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Pallet".parse::<Packaging>().unwrap(), Packaging::Pallet);
        assert_eq!(" truckload ".parse::<Packaging>().unwrap(), Packaging::Truckload);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "envelope".parse::<Packaging>().unwrap_err();
        assert!(matches!(err, Error::InvalidPackage(_)));
        assert!(err.to_string().contains("envelope"));
    }

    #[test]
    fn test_display_round_trips() {
        for packaging in Packaging::ALL {
            assert_eq!(packaging.to_string().parse::<Packaging>().unwrap(), packaging);
        }
    }
}
