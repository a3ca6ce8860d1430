//! NMFC freight classes

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the sixteen canonical NMFC freight classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum FreightClass {
    Class55,
    Class60,
    Class65,
    Class70,
    Class77_5,
    Class85,
    Class92_5,
    Class100,
    Class110,
    Class125,
    Class150,
    Class175,
    Class200,
    Class250,
    Class300,
    Class400,
}

impl FreightClass {
    pub const ALL: [FreightClass; 16] = [
        FreightClass::Class55,
        FreightClass::Class60,
        FreightClass::Class65,
        FreightClass::Class70,
        FreightClass::Class77_5,
        FreightClass::Class85,
        FreightClass::Class92_5,
        FreightClass::Class100,
        FreightClass::Class110,
        FreightClass::Class125,
        FreightClass::Class150,
        FreightClass::Class175,
        FreightClass::Class200,
        FreightClass::Class250,
        FreightClass::Class300,
        FreightClass::Class400,
    ];

    pub fn value(self) -> f64 {
        match self {
            FreightClass::Class55 => 55.0,
            FreightClass::Class60 => 60.0,
            FreightClass::Class65 => 65.0,
            FreightClass::Class70 => 70.0,
            FreightClass::Class77_5 => 77.5,
            FreightClass::Class85 => 85.0,
            FreightClass::Class92_5 => 92.5,
            FreightClass::Class100 => 100.0,
            FreightClass::Class110 => 110.0,
            FreightClass::Class125 => 125.0,
            FreightClass::Class150 => 150.0,
            FreightClass::Class175 => 175.0,
            FreightClass::Class200 => 200.0,
            FreightClass::Class250 => 250.0,
            FreightClass::Class300 => 300.0,
            FreightClass::Class400 => 400.0,
        }
    }

    /// Sanitize a raw class value; anything off the canonical list is `None`
    pub fn from_value(value: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.value() == value)
    }
}

impl TryFrom<f64> for FreightClass {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or_else(|| format!("{} is not a valid freight class", value))
    }
}

impl From<FreightClass> for f64 {
    fn from(class: FreightClass) -> Self {
        class.value()
    }
}

impl fmt::Display for FreightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
