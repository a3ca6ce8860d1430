//! Monetary amounts in minor units

use serde::{Deserialize, Serialize};

/// An amount in cents with an optional ISO 4217 currency code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub cents: i64,
    #[serde(default)]
    pub currency: Option<String>,
}

impl Money {
    pub fn new(cents: i64, currency: Option<String>) -> Self {
        Self { cents, currency }
    }
}

/// A loosely typed amount as it arrives from callers.
///
/// Integers are already cents, floats are whole currency units, and text
/// containing a decimal point is read as currency units (otherwise cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoneyInput {
    Cents(i64),
    Amount(f64),
    Text(String),
}

impl MoneyInput {
    /// Amount in cents, or `None` if the text is not a number
    pub fn cents(&self) -> Option<i64> {
        match self {
            MoneyInput::Cents(cents) => Some(*cents),
            MoneyInput::Amount(amount) => Some((amount * 100.0).round() as i64),
            MoneyInput::Text(text) => {
                let text = text.trim();
                if text.contains('.') {
                    text.parse::<f64>().ok().map(|v| (v * 100.0).round() as i64)
                } else {
                    text.parse::<i64>().ok()
                }
            }
        }
    }
}
