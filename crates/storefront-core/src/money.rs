//! Price type for representing monetary values.
//!
//! Amounts are exact decimals. Nothing is rounded until a value is
//! formatted for display, so totals never accumulate rounding drift.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Number of decimal places shown to users.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    TRY,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "TRY").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::TRY => "TRY",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₺").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::TRY => "\u{20ba}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "TRY" => Some(Currency::TRY),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error parsing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("invalid price: {0:?}")]
    Invalid(String),

    #[error("price must not be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative product price.
///
/// Decodes from a JSON number or a numeric string, encodes as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price(Decimal);

impl Price {
    /// Create a price, rejecting negative amounts.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Zero.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The exact amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Price of `quantity` units. Saturates instead of overflowing.
    pub fn times(&self, quantity: u32) -> Price {
        Price(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Amount rounded to the display precision (half away from zero).
    pub fn rounded(&self) -> Decimal {
        self.0.round_dp_with_strategy(
            DISPLAY_DECIMAL_PLACES,
            RoundingStrategy::MidpointAwayFromZero,
        )
    }

    /// Format as a display string (e.g., "₺49.99").
    pub fn display(&self, currency: Currency) -> String {
        format!("{}{}", currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.rounded())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| PriceError::Invalid(s.to_string()))?;
        Price::new(amount)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, other: Price) -> Price {
        Price(self.0.checked_add(other.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::zero(), |acc, p| acc + p)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_amount())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative number or numeric string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        Price::new(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        Price::new(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        // f64 Display is the shortest round-trip form, so 51.1 stays 51.1
        // instead of picking up binary noise.
        if !v.is_finite() {
            return Err(E::custom(PriceError::Invalid(v.to_string())));
        }
        v.to_string().parse().map_err(E::custom)
    }
}
