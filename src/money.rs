//! Fixed-point monetary values.
//!
//! Lunch Money reports amounts as decimal strings (`"12.34"`) next to a
//! lower-case ISO 4217 code (`"usd"`). [`parse_currency`] turns that pair into
//! a [`Money`] counted in the currency's minor units.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors raised while parsing an amount or currency code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// The amount is not a decimal number.
    #[error("{amount:?} is not a valid amount: {reason}")]
    InvalidAmount {
        /// The rejected input
        amount: String,
        /// Parser message
        reason: String,
    },

    /// The code is not three ASCII letters.
    #[error("{0:?} is not a valid ISO 4217 currency code")]
    InvalidCode(String),

    /// The amount does not fit in 64-bit minor units.
    #[error("{amount:?} {currency} is out of range")]
    OutOfRange {
        /// The rejected input
        amount: String,
        /// Currency the amount was scaled for
        currency: Currency,
    },
}

/// Currencies whose minor unit is not the usual 1/100.
const ZERO_DECIMAL: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "UYI", "VND",
    "VUV", "XAF", "XOF", "XPF",
];
const THREE_DECIMAL: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// An ISO 4217 currency code, normalized to upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency([u8; 3]);

impl Currency {
    /// The upper-case code, e.g. `"USD"`.
    pub fn code(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }

    /// Number of decimal places in one major unit.
    pub fn minor_unit_exponent(&self) -> u32 {
        let code = self.code();
        if ZERO_DECIMAL.contains(&code) {
            0
        } else if THREE_DECIMAL.contains(&code) {
            3
        } else {
            2
        }
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(CurrencyError::InvalidCode(s.to_string()));
        }
        let mut code = [0u8; 3];
        for (dst, src) in code.iter_mut().zip(bytes) {
            *dst = src.to_ascii_uppercase();
        }
        Ok(Currency(code))
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount of money in minor units (cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Money {
    minor_units: i64,
    currency: Currency,
}

impl Money {
    /// Create a value from minor units.
    pub fn new(minor_units: i64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Amount in minor units.
    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    /// The currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Amount in major units as a decimal.
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.minor_units, self.currency.minor_unit_exponent())
    }

    /// Check if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.minor_units < 0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount(), self.currency)
    }
}

/// Parse a decimal amount string and currency code into [`Money`].
///
/// Amounts with more precision than the currency supports are rounded to the
/// nearest minor unit, halves away from zero.
///
/// ```rust
/// use lunchmoney_api_client::money::parse_currency;
///
/// let money = parse_currency("12.34", "usd").unwrap();
/// assert_eq!(money.minor_units(), 1234);
/// assert_eq!(money.currency().code(), "USD");
/// ```
pub fn parse_currency(amount: &str, currency: &str) -> Result<Money, CurrencyError> {
    let currency: Currency = currency.parse()?;
    let value = Decimal::from_str(amount.trim()).map_err(|e| CurrencyError::InvalidAmount {
        amount: amount.to_string(),
        reason: e.to_string(),
    })?;

    let out_of_range = || CurrencyError::OutOfRange {
        amount: amount.to_string(),
        currency,
    };
    let scale = Decimal::from(10i64.pow(currency.minor_unit_exponent()));
    let minor_units = value
        .checked_mul(scale)
        .ok_or_else(out_of_range)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(out_of_range)?;

    Ok(Money::new(minor_units, currency))
}
