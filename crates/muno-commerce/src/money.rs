//! Money type for representing monetary values.
//!
//! Amounts are integers in the smallest unit of the currency. The shop
//! prices in Ugandan shillings, which have no minor unit, so a UGX amount
//! is a whole-shilling count.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    UGX,
    KES,
    TZS,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "UGX").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::UGX => "UGX",
            Currency::KES => "KES",
            Currency::TZS => "TZS",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::UGX | Currency::TZS => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "UGX" => Some(Currency::UGX),
            "KES" => Some(Currency::KES),
            "TZS" => Some(Currency::TZS),
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

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Format with the code and grouped digits (e.g., "UGX 125,000").
    ///
    /// ```
    /// use muno_commerce::money::{Money, Currency};
    /// assert_eq!(Money::new(125_000, Currency::UGX).display(), "UGX 125,000");
    /// assert_eq!(Money::new(4_999, Currency::USD).display(), "USD 49.99");
    /// ```
    pub fn display(&self) -> String {
        format!("{} {}", self.currency.code(), self.display_amount())
    }

    /// Format the amount alone with grouped digits (e.g., "125,000").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let magnitude = self.amount.unsigned_abs();
        let sign = if self.amount < 0 { "-" } else { "" };
        let whole = group_thousands(magnitude / divisor);

        if places == 0 {
            format!("{}{}", sign, whole)
        } else {
            let fraction = magnitude % divisor;
            format!("{}{}.{:0width$}", sign, whole, fraction, width = places as usize)
        }
    }

    /// Money from an unsigned whole-unit amount, capped at `i64::MAX`.
    pub fn from_units(amount: u64, currency: Currency) -> Self {
        Self::new(i64::try_from(amount).unwrap_or(i64::MAX), currency)
    }

    /// Sum in this currency, saturating at the numeric bounds.
    pub fn saturating_add(&self, other: Money) -> Money {
        debug_assert_eq!(self.currency, other.currency);
        Money::new(self.amount.saturating_add(other.amount), self.currency)
    }

    /// Difference in this currency, saturating at the numeric bounds.
    pub fn saturating_sub(&self, other: Money) -> Money {
        debug_assert_eq!(self.currency, other.currency);
        Money::new(self.amount.saturating_sub(other.amount), self.currency)
    }

    /// Multiply by a scalar, saturating.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount.saturating_mul(factor), self.currency)
    }

    /// Whole-percent share of this amount, rounded half away from zero.
    pub fn percentage(&self, percent: u32) -> Money {
        let scaled = i128::from(self.amount) * i128::from(percent);
        let rounded = if scaled >= 0 {
            (scaled + 50) / 100
        } else {
            (scaled - 50) / 100
        };
        let clamped = rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX));
        Money::new(clamped as i64, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
