//! Money type for representing monetary values.
//!
//! Amounts are `rust_decimal::Decimal` in the currency's major unit, so
//! `199.99 × 0.08` is exactly `15.9992` and rounding only happens when a
//! value is displayed.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
        }
    }

    /// Number of decimal places shown for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
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
    /// Amount in the currency's major unit (dollars, not cents).
    pub amount: Decimal,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a whole-unit amount, e.g. `Money::from_major(899, USD)` is $899.00.
    pub fn from_major(units: i64, currency: Currency) -> Self {
        Self::new(Decimal::from(units), currency)
    }

    /// Create an amount from minor units (cents).
    ///
    /// ```
    /// use aether_commerce::money::{Money, Currency};
    /// let price = Money::from_cents(19999, Currency::USD);
    /// assert_eq!(price.display(), "$199.99");
    /// ```
    pub fn from_cents(cents: i64, currency: Currency) -> Self {
        Self::new(Decimal::new(cents, currency.decimal_places()), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Round to the currency's display precision (half away from zero).
    pub fn rounded(&self) -> Money {
        Money::new(
            self.amount.round_dp_with_strategy(
                self.currency.decimal_places(),
                RoundingStrategy::MidpointAwayFromZero,
            ),
            self.currency,
        )
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.rounded().amount)
    }

    /// Try to add another Money value, returning None if currencies don't match.
    ///
    /// Saturates at the largest representable amount.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(self.amount.saturating_add(other.amount), self.currency))
    }

    /// Multiply by a quantity, saturating on overflow.
    pub fn multiply(&self, quantity: i64) -> Money {
        Money::new(self.amount.saturating_mul(Decimal::from(quantity)), self.currency)
    }

    /// Multiply by a decimal factor (e.g. a tax rate). No rounding; saturates
    /// on overflow.
    pub fn multiply_decimal(&self, factor: Decimal) -> Money {
        Money::new(self.amount.saturating_mul(factor), self.currency)
    }

    /// Sum values in `currency`.
    ///
    /// Returns None on a currency mismatch.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

/// Saturates at the largest representable amount.
///
/// # Panics
/// Panics if currencies don't match. Use `try_add` for fallible addition.
impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        assert_eq!(self.currency, other.currency, "Currency mismatch in addition");
        Money::new(self.amount.saturating_add(other.amount), self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
