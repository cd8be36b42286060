//! Order total calculations.

use crate::cart::CartStore;
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Shipping charged at or below the threshold.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Sales tax rate applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// The shipping and tax rules used to compute totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Subtotals strictly greater than this ship free.
    pub free_shipping_threshold: Decimal,
    /// Shipping fee otherwise.
    pub flat_shipping_fee: Decimal,
    /// Tax rate as a fraction (0.08 = 8%).
    pub tax_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            flat_shipping_fee: FLAT_SHIPPING_FEE,
            tax_rate: TAX_RATE,
        }
    }
}

impl PricingPolicy {
    /// Compute totals for a subtotal.
    pub fn totals(&self, subtotal: Money) -> OrderTotals {
        let free_shipping = subtotal.amount > self.free_shipping_threshold;
        let shipping = if free_shipping {
            Money::zero(subtotal.currency)
        } else {
            Money::new(self.flat_shipping_fee, subtotal.currency)
        };
        let tax = subtotal.multiply_decimal(self.tax_rate);

        OrderTotals {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
            free_shipping,
        }
    }

    /// Compute totals for the cart as it is right now.
    pub fn totals_for(&self, cart: &CartStore) -> OrderTotals {
        self.totals(cart.total_price())
    }

    /// How much more has to be spent before shipping is free.
    ///
    /// `None` once the subtotal already qualifies. The subtotal has to
    /// exceed the threshold, so this is the gap to the threshold itself.
    pub fn amount_until_free_shipping(&self, subtotal: Money) -> Option<Money> {
        if subtotal.amount > self.free_shipping_threshold {
            None
        } else {
            Some(Money::new(
                self.free_shipping_threshold - subtotal.amount,
                subtotal.currency,
            ))
        }
    }
}

/// Totals shown in the order summary. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// Tax on the subtotal, unrounded.
    pub tax: Money,
    /// subtotal + shipping + tax.
    pub total: Money,
    /// Whether the order crossed the free-shipping threshold.
    pub free_shipping: bool,
}

impl OrderTotals {
    /// Whether to show the free-shipping banner.
    pub fn qualifies_for_free_shipping(&self) -> bool {
        self.free_shipping
    }

    /// Shipping line as displayed ("FREE" or "$15.00").
    pub fn shipping_label(&self) -> String {
        if self.free_shipping {
            "FREE".to_string()
        } else {
            self.shipping.display()
        }
    }
}
