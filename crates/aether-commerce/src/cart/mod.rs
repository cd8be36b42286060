//! Shopping cart module.
//!
//! Contains line items, the observable cart store and order totals.

mod item;
mod store;
mod pricing;

pub use item::{CartItem, LineItemKey};
pub use store::{CartEvent, CartStore, SubscriptionId};
pub use pricing::{OrderTotals, PricingPolicy, FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD, TAX_RATE};
