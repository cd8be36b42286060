//! Storefront domain logic for ÆTHER.
//!
//! Everything here is in-memory and synchronous. The crate provides:
//!
//! - **Catalog**: Products, variant selection, category listing filter
//! - **Cart**: Line items keyed by (product, size, color), the observable cart store
//! - **Checkout**: The shipping → payment → review wizard and order totals
//! - **Search**: Search-as-you-type suggestion filter and overlay state
//!
//! # Example
//!
//! ```rust,ignore
//! use aether_commerce::prelude::*;
//!
//! let mut cart = CartStore::new(Currency::USD);
//! cart.add(CartItem::new(
//!     ProductId::new("1"),
//!     "Premium Leather Bag",
//!     Money::from_major(899, Currency::USD),
//! )?);
//!
//! let mut wizard = CheckoutWizard::new(PricingPolicy::default());
//! wizard.next(&cart)?; // shipping -> payment
//! wizard.next(&cart)?; // payment -> review
//! let confirmation = wizard.place_order(&mut cart)?;
//! println!("Total: {}", confirmation.totals.total);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        parse_catalog, CategoryFilter, Product, ProductOptions, VariantSelection,
    };

    // Cart
    pub use crate::cart::{
        CartEvent, CartItem, CartStore, LineItemKey, OrderTotals, PricingPolicy, SubscriptionId,
    };

    // Checkout
    pub use crate::checkout::{
        CardDetails, CheckoutStep, CheckoutView, CheckoutWizard, OrderConfirmation,
        PaymentMethod, RedirectRequest, RedirectTarget, ShippingDetails, ShippingField, StepStatus,
    };

    // Search
    pub use crate::search::{filter_catalog, SearchOverlay, Searchable};
}
