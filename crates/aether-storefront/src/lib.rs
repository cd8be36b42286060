//! Session runtime for the ÆTHER storefront.
//!
//! Wraps the domain types from `aether-commerce` into a per-shopper session:
//!
//! - **Config**: Pricing and redirect settings from TOML or JSON
//! - **Navigation**: Page routes and the [`Navigator`] hook the host implements
//! - **Redirect**: The cancellable timer that leaves the confirmation screen
//! - **Session**: [`StorefrontSession`], owning the cart, checkout and search state
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aether_storefront::prelude::*;
//!
//! let config = StorefrontConfig::load("storefront.toml")?;
//! let catalog = load_catalog("catalog.json")?;
//! let mut session = StorefrontSession::new(config, catalog, Arc::new(NoopNavigator))?;
//!
//! session.add_product(&ProductId::new("1"), "Medium", "Black", 1)?;
//! session.navigate(Route::Checkout);
//! session.continue_checkout()?;
//! session.continue_checkout()?;
//! let confirmation = session.place_order()?; // redirects home after 3s
//! ```

pub mod config;
pub mod error;
pub mod navigation;
pub mod redirect;
pub mod session;

pub use config::{load_catalog, CheckoutConfig, PricingConfig, StorefrontConfig};
pub use error::{ConfigError, StorefrontError};
pub use navigation::{Navigator, NoopNavigator, Route};
pub use redirect::{PendingRedirect, RedirectStatus};
pub use session::StorefrontSession;

/// Prelude for convenient imports.
pub mod prelude {
    pub use aether_commerce::prelude::*;

    pub use crate::config::{load_catalog, StorefrontConfig};
    pub use crate::error::{ConfigError, StorefrontError};
    pub use crate::navigation::{Navigator, NoopNavigator, Route};
    pub use crate::redirect::{PendingRedirect, RedirectStatus};
    pub use crate::session::StorefrontSession;
}
