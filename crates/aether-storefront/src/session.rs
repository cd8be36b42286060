//! A shopper's storefront session.

use std::fmt;
use std::sync::Arc;

use aether_commerce::prelude::*;
use tracing::{debug, info};

use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::navigation::{Navigator, Route};
use crate::redirect::PendingRedirect;

/// Everything one shopper's visit owns: the cart, the checkout in
/// progress, the search overlay and the redirect scheduled after an order.
///
/// The session is not shared between shoppers. The host tells it where the
/// shopper is with [`navigate`](Self::navigate) and is told where to go
/// through its [`Navigator`].
pub struct StorefrontSession {
    config: StorefrontConfig,
    catalog: Vec<Product>,
    cart: CartStore,
    checkout: Option<CheckoutWizard>,
    search: SearchOverlay,
    route: Route,
    navigator: Arc<dyn Navigator>,
    redirect: Option<PendingRedirect>,
}

impl StorefrontSession {
    /// Start a session on the home page with an empty cart.
    pub fn new(
        config: StorefrontConfig,
        catalog: Vec<Product>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, StorefrontError> {
        config.validate()?;
        let cart = CartStore::new(config.pricing.currency);

        info!(
            products = catalog.len(),
            currency = %config.pricing.currency,
            "Storefront session started"
        );

        Ok(Self {
            config,
            catalog,
            cart,
            checkout: None,
            search: SearchOverlay::new(),
            route: Route::Home,
            navigator,
            redirect: None,
        })
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Record that the shopper moved to `route`.
    ///
    /// Any pending redirect is cancelled. Entering the checkout starts a fresh
    /// wizard; leaving it discards the wizard and everything typed into it.
    /// The cart drawer and the search overlay close.
    pub fn navigate(&mut self, route: Route) {
        if let Some(mut redirect) = self.redirect.take() {
            redirect.cancel();
        }

        let entering_checkout = route.is_checkout() && !self.route.is_checkout();
        if entering_checkout {
            self.checkout = Some(
                CheckoutWizard::new(self.config.policy())
                    .with_redirect(self.config.redirect_request()),
            );
        } else if !route.is_checkout() {
            self.checkout = None;
        }

        self.cart.close_cart();
        self.search.close();

        debug!(from = %self.route, to = %route, "Navigated");
        self.route = route;
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.catalog.iter().find(|p| &p.id == id)
    }

    /// Products for the home page grid.
    pub fn featured(&self) -> Vec<&Product> {
        self.catalog.iter().filter(|p| p.featured).collect()
    }

    /// Products for the listing page.
    pub fn listing(&self, filter: &CategoryFilter) -> Vec<&Product> {
        filter.apply(&self.catalog)
    }

    /// Start a variant selection for a catalog product.
    pub fn select(&self, id: &ProductId) -> Result<VariantSelection<'_>, StorefrontError> {
        self.product(id)
            .map(VariantSelection::new)
            .ok_or_else(|| CommerceError::UnknownProduct(id.to_string()).into())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Direct access for drawer controls and subscriptions.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Add a line to the cart.
    ///
    /// Fails if the line is priced in a currency other than the cart's.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), StorefrontError> {
        if item.unit_price.currency != self.cart.currency() {
            return Err(CommerceError::InvalidPrice(format!(
                "{} is priced in {}, the cart uses {}",
                item.name,
                item.unit_price.currency,
                self.cart.currency()
            ))
            .into());
        }
        self.cart.add(item);
        Ok(())
    }

    /// "Add to cart" on a product page.
    pub fn add_selection(&mut self, selection: &VariantSelection<'_>) -> Result<(), StorefrontError> {
        self.add_item(selection.to_cart_item()?)
    }

    /// Add a catalog product by id with the chosen variant.
    pub fn add_product(
        &mut self,
        id: &ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> Result<(), StorefrontError> {
        let product = self
            .product(id)
            .ok_or_else(|| CommerceError::UnknownProduct(id.to_string()))?;
        let item = CartItem::new(product.id.clone(), product.name.clone(), product.price)?
            .with_variant(size, color)
            .with_image(product.image.clone())
            .with_quantity(quantity);
        self.add_item(item)
    }

    pub fn open_cart(&mut self) {
        self.cart.open_cart();
    }

    pub fn close_cart(&mut self) {
        self.cart.close_cart();
    }

    pub fn toggle_cart(&mut self) {
        self.cart.toggle_cart();
    }

    /// Totals for the cart drawer and checkout summary.
    pub fn totals(&self) -> OrderTotals {
        self.config.policy().totals_for(&self.cart)
    }

    // =========================================================================
    // Search
    // =========================================================================

    pub fn search(&self) -> &SearchOverlay {
        &self.search
    }

    pub fn open_search(&mut self) {
        self.search.open();
    }

    pub fn close_search(&mut self) {
        self.search.close();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search.set_query(query);
    }

    /// Suggestions for the current search query.
    pub fn search_suggestions(&self) -> Vec<&Product> {
        self.search.suggestions(&self.catalog)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// The wizard, while the shopper is on the checkout page.
    pub fn checkout(&self) -> Option<&CheckoutWizard> {
        self.checkout.as_ref()
    }

    pub fn checkout_mut(&mut self) -> Option<&mut CheckoutWizard> {
        self.checkout.as_mut()
    }

    /// What the checkout page should render.
    pub fn checkout_view(&self) -> Result<CheckoutView<'_>, StorefrontError> {
        let wizard = self.wizard()?;
        Ok(wizard.view(&self.cart))
    }

    /// "Continue" without validating.
    pub fn continue_checkout(&mut self) -> Result<CheckoutStep, StorefrontError> {
        let wizard = self.checkout.as_mut().ok_or(StorefrontError::NoActiveCheckout)?;
        Ok(wizard.next(&self.cart)?)
    }

    /// "Continue" after validating the current step.
    pub fn try_continue_checkout(&mut self) -> Result<CheckoutStep, StorefrontError> {
        let wizard = self.checkout.as_mut().ok_or(StorefrontError::NoActiveCheckout)?;
        Ok(wizard.try_next(&self.cart)?)
    }

    /// "Back".
    pub fn back_checkout(&mut self) -> Result<CheckoutStep, StorefrontError> {
        let wizard = self.checkout.as_mut().ok_or(StorefrontError::NoActiveCheckout)?;
        Ok(wizard.back(&self.cart)?)
    }

    /// The review page's "Edit" links.
    pub fn edit_checkout(&mut self, step: CheckoutStep) -> Result<CheckoutStep, StorefrontError> {
        let wizard = self.checkout.as_mut().ok_or(StorefrontError::NoActiveCheckout)?;
        Ok(wizard.edit(step, &self.cart)?)
    }

    /// Place the order and schedule the redirect.
    ///
    /// A previously scheduled redirect is replaced, so placing twice
    /// restarts the delay. Must be called inside a Tokio runtime; nothing
    /// is placed otherwise.
    pub fn place_order(&mut self) -> Result<OrderConfirmation, StorefrontError> {
        tokio::runtime::Handle::try_current().map_err(|_| StorefrontError::NotInRuntime)?;
        let wizard = self.checkout.as_mut().ok_or(StorefrontError::NoActiveCheckout)?;
        let confirmation = wizard.place_order(&mut self.cart)?;

        let redirect = PendingRedirect::schedule(&confirmation.redirect, Arc::clone(&self.navigator))?;
        if let Some(mut previous) = self.redirect.replace(redirect) {
            previous.cancel();
        }

        Ok(confirmation)
    }

    /// The redirect scheduled by the last order, if it is still tracked.
    pub fn pending_redirect(&self) -> Option<&PendingRedirect> {
        self.redirect.as_ref()
    }

    pub fn pending_redirect_mut(&mut self) -> Option<&mut PendingRedirect> {
        self.redirect.as_mut()
    }

    fn wizard(&self) -> Result<&CheckoutWizard, StorefrontError> {
        self.checkout.as_ref().ok_or(StorefrontError::NoActiveCheckout)
    }
}

impl fmt::Debug for StorefrontSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorefrontSession")
            .field("route", &self.route)
            .field("cart", &self.cart)
            .field("checkout", &self.checkout)
            .field("search", &self.search)
            .field("redirect", &self.redirect)
            .finish_non_exhaustive()
    }
}
