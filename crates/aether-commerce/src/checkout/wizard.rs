//! Checkout wizard state machine.

use crate::cart::{CartStore, OrderTotals, PricingPolicy};
use crate::checkout::{
    CardDetails, CheckoutStep, OrderConfirmation, PaymentMethod, RedirectRequest,
    ShippingDetails, ShippingField, StepStatus,
};
use crate::ids::OrderId;
use crate::CommerceError;
use tracing::{info, warn};

/// What the checkout page should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckoutView<'a> {
    /// Nothing to check out; only leaving is possible.
    EmptyCart,
    /// The normal flow, on this step.
    InProgress(CheckoutStep),
    /// The order went through.
    Placed(&'a OrderConfirmation),
}

/// Checkout form state and the shipping → payment → review flow.
///
/// The wizard never owns the cart: totals and the empty-cart guard read
/// whatever cart store is passed in, and `place_order` clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutWizard {
    step: CheckoutStep,
    shipping: ShippingDetails,
    payment_method: Option<PaymentMethod>,
    card: CardDetails,
    policy: PricingPolicy,
    redirect: RedirectRequest,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutWizard {
    /// Create a wizard on the shipping step with an empty form.
    pub fn new(policy: PricingPolicy) -> Self {
        Self {
            step: CheckoutStep::Shipping,
            shipping: ShippingDetails::default(),
            payment_method: None,
            card: CardDetails::default(),
            policy,
            redirect: RedirectRequest::default(),
            confirmation: None,
        }
    }

    /// Override where and when to redirect after the order.
    pub fn with_redirect(mut self, redirect: RedirectRequest) -> Self {
        self.redirect = redirect;
        self
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// What to render given the current cart.
    pub fn view(&self, cart: &CartStore) -> CheckoutView<'_> {
        if let Some(confirmation) = &self.confirmation {
            CheckoutView::Placed(confirmation)
        } else if cart.is_empty() {
            CheckoutView::EmptyCart
        } else {
            CheckoutView::InProgress(self.step)
        }
    }

    /// Progress indicator entries.
    pub fn progress(&self) -> Vec<(CheckoutStep, StepStatus)> {
        CheckoutStep::ALL
            .into_iter()
            .map(|s| (s, StepStatus::of(s, self.step)))
            .collect()
    }

    /// Live totals for the order summary.
    pub fn totals(&self, cart: &CartStore) -> OrderTotals {
        self.policy.totals_for(cart)
    }

    /// Pricing rules in effect.
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// "Continue": advance one step without validating the form.
    pub fn next(&mut self, cart: &CartStore) -> Result<CheckoutStep, CommerceError> {
        self.ensure_active(cart)?;

        let next = self.step.next().ok_or_else(|| {
            warn!(step = %self.step, "continue requested on the last step");
            CommerceError::transition(self.step.as_str(), "none")
        })?;

        info!(from = %self.step, to = %next, "checkout advanced");
        self.step = next;
        Ok(next)
    }

    /// Validate the current step, then advance.
    pub fn try_next(&mut self, cart: &CartStore) -> Result<CheckoutStep, CommerceError> {
        self.ensure_active(cart)?;
        self.validate_step(self.step)?;
        self.next(cart)
    }

    /// "Back": return one step. Entered values are kept.
    pub fn back(&mut self, cart: &CartStore) -> Result<CheckoutStep, CommerceError> {
        self.ensure_active(cart)?;

        let prev = self.step.previous().ok_or_else(|| {
            warn!(step = %self.step, "back requested on the first step");
            CommerceError::transition(self.step.as_str(), "none")
        })?;

        info!(from = %self.step, to = %prev, "checkout went back");
        self.step = prev;
        Ok(prev)
    }

    /// Jump back to an earlier step (the review page's "Edit" links).
    pub fn edit(&mut self, step: CheckoutStep, cart: &CartStore) -> Result<CheckoutStep, CommerceError> {
        self.ensure_active(cart)?;

        if step > self.step {
            warn!(from = %self.step, to = %step, "edit cannot skip ahead");
            return Err(CommerceError::transition(self.step.as_str(), step.as_str()));
        }

        self.step = step;
        Ok(step)
    }

    /// Check the fields a step asks for.
    pub fn validate_step(&self, step: CheckoutStep) -> Result<(), CommerceError> {
        let missing = match step {
            CheckoutStep::Shipping => self.shipping.missing_required(),
            CheckoutStep::Payment => match self.payment_method {
                None => vec!["payment method"],
                Some(method) if method.requires_card_details() => self.card.missing_fields(),
                Some(_) => Vec::new(),
            },
            CheckoutStep::Review => {
                let mut missing = self.shipping.missing_required();
                if self.validate_step(CheckoutStep::Payment).is_err() {
                    missing.push("payment details");
                }
                missing
            }
        };

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::CheckoutIncomplete(missing.join(", ")))
        }
    }

    /// Place the order from the review step.
    ///
    /// Captures the totals, clears the cart and returns the confirmation,
    /// which carries the redirect to schedule. Placing again is allowed and
    /// clears and redirects again; with the cart still empty the new
    /// confirmation repeats the previous order's item count and totals.
    pub fn place_order(&mut self, cart: &mut CartStore) -> Result<OrderConfirmation, CommerceError> {
        if self.step != CheckoutStep::Review {
            warn!(step = %self.step, "place order outside review");
            return Err(CommerceError::transition(self.step.as_str(), "placed"));
        }
        if cart.is_empty() && self.confirmation.is_none() {
            return Err(CommerceError::EmptyCart);
        }

        let (item_count, totals) = match &self.confirmation {
            Some(previous) if cart.is_empty() => (previous.item_count, previous.totals),
            _ => (cart.total_items(), self.totals(cart)),
        };

        let confirmation = OrderConfirmation {
            order_id: OrderId::generate(),
            placed_at: chrono::Utc::now(),
            email: self.shipping.email.clone(),
            payment_method: self.payment_method,
            item_count,
            totals,
            redirect: self.redirect.clone(),
        };

        cart.clear();
        info!(
            order_id = %confirmation.order_id,
            total = %confirmation.totals.total,
            "order placed"
        );

        self.confirmation = Some(confirmation.clone());
        Ok(confirmation)
    }

    /// Whether an order has been placed.
    pub fn is_placed(&self) -> bool {
        self.confirmation.is_some()
    }

    /// The last confirmation, if any.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn shipping(&self) -> &ShippingDetails {
        &self.shipping
    }

    pub fn shipping_mut(&mut self) -> &mut ShippingDetails {
        &mut self.shipping
    }

    /// Set one shipping field.
    pub fn set_shipping_field(&mut self, field: ShippingField, value: impl Into<String>) {
        self.shipping.set(field, value);
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    pub fn card(&self) -> &CardDetails {
        &self.card
    }

    pub fn card_mut(&mut self) -> &mut CardDetails {
        &mut self.card
    }

    fn ensure_active(&self, cart: &CartStore) -> Result<(), CommerceError> {
        self.ensure_not_placed()?;
        if cart.is_empty() {
            warn!("checkout transition with an empty cart");
            return Err(CommerceError::EmptyCart);
        }
        Ok(())
    }

    fn ensure_not_placed(&self) -> Result<(), CommerceError> {
        if self.confirmation.is_some() {
            return Err(CommerceError::transition("placed", self.step.as_str()));
        }
        Ok(())
    }
}

impl Default for CheckoutWizard {
    fn default() -> Self {
        Self::new(PricingPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::money::{Currency, Money};

    fn cart_with(items: &[(&str, i64, i64)]) -> CartStore {
        let mut cart = CartStore::new(Currency::USD);
        for (id, price, qty) in items {
            cart.add(
                CartItem::new(*id, format!("Product {}", id), Money::from_major(*price, Currency::USD))
                    .unwrap()
                    .with_quantity(*qty),
            );
        }
        cart
    }

    #[test]
    fn test_wizard_creation() {
        let wizard = CheckoutWizard::default();
        assert_eq!(wizard.step(), CheckoutStep::Shipping);
        assert!(!wizard.is_placed());
    }

    #[test]
    fn test_continue_is_unconditional() {
        let cart = cart_with(&[("1", 50, 1)]);
        let mut wizard = CheckoutWizard::default();

        assert_eq!(wizard.next(&cart).unwrap(), CheckoutStep::Payment);
        assert_eq!(wizard.next(&cart).unwrap(), CheckoutStep::Review);
        assert!(wizard.next(&cart).is_err());
        assert_eq!(wizard.step(), CheckoutStep::Review);
    }

    #[test]
    fn test_back_keeps_values() {
        let cart = cart_with(&[("1", 50, 1)]);
        let mut wizard = CheckoutWizard::default();
        wizard.set_shipping_field(ShippingField::Email, "jane@example.com");
        wizard.next(&cart).unwrap();
        wizard.set_payment_method(PaymentMethod::Klarna);
        wizard.next(&cart).unwrap();

        assert_eq!(wizard.back(&cart).unwrap(), CheckoutStep::Payment);
        assert_eq!(wizard.back(&cart).unwrap(), CheckoutStep::Shipping);
        assert!(wizard.back(&cart).is_err());
        assert_eq!(wizard.shipping().email, "jane@example.com");
        assert_eq!(wizard.payment_method(), Some(PaymentMethod::Klarna));
    }

    #[test]
    fn test_edit_only_goes_backwards() {
        let cart = cart_with(&[("1", 50, 1)]);
        let mut wizard = CheckoutWizard::default();
        assert!(wizard.edit(CheckoutStep::Review, &cart).is_err());

        wizard.next(&cart).unwrap();
        wizard.next(&cart).unwrap();
        assert_eq!(
            wizard.edit(CheckoutStep::Shipping, &cart).unwrap(),
            CheckoutStep::Shipping
        );
        assert!(wizard.edit(CheckoutStep::Payment, &cart).is_err());
    }

    #[test]
    fn test_place_order_only_from_review() {
        let mut cart = cart_with(&[("1", 50, 1)]);
        let mut wizard = CheckoutWizard::default();

        assert!(wizard.place_order(&mut cart).is_err());
        wizard.next(&cart).unwrap();
        assert!(wizard.place_order(&mut cart).is_err());
        assert_eq!(cart.total_items(), 1);

        wizard.next(&cart).unwrap();
        let confirmation = wizard.place_order(&mut cart).unwrap();
        assert!(cart.is_empty());
        assert_eq!(confirmation.item_count, 1);
        assert_eq!(confirmation.totals.subtotal, Money::from_major(50, Currency::USD));
        assert_eq!(confirmation.totals.shipping, Money::from_major(15, Currency::USD));
        assert_eq!(confirmation.redirect, RedirectRequest::default());
    }

    #[test]
    fn test_place_order_twice_is_harmless() {
        let mut cart = cart_with(&[("1", 50, 1)]);
        let mut wizard = CheckoutWizard::default();
        wizard.next(&cart).unwrap();
        wizard.next(&cart).unwrap();

        let first = wizard.place_order(&mut cart).unwrap();
        let second = wizard.place_order(&mut cart).unwrap();
        assert_ne!(first.order_id, second.order_id);
        assert_eq!(second.item_count, 1);
        assert_eq!(second.totals, first.totals);
        assert_eq!(second.totals.total.display(), "$69.00");
        assert!(cart.is_empty());
        assert!(matches!(wizard.view(&cart), CheckoutView::Placed(_)));
    }

    #[test]
    fn test_empty_cart_guard() {
        let cart = CartStore::new(Currency::USD);
        let mut wizard = CheckoutWizard::default();

        assert_eq!(wizard.view(&cart), CheckoutView::EmptyCart);
        assert_eq!(wizard.next(&cart), Err(CommerceError::EmptyCart));
        assert_eq!(wizard.step(), CheckoutStep::Shipping);
    }

    #[test]
    fn test_emptied_cart_blocks_back_and_edit() {
        let mut cart = cart_with(&[("1", 50, 1)]);
        let mut wizard = CheckoutWizard::default();
        wizard.next(&cart).unwrap();
        wizard.next(&cart).unwrap();

        cart.clear();
        assert_eq!(wizard.view(&cart), CheckoutView::EmptyCart);
        assert_eq!(wizard.back(&cart), Err(CommerceError::EmptyCart));
        assert_eq!(
            wizard.edit(CheckoutStep::Shipping, &cart),
            Err(CommerceError::EmptyCart)
        );
        assert_eq!(wizard.step(), CheckoutStep::Review);
    }

    #[test]
    fn test_no_transitions_after_placing() {
        let mut cart = cart_with(&[("1", 50, 1)]);
        let mut wizard = CheckoutWizard::default();
        wizard.next(&cart).unwrap();
        wizard.next(&cart).unwrap();
        wizard.place_order(&mut cart).unwrap();

        cart.add(CartItem::new("2", "Again", Money::from_major(5, Currency::USD)).unwrap());
        assert!(wizard.back(&cart).is_err());
        assert!(wizard.next(&cart).is_err());
    }

    #[test]
    fn test_try_next_validates_shipping() {
        let cart = cart_with(&[("1", 50, 1)]);
        let mut wizard = CheckoutWizard::default();

        let err = wizard.try_next(&cart).unwrap_err();
        assert_eq!(
            err,
            CommerceError::CheckoutIncomplete("email, first name, last name".to_string())
        );
        assert_eq!(wizard.step(), CheckoutStep::Shipping);

        wizard.set_shipping_field(ShippingField::Email, "jane@example.com");
        wizard.set_shipping_field(ShippingField::FirstName, "Jane");
        wizard.set_shipping_field(ShippingField::LastName, "Smith");
        assert_eq!(wizard.try_next(&cart).unwrap(), CheckoutStep::Payment);
    }

    #[test]
    fn test_try_next_validates_payment() {
        let cart = cart_with(&[("1", 50, 1)]);
        let mut wizard = CheckoutWizard::default();
        wizard.next(&cart).unwrap();

        assert!(wizard.try_next(&cart).is_err());

        wizard.set_payment_method(PaymentMethod::Card);
        wizard.card_mut().card_number = "4242424242424242".to_string();
        let err = wizard.try_next(&cart).unwrap_err();
        assert_eq!(
            err,
            CommerceError::CheckoutIncomplete("expiry, cvv, name on card".to_string())
        );

        wizard.set_payment_method(PaymentMethod::ApplePay);
        assert_eq!(wizard.try_next(&cart).unwrap(), CheckoutStep::Review);
    }

    #[test]
    fn test_totals_are_live() {
        let mut cart = cart_with(&[("a", 50, 1), ("b", 100, 2)]);
        let wizard = CheckoutWizard::default();

        assert_eq!(cart.total_items(), 3);
        let totals = wizard.totals(&cart);
        assert_eq!(totals.subtotal, Money::from_major(250, Currency::USD));
        assert!(totals.shipping.is_zero());
        assert_eq!(totals.tax, Money::from_major(20, Currency::USD));
        assert_eq!(totals.total, Money::from_major(270, Currency::USD));

        cart.update_quantity(&"b".into(), 1);
        assert_eq!(wizard.totals(&cart).shipping, Money::from_major(15, Currency::USD));
    }

    #[test]
    fn test_progress_indicator() {
        let cart = cart_with(&[("1", 50, 1)]);
        let mut wizard = CheckoutWizard::default();
        wizard.next(&cart).unwrap();

        let progress = wizard.progress();
        assert_eq!(
            progress,
            vec![
                (CheckoutStep::Shipping, StepStatus::Completed),
                (CheckoutStep::Payment, StepStatus::Active),
                (CheckoutStep::Review, StepStatus::Upcoming),
            ]
        );
    }
}
