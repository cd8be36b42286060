//! The session cart store.

use crate::cart::{CartItem, LineItemKey};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// A change applied to the cart, delivered to subscribers after the fact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// A line was appended or merged into an existing line.
    ItemAdded { key: LineItemKey, quantity: i64 },
    /// A line's quantity was set.
    QuantityUpdated { key: LineItemKey, quantity: i64 },
    /// Lines were removed.
    ItemsRemoved { keys: Vec<LineItemKey> },
    /// The cart was emptied.
    Cleared,
    /// The drawer was opened.
    DrawerOpened,
    /// The drawer was closed.
    DrawerClosed,
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartEvent, &CartStore)>;

/// Cart line items plus the drawer flag.
///
/// Owned by the session and lent to whoever renders or mutates it. All
/// operations are total: unknown products are no-ops and non-positive
/// quantities never end up in the cart.
pub struct CartStore {
    items: Vec<CartItem>,
    is_open: bool,
    currency: Currency,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// Create an empty, closed cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            is_open: false,
            currency,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Add an item.
    ///
    /// If a line with the same (product, size, color) exists its quantity is
    /// increased, otherwise the item is appended. Items with a non-positive
    /// quantity, or priced in another currency, are ignored.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity <= 0 {
            debug!(key = %item.key, quantity = item.quantity, "ignoring non-positive add");
            return;
        }
        if item.unit_price.currency != self.currency {
            warn!(
                key = %item.key,
                currency = %item.unit_price.currency,
                cart_currency = %self.currency,
                "ignoring item priced in another currency"
            );
            return;
        }

        let (key, quantity) =
            if let Some(existing) = self.items.iter_mut().find(|i| i.key == item.key) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                (existing.key.clone(), existing.quantity)
            } else {
                let entry = (item.key.clone(), item.quantity);
                self.items.push(item);
                entry
            };

        debug!(key = %key, quantity, "cart item added");
        self.notify(CartEvent::ItemAdded { key, quantity });
    }

    /// Remove every line for a product, whatever its size or color.
    ///
    /// Returns the number of lines removed.
    pub fn remove(&mut self, product_id: &ProductId) -> usize {
        self.remove_where(|item| item.product_id() == product_id)
    }

    /// Remove exactly one line.
    pub fn remove_line(&mut self, key: &LineItemKey) -> bool {
        self.remove_where(|item| &item.key == key) > 0
    }

    /// Set the quantity of every line for a product.
    ///
    /// A quantity of zero or less removes those lines instead. Returns the
    /// number of lines affected.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> usize {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        self.set_quantity_where(|item| item.product_id() == product_id, quantity)
    }

    /// Set the quantity of exactly one line; zero or less removes it.
    pub fn update_line_quantity(&mut self, key: &LineItemKey, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_line(key);
        }
        self.set_quantity_where(|item| &item.key == key, quantity) > 0
    }

    /// One more of a line (the drawer's `+` button).
    pub fn increment(&mut self, key: &LineItemKey) -> bool {
        match self.get(key) {
            Some(item) => {
                let quantity = item.quantity.saturating_add(1);
                self.update_line_quantity(key, quantity)
            }
            None => false,
        }
    }

    /// One less of a line; reaching zero removes it.
    pub fn decrement(&mut self, key: &LineItemKey) -> bool {
        match self.get(key) {
            Some(item) => {
                let quantity = item.quantity - 1;
                self.update_line_quantity(key, quantity)
            }
            None => false,
        }
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("cart cleared");
        self.notify(CartEvent::Cleared);
    }

    /// Open the drawer.
    pub fn open_cart(&mut self) {
        if !self.is_open {
            self.is_open = true;
            self.notify(CartEvent::DrawerOpened);
        }
    }

    /// Close the drawer.
    pub fn close_cart(&mut self) {
        if self.is_open {
            self.is_open = false;
            self.notify(CartEvent::DrawerClosed);
        }
    }

    /// Flip the drawer.
    pub fn toggle_cart(&mut self) {
        if self.is_open {
            self.close_cart();
        } else {
            self.open_cart();
        }
    }

    /// Whether the drawer is showing.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Lines in display (insertion) order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line.
    pub fn get(&self, key: &LineItemKey) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.key == key)
    }

    /// Sum of quantities, saturating at `i64::MAX`.
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of quantity × unit price, saturating at the largest amount.
    pub fn total_price(&self) -> Money {
        let zero = Money::zero(self.currency);
        let lines: Vec<Money> = self.items.iter().map(CartItem::line_total).collect();
        // `add` only admits lines in the cart's currency.
        Money::try_sum(lines.iter(), self.currency).unwrap_or(zero)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Register a callback run after every change.
    ///
    /// The callback sees the event and the store in its new state.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent, &CartStore) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a callback. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < len_before
    }

    fn remove_where(&mut self, predicate: impl Fn(&CartItem) -> bool) -> usize {
        let mut removed = Vec::new();
        self.items.retain(|item| {
            if predicate(item) {
                removed.push(item.key.clone());
                false
            } else {
                true
            }
        });

        let count = removed.len();
        if count > 0 {
            debug!(lines = count, "cart items removed");
            self.notify(CartEvent::ItemsRemoved { keys: removed });
        }
        count
    }

    fn set_quantity_where(&mut self, predicate: impl Fn(&CartItem) -> bool, quantity: i64) -> usize {
        let mut updated = Vec::new();
        for item in self.items.iter_mut().filter(|i| predicate(i)) {
            item.quantity = quantity;
            updated.push(item.key.clone());
        }

        let count = updated.len();
        for key in updated {
            debug!(key = %key, quantity, "cart quantity updated");
            self.notify(CartEvent::QuantityUpdated { key, quantity });
        }
        count
    }

    fn notify(&mut self, event: CartEvent) {
        // Listeners only get `&CartStore`, so none can be added mid-dispatch.
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener(&event, self);
        }
        self.listeners = listeners;
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("is_open", &self.is_open)
            .field("currency", &self.currency)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn usd(units: i64) -> Money {
        Money::from_major(units, Currency::USD)
    }

    fn item(id: &str, price: i64, size: &str, color: &str, quantity: i64) -> CartItem {
        CartItem::new(id, format!("Product {}", id), usd(price))
            .unwrap()
            .with_variant(size, color)
            .with_quantity(quantity)
    }

    #[test]
    fn test_cart_starts_empty_and_closed() {
        let cart = CartStore::new(Currency::USD);
        assert!(cart.is_empty());
        assert!(!cart.is_open());
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_add_same_key_merges() {
        let mut cart = CartStore::default();
        cart.add(item("1", 899, "Medium", "Black", 1));
        cart.add(item("1", 899, "Medium", "Black", 2));
        cart.add(item("1", 899, "Medium", "Black", 4));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 7);
        assert_eq!(cart.total_items(), 7);
    }

    #[test]
    fn test_add_different_variant_appends_in_order() {
        let mut cart = CartStore::default();
        cart.add(item("1", 899, "Medium", "Black", 1));
        cart.add(item("1", 899, "Large", "Black", 1));
        cart.add(item("2", 1299, "", "", 1));

        let keys: Vec<String> = cart.items().iter().map(|i| i.key.to_string()).collect();
        assert_eq!(keys, vec!["1:Medium:Black", "1:Large:Black", "2::"]);
    }

    #[test]
    fn test_add_non_positive_is_ignored() {
        let mut cart = CartStore::default();
        cart.add(item("1", 10, "", "", 0));
        cart.add(item("1", 10, "", "", -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_other_currency_is_ignored() {
        let mut cart = CartStore::new(Currency::USD);
        let euro = CartItem::new("9", "Scarf", Money::from_major(40, Currency::EUR)).unwrap();
        cart.add(euro);
        assert!(cart.is_empty());
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_remove_by_product_drops_every_variant() {
        let mut cart = CartStore::default();
        cart.add(item("1", 899, "Medium", "Black", 1));
        cart.add(item("1", 899, "Large", "Navy", 1));
        cart.add(item("2", 1299, "", "", 1));

        assert_eq!(cart.remove(&ProductId::new("1")), 2);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.remove(&ProductId::new("missing")), 0);
    }

    #[test]
    fn test_remove_line_is_scoped_to_key() {
        let mut cart = CartStore::default();
        cart.add(item("1", 899, "Medium", "Black", 1));
        cart.add(item("1", 899, "Large", "Navy", 1));

        assert!(cart.remove_line(&LineItemKey::new("1", "Large", "Navy")));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].key.size, "Medium");
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = CartStore::default();
        cart.add(item("1", 50, "", "", 1));
        assert_eq!(cart.update_quantity(&ProductId::new("1"), 5), 1);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = CartStore::default();
        cart.add(item("1", 50, "", "", 2));
        cart.add(item("2", 100, "", "", 2));

        cart.update_quantity(&ProductId::new("1"), 0);
        cart.update_quantity(&ProductId::new("2"), -4);
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut cart = CartStore::default();
        cart.add(item("1", 50, "", "", 2));
        assert_eq!(cart.update_quantity(&ProductId::new("9"), 3), 0);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = CartStore::default();
        let key = LineItemKey::new("1", "Small", "Cognac");
        cart.add(item("1", 899, "Small", "Cognac", 1));

        assert!(cart.increment(&key));
        assert_eq!(cart.get(&key).map(|i| i.quantity), Some(2));
        assert!(cart.decrement(&key));
        assert!(cart.decrement(&key));
        assert!(cart.get(&key).is_none());
        assert!(!cart.decrement(&key));
    }

    #[test]
    fn test_total_price_tracks_mutations() {
        let mut cart = CartStore::default();
        cart.add(item("1", 50, "", "", 1));
        cart.add(item("2", 100, "", "", 2));
        assert_eq!(cart.total_price(), usd(250));

        cart.update_quantity(&ProductId::new("2"), 1);
        assert_eq!(cart.total_price(), usd(150));

        cart.remove(&ProductId::new("1"));
        assert_eq!(cart.total_price(), usd(100));

        let expected = cart.items()[0].line_total();
        assert_eq!(cart.total_price(), expected);
    }

    #[test]
    fn test_totals_saturate_on_huge_quantities() {
        let mut cart = CartStore::default();
        cart.add(item("1", 899, "M", "Black", i64::MAX));
        cart.add(item("2", 50, "", "", 1));

        assert_eq!(cart.total_items(), i64::MAX);
        let expected = rust_decimal::Decimal::from(i64::MAX) * rust_decimal::Decimal::from(899)
            + rust_decimal::Decimal::from(50);
        assert_eq!(cart.total_price().amount, expected);
        assert!(cart.increment(&LineItemKey::new("1", "M", "Black")));
        assert_eq!(cart.total_items(), i64::MAX);
    }

    #[test]
    fn test_clear() {
        let mut cart = CartStore::default();
        cart.add(item("1", 50, "", "", 1));
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_drawer_flag() {
        let mut cart = CartStore::default();
        cart.open_cart();
        assert!(cart.is_open());
        cart.toggle_cart();
        assert!(!cart.is_open());
        cart.close_cart();
        assert!(!cart.is_open());
    }

    #[test]
    fn test_subscribers_see_new_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut cart = CartStore::default();

        let sink = Rc::clone(&seen);
        let id = cart.subscribe(move |event, store| {
            sink.borrow_mut().push((event.clone(), store.total_items()));
        });

        cart.add(item("1", 50, "", "", 2));
        cart.open_cart();
        cart.open_cart(); // already open, no event
        cart.update_quantity(&ProductId::new("1"), 0);

        assert!(cart.unsubscribe(id));
        cart.clear();
        assert!(!cart.unsubscribe(id));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(
            seen[0],
            (
                CartEvent::ItemAdded {
                    key: LineItemKey::new("1", "", ""),
                    quantity: 2
                },
                2
            )
        );
        assert_eq!(seen[1].0, CartEvent::DrawerOpened);
        assert_eq!(
            seen[2],
            (
                CartEvent::ItemsRemoved {
                    keys: vec![LineItemKey::new("1", "", "")]
                },
                0
            )
        );
    }
}
