//! Observable in-memory shopping cart.
//!
//! A [`CartStore`] is constructed explicitly by whoever owns the cart session
//! and handed to the views that need it. Views register listeners with
//! [`CartStore::subscribe`] and are called synchronously after every change.
//!
//! The store is a convenience container rather than a ledger: malformed input
//! (non-positive quantities, products the catalog does not list, unknown line
//! IDs) is ignored instead of being reported as an error. Ignored calls leave
//! the state untouched and do not notify listeners.
//!
//! ```
//! use std::sync::Arc;
//! use pehenava_core::{Catalog, CartStore};
//!
//! let catalog = Arc::new(Catalog::from_json(
//!     r#"[{"id": 1, "name": "Kurta", "price": 500, "category": "Casual Wear", "image": "k.jpg"}]"#,
//! ).unwrap());
//! let kurta = catalog.products()[0].clone();
//!
//! let mut cart = CartStore::new(Arc::clone(&catalog));
//! cart.add_item(&kurta, 2);
//! assert_eq!(cart.total().to_string(), "1000");
//! ```

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::{Price, ProductId};

/// One product in the cart with its quantity (always at least 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// What changed in the cart, delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// `quantity` units were actually added; the line may have existed before.
    Added { product_id: ProductId, quantity: u32 },
    /// A line's quantity was set to a new value.
    QuantityChanged { product_id: ProductId, quantity: u32 },
    /// A line was deleted.
    Removed { product_id: ProductId },
    /// Every line was deleted.
    Cleared,
}

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartEvent, &[CartLine])>;

/// The shopping cart.
pub struct CartStore {
    catalog: Arc<Catalog>,
    lines: Vec<CartLine>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// Create an empty cart over the given catalog.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            lines: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing line if the product is already in the cart,
    /// otherwise appends a new line. Non-positive quantities and products
    /// missing from the catalog are ignored.
    pub fn add_item(&mut self, product: &Product, quantity: i64) {
        let Some(quantity) = positive_quantity(quantity) else {
            return;
        };
        if !self.catalog.contains(product.id) {
            return;
        }

        let added = match self.line_mut(product.id) {
            Some(line) => {
                let before = line.quantity;
                line.quantity = before.saturating_add(quantity);
                line.quantity - before
            }
            None => {
                self.lines.push(CartLine {
                    product_id: product.id,
                    quantity,
                });
                quantity
            }
        };

        // A line already at the ceiling doesn't change
        if added == 0 {
            return;
        }

        self.notify(CartEvent::Added {
            product_id: product.id,
            quantity: added,
        });
    }

    /// Add a single unit of `product`.
    pub fn add_one(&mut self, product: &Product) {
        self.add_item(product, 1);
    }

    /// Delete the line for `product_id`. Absent IDs are ignored.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        if self.lines.len() != before {
            self.notify(CartEvent::Removed { product_id });
        }
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Absent IDs are ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX).max(1);

        let Some(line) = self.line_mut(product_id) else {
            return;
        };
        if line.quantity == quantity {
            return;
        }
        line.quantity = quantity;

        self.notify(CartEvent::QuantityChanged {
            product_id,
            quantity,
        });
    }

    /// Delete every line.
    pub fn clear(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        self.lines.clear();
        self.notify(CartEvent::Cleared);
    }

    /// Sum of `price * quantity` over all lines, using current catalog prices.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines()
            .try_fold(Decimal::ZERO, |total, (line, product)| {
                product
                    .price
                    .checked_mul(Decimal::from(line.quantity))
                    .and_then(|subtotal| total.checked_add(subtotal))
            })
            .unwrap_or(Decimal::MAX)
    }

    /// [`Self::total`] with its currency, for display.
    #[must_use]
    pub fn total_price(&self) -> Price {
        Price::inr(self.total())
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    /// Lines paired with their catalog product, in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = (&CartLine, &Product)> + '_ {
        self.lines
            .iter()
            .filter_map(|line| self.catalog.get(line.product_id).map(|p| (line, p)))
    }

    /// Quantity of a single product, or 0 if it is not in the cart.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// Total number of units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Register a listener called after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent, &[CartLine]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }

    fn notify(&mut self, event: CartEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event, &self.lines);
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

/// Parse the raw text of a quantity input field.
///
/// Returns `None` for text that is not an integer; callers treat that as a
/// no-op, the same as any other malformed quantity.
#[must_use]
pub fn parse_quantity(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

fn positive_quantity(quantity: i64) -> Option<u32> {
    u32::try_from(quantity).ok().filter(|q| *q > 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::from_json(
                r#"[
                    {"id": 101, "name": "Banarasi Lehenga", "price": 500, "category": "Bridal Wear", "image": "a.jpg"},
                    {"id": 102, "name": "Ivory Sherwani", "price": 1200, "category": "Wedding Wear", "image": "b.jpg"},
                    {"id": 103, "name": "Cotton Kurti", "price": 349.5, "category": "Casual Wear", "image": "c.jpg"}
                ]"#,
            )
            .unwrap(),
        )
    }

    fn product(catalog: &Catalog, id: i32) -> Product {
        catalog.get(ProductId::new(id)).unwrap().clone()
    }

    fn recorder(cart: &mut CartStore) -> (SubscriptionId, Rc<RefCell<Vec<CartEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let id = cart.subscribe(move |event, _| sink.borrow_mut().push(*event));
        (id, events)
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        let cart = CartStore::new(catalog());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_total_multiplies_price_by_quantity() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        cart.add_item(&product(&catalog, 101), 2);
        assert_eq!(cart.total(), Decimal::from(1000));
        assert_eq!(cart.total_price().display(), "₹1000");
    }

    #[test]
    fn test_total_handles_fractional_prices() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        cart.add_item(&product(&catalog, 103), 3);
        cart.add_one(&product(&catalog, 102));
        assert_eq!(cart.total(), Decimal::new(22_485, 1));
    }

    #[test]
    fn test_add_existing_product_accumulates() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        let lehenga = product(&catalog, 101);
        cart.add_one(&lehenga);
        cart.add_item(&lehenga, 4);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(lehenga.id), 5);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        cart.add_one(&product(&catalog, 103));
        cart.add_one(&product(&catalog, 101));
        cart.add_one(&product(&catalog, 103));
        let ids: Vec<i32> = cart.items().iter().map(|l| l.product_id.as_i32()).collect();
        assert_eq!(ids, vec![103, 101]);

        let names: Vec<&str> = cart.lines().map(|(_, p)| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cotton Kurti", "Banarasi Lehenga"]);
    }

    #[test]
    fn test_add_ignores_non_positive_quantity() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        let (_, events) = recorder(&mut cart);
        cart.add_item(&product(&catalog, 101), 0);
        cart.add_item(&product(&catalog, 101), -3);
        assert!(cart.is_empty());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_add_ignores_products_outside_catalog() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        let mut stray = product(&catalog, 101);
        stray.id = ProductId::new(999);
        cart.add_one(&stray);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        cart.add_item(&product(&catalog, 102), 2);
        let before = cart.items().to_vec();
        let (_, events) = recorder(&mut cart);

        cart.remove_item(ProductId::new(555));
        cart.remove_item(ProductId::new(555));

        assert_eq!(cart.items(), before.as_slice());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_update_to_zero_matches_remove() {
        let catalog = catalog();
        let mut updated = CartStore::new(Arc::clone(&catalog));
        let mut removed = CartStore::new(Arc::clone(&catalog));
        for cart in [&mut updated, &mut removed] {
            cart.add_item(&product(&catalog, 101), 2);
            cart.add_item(&product(&catalog, 102), 1);
        }

        updated.update_quantity(ProductId::new(101), 0);
        removed.remove_item(ProductId::new(101));

        assert_eq!(updated.items(), removed.items());
    }

    #[test]
    fn test_update_negative_removes_line() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        cart.add_item(&product(&catalog, 101), 2);
        cart.update_quantity(ProductId::new(101), -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_sets_quantity() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        cart.add_item(&product(&catalog, 102), 2);
        cart.update_quantity(ProductId::new(102), 7);
        assert_eq!(cart.quantity_of(ProductId::new(102)), 7);
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_update_absent_is_noop() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        cart.update_quantity(ProductId::new(101), 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_saturates_huge_quantities() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        cart.add_one(&product(&catalog, 101));
        cart.update_quantity(ProductId::new(101), i64::MAX);
        assert_eq!(cart.quantity_of(ProductId::new(101)), u32::MAX);
    }

    fn priced(id: i32, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            price,
            category: "Bridal Wear".to_string(),
            image: "x.jpg".to_string(),
        }
    }

    #[test]
    fn test_total_saturates_when_line_overflows() {
        let lehenga = priced(1, Decimal::from_i128_with_scale(10_i128.pow(20), 0));
        let catalog = Arc::new(Catalog::new(vec![lehenga.clone()]).unwrap());
        let mut cart = CartStore::new(catalog);
        cart.add_one(&lehenga);
        cart.update_quantity(lehenga.id, i64::MAX);

        assert_eq!(cart.total(), Decimal::MAX);
    }

    #[test]
    fn test_total_saturates_when_sum_overflows() {
        let first = priced(1, Decimal::MAX);
        let second = priced(2, Decimal::MAX);
        let catalog = Arc::new(Catalog::new(vec![first.clone(), second.clone()]).unwrap());
        let mut cart = CartStore::new(catalog);
        cart.add_one(&first);
        cart.add_one(&second);

        assert_eq!(cart.total(), Decimal::MAX);
    }

    #[test]
    fn test_add_at_ceiling_does_not_notify() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        let lehenga = product(&catalog, 101);
        cart.add_one(&lehenga);
        cart.update_quantity(lehenga.id, i64::MAX);
        let (_, events) = recorder(&mut cart);

        cart.add_item(&lehenga, 5);

        assert_eq!(cart.quantity_of(lehenga.id), u32::MAX);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_add_near_ceiling_reports_units_added() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        let lehenga = product(&catalog, 101);
        cart.add_one(&lehenga);
        cart.update_quantity(lehenga.id, i64::from(u32::MAX - 2));
        let (_, events) = recorder(&mut cart);

        cart.add_item(&lehenga, 10);

        assert_eq!(
            *events.borrow(),
            vec![CartEvent::Added {
                product_id: lehenga.id,
                quantity: 2
            }]
        );
    }

    #[test]
    fn test_listeners_see_each_change() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        let (_, events) = recorder(&mut cart);

        cart.add_item(&product(&catalog, 101), 2);
        cart.update_quantity(ProductId::new(101), 3);
        cart.update_quantity(ProductId::new(101), 3);
        cart.remove_item(ProductId::new(101));
        cart.clear();

        let id = ProductId::new(101);
        assert_eq!(
            *events.borrow(),
            vec![
                CartEvent::Added {
                    product_id: id,
                    quantity: 2
                },
                CartEvent::QuantityChanged {
                    product_id: id,
                    quantity: 3
                },
                CartEvent::Removed { product_id: id },
            ]
        );
    }

    #[test]
    fn test_listener_receives_current_lines() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        let seen = Rc::new(RefCell::new(0_u32));
        let sink = Rc::clone(&seen);
        cart.subscribe(move |_, lines| {
            *sink.borrow_mut() = lines.iter().map(|l| l.quantity).sum();
        });

        cart.add_item(&product(&catalog, 101), 2);
        cart.add_item(&product(&catalog, 102), 3);
        assert_eq!(*seen.borrow(), 5);
    }

    #[test]
    fn test_unsubscribed_listener_is_silent() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        let (first, first_events) = recorder(&mut cart);
        let (_, second_events) = recorder(&mut cart);

        assert!(cart.unsubscribe(first));
        assert!(!cart.unsubscribe(first));
        cart.add_one(&product(&catalog, 101));

        assert!(first_events.borrow().is_empty());
        assert_eq!(second_events.borrow().len(), 1);
    }

    #[test]
    fn test_clear_notifies_once() {
        let catalog = catalog();
        let mut cart = CartStore::new(Arc::clone(&catalog));
        cart.add_one(&product(&catalog, 101));
        cart.add_one(&product(&catalog, 102));
        let (_, events) = recorder(&mut cart);

        cart.clear();
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(*events.borrow(), vec![CartEvent::Cleared]);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), Some(3));
        assert_eq!(parse_quantity(" -2 "), Some(-2));
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("two"), None);
    }

    proptest! {
        /// Adding the same product repeatedly sums the quantities, in any order.
        #[test]
        fn add_item_accumulates(quantities in prop::collection::vec(1i64..1_000, 1..20)) {
            let catalog = catalog();
            let lehenga = product(&catalog, 101);

            let mut forward = CartStore::new(Arc::clone(&catalog));
            for q in &quantities {
                forward.add_item(&lehenga, *q);
            }
            let mut reversed = CartStore::new(Arc::clone(&catalog));
            for q in quantities.iter().rev() {
                reversed.add_item(&lehenga, *q);
            }

            let expected: i64 = quantities.iter().sum();
            prop_assert_eq!(i64::from(forward.quantity_of(lehenga.id)), expected);
            prop_assert_eq!(forward.items(), reversed.items());
            prop_assert_eq!(forward.total(), Decimal::from(500 * expected));
        }

        /// Removing an absent product never changes the cart.
        #[test]
        fn remove_absent_is_idempotent(missing in 200i32..10_000, qty in 1i64..50) {
            let catalog = catalog();
            let mut cart = CartStore::new(Arc::clone(&catalog));
            cart.add_item(&product(&catalog, 102), qty);
            let before = cart.items().to_vec();
            cart.remove_item(ProductId::new(missing));
            prop_assert_eq!(cart.items(), before.as_slice());
        }
    }
}
