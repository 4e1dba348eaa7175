use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::errors::CartError;
use super::menu::MenuItem;
use super::pricing::{self, PricingResult};
use super::promo::PromoRegistry;

/// A selected modifier option, e.g. "Size" -> { "Large", +1.50 }.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierChoice {
    pub name: String,
    pub price_delta: BigDecimal,
}

/// One line of the cart: a menu item, its quantity, and the modifier
/// selection made when it was added.
///
/// `name` and `unit_price` are copied from the menu at add-time and never
/// re-fetched; a price change while the item sits in the cart does not
/// affect the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
    pub modifiers: BTreeMap<String, ModifierChoice>,
}

impl CartItem {
    /// Builds a cart line from a menu item, applying the add-time copy
    /// semantics: the unit price is the item's discount price when one
    /// exists, else its base price.
    pub fn from_menu(
        item: &MenuItem,
        modifiers: BTreeMap<String, ModifierChoice>,
        quantity: i32,
    ) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.effective_price().clone(),
            quantity,
            modifiers,
        }
    }

    /// Unit price including the selected modifier deltas.
    pub fn effective_unit_price(&self) -> BigDecimal {
        self.modifiers
            .values()
            .fold(self.unit_price.clone(), |acc, m| acc + &m.price_delta)
    }

    /// `(unit_price + modifier deltas) × quantity`, exact.
    pub fn line_subtotal(&self) -> BigDecimal {
        self.effective_unit_price() * BigDecimal::from(self.quantity)
    }
}

/// Partial update for an existing cart line.
#[derive(Debug, Clone, Default)]
pub struct CartItemPatch {
    pub quantity: Option<i32>,
    pub modifiers: Option<BTreeMap<String, ModifierChoice>>,
}

/// The cart store: the single source of truth for what the diner intends
/// to order.
///
/// Lines are kept in insertion order (which is display order) and merged by
/// item id. Every stored line has `quantity >= 1`; a line whose quantity
/// drops to zero is removed, never stored. All mutation goes through the
/// methods here; the struct is purely in-memory and synchronous.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// An owned copy of the current lines, for use as a submission snapshot.
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    /// Adds `quantity_delta` of `item` to the cart. This single operation
    /// serves both "add to cart" (positive delta) and "decrement" (negative
    /// delta) call sites.
    ///
    /// If a line with the same id exists, its quantity is incremented by the
    /// delta and clamped at zero; a result of zero removes the line. The
    /// incoming modifier selection replaces the stored one on merge. A new
    /// line is appended only when `quantity_delta > 0`.
    pub fn add_item(&mut self, item: CartItem, quantity_delta: i32) {
        if let Some(pos) = self.items.iter().position(|l| l.id == item.id) {
            let line = &mut self.items[pos];
            line.quantity = (line.quantity + quantity_delta).max(0);
            line.modifiers = item.modifiers;
            if line.quantity == 0 {
                self.items.remove(pos);
            }
        } else if quantity_delta > 0 {
            self.items.push(CartItem {
                quantity: quantity_delta,
                ..item
            });
        }
    }

    /// Replaces quantity and/or modifiers of an existing line. A patched
    /// quantity of zero or less removes the line.
    pub fn update_item(&mut self, id: &str, patch: CartItemPatch) -> Result<(), CartError> {
        let pos = self
            .items
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| CartError::LineNotFound(id.to_string()))?;

        if let Some(modifiers) = patch.modifiers {
            self.items[pos].modifiers = modifiers;
        }
        if let Some(quantity) = patch.quantity {
            if quantity <= 0 {
                self.items.remove(pos);
            } else {
                self.items[pos].quantity = quantity;
            }
        }
        Ok(())
    }

    /// Deletes the line unconditionally. Absent ids are a no-op.
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|l| l.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Computes totals fresh from the current lines. Never cached; stale
    /// totals across mutations cannot occur.
    pub fn totals(&self, promo_code: Option<&str>, promos: &PromoRegistry) -> PricingResult {
        pricing::compute_totals(&self.items, promo_code, promos)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn item(id: &str, name: &str, price: &str) -> CartItem {
        CartItem {
            id: id.to_string(),
            name: name.to_string(),
            unit_price: BigDecimal::from_str(price).expect("valid decimal"),
            quantity: 1,
            modifiers: BTreeMap::new(),
        }
    }

    fn modifier(name: &str, delta: &str) -> ModifierChoice {
        ModifierChoice {
            name: name.to_string(),
            price_delta: BigDecimal::from_str(delta).expect("valid decimal"),
        }
    }

    #[test]
    fn add_item_appends_new_line() {
        let mut cart = Cart::new();
        cart.add_item(item("m1", "Margherita", "12.50"), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn add_item_merges_by_id() {
        let mut cart = Cart::new();
        cart.add_item(item("m1", "Margherita", "12.50"), 1);
        cart.add_item(item("m1", "Margherita", "12.50"), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn negative_delta_decrements_and_removes_at_zero() {
        let mut cart = Cart::new();
        cart.add_item(item("m1", "Margherita", "12.50"), 2);
        cart.add_item(item("m1", "Margherita", "12.50"), -1);
        assert_eq!(cart.items()[0].quantity, 1);

        cart.add_item(item("m1", "Margherita", "12.50"), -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn underflow_clamps_instead_of_going_negative() {
        let mut cart = Cart::new();
        cart.add_item(item("m1", "Margherita", "12.50"), 1);
        cart.add_item(item("m1", "Margherita", "12.50"), -5);

        assert!(cart.is_empty());
    }

    #[test]
    fn negative_delta_for_absent_item_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(item("m1", "Margherita", "12.50"), -1);

        assert!(cart.is_empty());
    }

    #[test]
    fn every_stored_line_has_quantity_at_least_one() {
        let mut cart = Cart::new();
        cart.add_item(item("m1", "Margherita", "12.50"), 3);
        cart.add_item(item("m2", "Tiramisu", "6.00"), 1);
        cart.add_item(item("m1", "Margherita", "12.50"), -2);
        cart.add_item(item("m2", "Tiramisu", "6.00"), -1);
        cart.add_item(item("m3", "Espresso", "2.50"), 2);
        cart.update_item("m3", CartItemPatch { quantity: Some(1), ..Default::default() })
            .expect("line exists");

        assert!(cart.items().iter().all(|l| l.quantity >= 1));
    }

    // Pins the merge semantics: lines are keyed by item id alone, so adding
    // the same item with a different modifier selection collapses into one
    // line and the latest selection wins.
    #[test]
    fn same_item_with_different_modifiers_merges_into_one_line() {
        let mut cart = Cart::new();

        let mut first = item("m1", "Penne Pasta", "13.99");
        first.modifiers.insert("Size".to_string(), modifier("Regular", "0"));
        cart.add_item(first, 1);

        let mut second = item("m1", "Penne Pasta", "13.99");
        second.modifiers.insert("Size".to_string(), modifier("Large", "2.00"));
        cart.add_item(second, 1);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[0].modifiers["Size"].name, "Large");
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut cart = Cart::new();
        cart.add_item(item("m2", "Tiramisu", "6.00"), 1);
        cart.add_item(item("m1", "Margherita", "12.50"), 1);
        cart.add_item(item("m2", "Tiramisu", "6.00"), 1);

        let ids: Vec<&str> = cart.items().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m1"]);
    }

    #[test]
    fn update_item_replaces_quantity_and_modifiers() {
        let mut cart = Cart::new();
        cart.add_item(item("m1", "Penne Pasta", "13.99"), 1);

        let mut modifiers = BTreeMap::new();
        modifiers.insert("Topping".to_string(), modifier("Parmesan", "1.00"));
        cart.update_item(
            "m1",
            CartItemPatch { quantity: Some(4), modifiers: Some(modifiers) },
        )
        .expect("line exists");

        assert_eq!(cart.items()[0].quantity, 4);
        assert_eq!(cart.items()[0].modifiers["Topping"].name, "Parmesan");
    }

    #[test]
    fn update_item_to_zero_quantity_removes_the_line() {
        let mut cart = Cart::new();
        cart.add_item(item("m1", "Margherita", "12.50"), 2);
        cart.update_item("m1", CartItemPatch { quantity: Some(0), ..Default::default() })
            .expect("line exists");

        assert!(cart.is_empty());
    }

    #[test]
    fn update_item_signals_not_found() {
        let mut cart = Cart::new();
        let err = cart
            .update_item("ghost", CartItemPatch::default())
            .expect_err("id is absent");

        assert_eq!(err, CartError::LineNotFound("ghost".to_string()));
    }

    #[test]
    fn remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_item(item("m1", "Margherita", "12.50"), 1);
        cart.add_item(item("m2", "Tiramisu", "6.00"), 1);

        cart.remove_item("m1");
        assert_eq!(cart.len(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn line_subtotal_includes_modifier_deltas() {
        let mut line = item("m1", "Penne Pasta", "13.99");
        line.quantity = 2;
        line.modifiers.insert("Size".to_string(), modifier("Large", "2.00"));
        line.modifiers.insert("Topping".to_string(), modifier("Parmesan", "1.01"));

        // (13.99 + 2.00 + 1.01) × 2 = 34.00
        assert_eq!(line.line_subtotal(), BigDecimal::from_str("34.00").unwrap());
    }
}
