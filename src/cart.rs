// src/cart.rs
//! Cart line items and the add / change-quantity / remove reducers.
//!
//! Totals are derived on every read and never stored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use crate::enums::{CoffeeLevel, Temperature};
use crate::models::MenuItem;

/// Tax rate applied to the subtotal, in percent
pub const TAX_RATE_PERCENT: u64 = 10;

// ==================== LINE ITEMS ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Customization {
    #[serde(default)]
    pub coffee_level: CoffeeLevel,
    #[validate(range(min = 0, max = 100, message = "Sugar level must be between 0 and 100"))]
    #[serde(default = "default_sugar_level")]
    pub sugar_level: u8,
    #[serde(default)]
    pub temperature: Temperature,
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    #[serde(default)]
    pub notes: String,
}

fn default_sugar_level() -> u8 {
    50
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            coffee_level: CoffeeLevel::Medium,
            sugar_level: default_sugar_level(),
            temperature: Temperature::Ice,
            notes: String::new(),
        }
    }
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartRequest {
    #[validate(length(min = 1, message = "Menu item is required"))]
    pub menu_item_id: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChangeQuantityRequest {
    pub delta: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CustomOrderRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub customization: Customization,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

#[derive(Debug, Deserialize, Default)]
pub struct OpenCustomOrderRequest {
    pub menu_item_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub menu_item_id: String,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub customization: Option<Customization>,
}

impl LineItem {
    /// Plain line item keyed by the menu item id
    pub fn from_menu_item(item: &MenuItem, quantity: u32) -> Self {
        Self {
            id: item.id.clone(),
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity,
            customization: None,
        }
    }

    /// Customized line item with a fresh identifier, so it never merges
    pub fn customized(item: &MenuItem, quantity: u32, customization: Customization) -> Self {
        Self {
            id: format!("{}-custom-{}", item.id, Uuid::new_v4()),
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity,
            customization: Some(customization),
        }
    }

    pub fn is_customized(&self) -> bool {
        self.customization.is_some()
    }

    pub fn line_total(&self) -> u64 {
        self.price * u64::from(self.quantity)
    }
}

// ==================== TOTALS ====================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartTotals {
    pub subtotal: u64,
    pub tax: f64,
    pub grand_total: f64,
}

impl CartTotals {
    pub fn from_subtotal(subtotal: u64) -> Self {
        let tax = (subtotal * TAX_RATE_PERCENT) as f64 / 100.0;
        Self {
            subtotal,
            tax,
            grand_total: subtotal as f64 + tax,
        }
    }
}

// ==================== CART ====================

#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

/// Result of applying a quantity delta
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityChange {
    Updated(u32),
    Removed,
    NotFound,
    /// Result would exceed `u32::MAX`; the line is left untouched
    OutOfRange,
}

impl Cart {
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of line items, not units
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Merges into an existing uncustomized entry with the same id, otherwise appends.
    /// Returns the id of the line that received the quantity.
    pub fn add(&mut self, item: LineItem) -> String {
        if !item.is_customized() {
            if let Some(existing) = self
                .items
                .iter_mut()
                .find(|existing| existing.id == item.id && !existing.is_customized())
            {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                return existing.id.clone();
            }
        }

        let id = item.id.clone();
        self.items.push(item);
        id
    }

    pub fn change_quantity(&mut self, id: &str, delta: i64) -> QuantityChange {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return QuantityChange::NotFound;
        };

        let new_quantity = i64::from(self.items[index].quantity).saturating_add(delta);
        if new_quantity <= 0 {
            self.items.remove(index);
            return QuantityChange::Removed;
        }

        match u32::try_from(new_quantity) {
            Ok(quantity) => {
                self.items[index].quantity = quantity;
                QuantityChange::Updated(quantity)
            }
            Err(_) => QuantityChange::OutOfRange,
        }
    }

    /// Drops the matching line if present
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn subtotal(&self) -> u64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from_subtotal(self.subtotal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn menu(id: &str) -> MenuItem {
        catalog::find_menu_item(id).unwrap()
    }

    #[test]
    fn test_same_plain_item_merges() {
        let mut cart = Cart::default();
        cart.add(LineItem::from_menu_item(&menu("2"), 1));
        cart.add(LineItem::from_menu_item(&menu("2"), 1));

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_add_uses_requested_quantity() {
        let mut cart = Cart::default();
        cart.add(LineItem::from_menu_item(&menu("1"), 1));
        cart.add(LineItem::from_menu_item(&menu("1"), 3));
        assert_eq!(cart.get("1").unwrap().quantity, 4);
    }

    #[test]
    fn test_customized_items_never_merge() {
        let mut cart = Cart::default();
        let base = menu("2");
        cart.add(LineItem::from_menu_item(&base, 1));
        let first = cart.add(LineItem::customized(&base, 1, Customization::default()));
        let second = cart.add(LineItem::customized(&base, 1, Customization::default()));

        assert_eq!(cart.item_count(), 3);
        assert_ne!(first, second);
        assert!(first.starts_with("2-custom-"));
        assert_eq!(cart.get("2").unwrap().quantity, 1);
    }

    #[test]
    fn test_plain_add_does_not_merge_into_customized() {
        let mut cart = Cart::default();
        let base = menu("4");
        let mut custom = LineItem::customized(&base, 1, Customization::default());
        custom.id = base.id.clone();
        cart.add(custom);
        cart.add(LineItem::from_menu_item(&base, 1));

        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_change_quantity() {
        let mut cart = Cart::default();
        cart.add(LineItem::from_menu_item(&menu("3"), 2));

        assert_eq!(cart.change_quantity("3", 1), QuantityChange::Updated(3));
        assert_eq!(cart.change_quantity("3", -1), QuantityChange::Updated(2));
        assert_eq!(cart.change_quantity("missing", 1), QuantityChange::NotFound);
    }

    #[test]
    fn test_quantity_to_zero_removes() {
        let mut cart = Cart::default();
        cart.add(LineItem::from_menu_item(&menu("3"), 1));
        assert_eq!(cart.change_quantity("3", -1), QuantityChange::Removed);
        assert!(cart.is_empty());

        cart.add(LineItem::from_menu_item(&menu("5"), 2));
        assert_eq!(cart.change_quantity("5", -10), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_extreme_deltas() {
        let mut cart = Cart::default();
        cart.add(LineItem::from_menu_item(&menu("1"), 2));

        assert_eq!(cart.change_quantity("1", i64::MAX), QuantityChange::OutOfRange);
        assert_eq!(cart.change_quantity("1", 5_000_000_000), QuantityChange::OutOfRange);
        assert_eq!(cart.get("1").unwrap().quantity, 2);

        assert_eq!(cart.change_quantity("1", i64::MIN), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_saturates_at_max() {
        let mut cart = Cart::default();
        cart.add(LineItem::from_menu_item(&menu("1"), 1));
        assert_eq!(cart.change_quantity("1", i64::from(u32::MAX) - 1), QuantityChange::Updated(u32::MAX));

        cart.add(LineItem::from_menu_item(&menu("1"), 1));
        assert_eq!(cart.get("1").unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_remove_is_unconditional() {
        let mut cart = Cart::default();
        cart.add(LineItem::from_menu_item(&menu("1"), 5));
        assert!(cart.remove("1"));
        assert!(!cart.remove("1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_example() {
        let mut cart = Cart::default();
        cart.add(LineItem::from_menu_item(&menu("2"), 2));

        let totals = cart.totals();
        assert_eq!(totals.subtotal, 26000);
        assert_eq!(totals.tax, 2600.0);
        assert_eq!(totals.grand_total, 28600.0);
    }

    #[test]
    fn test_totals_ratios() {
        let mut cart = Cart::default();
        cart.add(LineItem::from_menu_item(&menu("1"), 3));
        cart.add(LineItem::from_menu_item(&menu("4"), 1));
        cart.add(LineItem::customized(&menu("5"), 2, Customization::default()));

        let totals = cart.totals();
        assert_eq!(totals.subtotal, 15000 * 3 + 14000 + 16000 * 2);
        assert!((totals.tax - totals.subtotal as f64 * 0.10).abs() < 1e-6);
        assert!((totals.grand_total - totals.subtotal as f64 * 1.10).abs() < 1e-6);
    }

    #[test]
    fn test_empty_totals() {
        let totals = Cart::default().totals();
        assert_eq!(totals.subtotal, 0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.grand_total, 0.0);
    }
}
