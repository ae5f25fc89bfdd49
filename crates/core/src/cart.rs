//! Shopping cart.
//!
//! Quantities are kept within the product's stock. The cart is mirrored to the local store
//! under [`CART_STORE_KEY`] after every mutation; a malformed stored cart is discarded.

use crate::constants::CART_STORE_KEY;
use crate::local_store::{load_json, save_json, LocalStore};
use crate::store::{format_idr, Product};
use crate::{HerbalError, HerbalResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A product in the cart. Serialises as the product fields plus `quantity`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Cart contents with computed totals, as shown to the shopper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub total_items: u32,
    pub total_amount: u64,
    pub total_formatted: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Restore the cart from `store`, starting empty if nothing valid is stored.
    pub fn load(store: &mut dyn LocalStore) -> Self {
        let items: Vec<CartItem> = load_json(store, CART_STORE_KEY).unwrap_or_default();
        Self { items }
    }

    pub fn save(&self, store: &mut dyn LocalStore) -> HerbalResult<()> {
        save_json(store, CART_STORE_KEY, &self.items)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` of `product`, merging with an existing line and capping at stock.
    ///
    /// # Errors
    ///
    /// Returns [`HerbalError::OutOfStock`] when the product has no stock and
    /// [`HerbalError::InvalidInput`] for a zero quantity.
    pub fn add(&mut self, product: &Product, quantity: u32) -> HerbalResult<&CartItem> {
        if quantity == 0 {
            return Err(HerbalError::InvalidInput("quantity must be at least 1".into()));
        }
        if product.stock == 0 {
            return Err(HerbalError::OutOfStock(product.id.clone()));
        }

        let index = match self.items.iter().position(|i| i.product.id == product.id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(quantity).min(product.stock);
                index
            }
            None => {
                self.items.push(CartItem {
                    product: product.clone(),
                    quantity: quantity.min(product.stock),
                });
                self.items.len() - 1
            }
        };
        Ok(&self.items[index])
    }

    /// Set the quantity of a line, clamped to `[1, stock]`. Returns `None` if not in the cart.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> Option<&CartItem> {
        let item = self.items.iter_mut().find(|i| i.product.id == product_id)?;
        item.quantity = quantity.max(1).min(item.product.stock.max(1));
        Some(item)
    }

    pub fn remove(&mut self, product_id: &str) -> Option<CartItem> {
        let index = self.items.iter().position(|i| i.product.id == product_id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).fold(0, u32::saturating_add)
    }

    /// Sum of line totals in rupiah.
    pub fn total_amount(&self) -> u64 {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(0, u64::saturating_add)
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self.items.clone(),
            total_items: self.total_items(),
            total_amount: self.total_amount(),
            total_formatted: format_idr(self.total_amount()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::local_store::MemoryStore;

    fn product(id: &str) -> Product {
        Catalog::builtin()
            .expect("catalog")
            .product(id)
            .cloned()
            .expect("product")
    }

    #[test]
    fn add_merges_and_caps_at_stock() {
        let oil = product("3");
        let mut cart = Cart::default();
        cart.add(&oil, 10).expect("add");
        let item = cart.add(&oil, 10).expect("add");
        assert_eq!(item.quantity, 15);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn update_clamps_between_one_and_stock() {
        let tea = product("2");
        let mut cart = Cart::default();
        cart.add(&tea, 1).expect("add");
        assert_eq!(cart.update_quantity("2", 0).map(|i| i.quantity), Some(1));
        assert_eq!(cart.update_quantity("2", 99).map(|i| i.quantity), Some(30));
        assert!(cart.update_quantity("42", 1).is_none());
    }

    #[test]
    fn totals() {
        let mut cart = Cart::default();
        cart.add(&product("1"), 2).expect("add");
        cart.add(&product("4"), 1).expect("add");
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_amount(), 2 * 35_000 + 25_000);
        assert_eq!(cart.summary().total_formatted, "Rp 95.000");
    }

    #[test]
    fn huge_prices_saturate_instead_of_overflowing() {
        let mut pricey = product("1");
        pricey.price = u64::MAX / 2;
        let mut cart = Cart::default();
        cart.add(&pricey, 3).expect("add");
        cart.add(&product("4"), 1).expect("add");
        assert_eq!(cart.items()[0].line_total(), u64::MAX);
        assert_eq!(cart.total_amount(), u64::MAX);
    }

    #[test]
    fn zero_quantity_and_empty_stock_are_rejected() {
        let mut cart = Cart::default();
        let mut sold_out = product("5");
        sold_out.stock = 0;
        assert!(matches!(cart.add(&sold_out, 1), Err(HerbalError::OutOfStock(_))));
        assert!(matches!(cart.add(&product("1"), 0), Err(HerbalError::InvalidInput(_))));
    }

    #[test]
    fn stored_cart_uses_flat_product_fields() {
        let mut store = MemoryStore::new();
        let mut cart = Cart::default();
        cart.add(&product("1"), 2).expect("add");
        cart.save(&mut store).expect("save");

        let raw = store.get(CART_STORE_KEY).expect("get").expect("present");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(json[0]["id"], "1");
        assert_eq!(json[0]["quantity"], 2);
        assert_eq!(json[0]["price"], 35000);

        assert_eq!(Cart::load(&mut store), cart);
    }

    #[test]
    fn malformed_stored_cart_is_discarded() {
        let mut store = MemoryStore::new();
        store.set(CART_STORE_KEY, "[{\"id\": 1}]".into()).expect("set");
        assert!(Cart::load(&mut store).is_empty());
        assert_eq!(store.get(CART_STORE_KEY).expect("get"), None);
    }
}
