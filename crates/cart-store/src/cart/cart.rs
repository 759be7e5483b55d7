//! Cart and line item types.

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// An ordered shopping cart.
///
/// Line items keep first-add order and each product id appears at most once.
/// Every mutating operation returns a new cart and leaves `self` untouched,
/// so a cart handed to subscribers can never change underneath them.
///
/// Serializes as a plain JSON array of [`Product`]; duplicate ids found while
/// deserializing are merged into the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cart with `product` added once.
    ///
    /// An existing line grows by one unit; otherwise the product is appended
    /// with an amount of 1, whatever amount the given product carried.
    pub fn with_added(&self, product: Product) -> Cart {
        if self.contains(product.id) {
            let items = self
                .items
                .iter()
                .map(|item| {
                    if item.id == product.id {
                        item.with_amount(item.amount + 1)
                    } else {
                        item.clone()
                    }
                })
                .collect();
            return Cart { items };
        }

        let mut items = self.items.clone();
        items.push(Product {
            amount: 1,
            ..product
        });
        Cart { items }
    }

    /// Cart with the line for `id` set to `amount`, or `None` when the
    /// product is not in the cart.
    pub fn with_amount(&self, id: ProductId, amount: i64) -> Option<Cart> {
        if !self.contains(id) {
            return None;
        }
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    item.with_amount(amount)
                } else {
                    item.clone()
                }
            })
            .collect();
        Some(Cart { items })
    }

    /// Cart without the line for `id`, or `None` when the product is not in
    /// the cart.
    pub fn without(&self, id: ProductId) -> Option<Cart> {
        if !self.contains(id) {
            return None;
        }
        let items = self.items.iter().filter(|i| i.id != id).cloned().collect();
        Some(Cart { items })
    }

    /// Get a line by product id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Amount held for `id`, 0 when absent.
    pub fn amount_of(&self, id: ProductId) -> i64 {
        self.get(id).map(|i| i.amount).unwrap_or(0)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get total item count (sum of amounts).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Sum of `price * amount` over all lines.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(Product::line_total).sum()
    }

    /// Iterate over lines in cart order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    /// Lines in cart order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }
}

impl From<Vec<Product>> for Cart {
    fn from(products: Vec<Product>) -> Self {
        let mut items: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            match items.iter_mut().find(|i| i.id == product.id) {
                Some(existing) => existing.amount += product.amount,
                None => items.push(product),
            }
        }
        Cart { items }
    }
}

impl From<Cart> for Vec<Product> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sneaker(id: i64) -> Product {
        Product::new(id, format!("Tênis {}", id), 100.0 + id as f64, "img")
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_item() {
        let cart = Cart::new().with_added(sneaker(1));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(ProductId::new(1)), 1);
    }

    #[test]
    fn test_add_same_item_increases_amount() {
        let cart = Cart::new().with_added(sneaker(1)).with_added(sneaker(1));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_ignores_catalog_amount() {
        let cart = Cart::new().with_added(sneaker(1).with_amount(9));
        assert_eq!(cart.amount_of(ProductId::new(1)), 1);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let cart = Cart::new()
            .with_added(sneaker(3))
            .with_added(sneaker(1))
            .with_added(sneaker(3));
        let ids: Vec<i64> = cart.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_operations_do_not_mutate_original() {
        let original = Cart::new().with_added(sneaker(1));
        let _ = original.with_added(sneaker(1));
        let _ = original.with_amount(ProductId::new(1), 5);
        let _ = original.without(ProductId::new(1));
        assert_eq!(original.amount_of(ProductId::new(1)), 1);
    }

    #[test]
    fn test_with_amount() {
        let cart = Cart::new().with_added(sneaker(1)).with_added(sneaker(2));
        let updated = cart.with_amount(ProductId::new(2), 4).unwrap();
        assert_eq!(updated.amount_of(ProductId::new(2)), 4);
        assert_eq!(updated.amount_of(ProductId::new(1)), 1);
        assert!(cart.with_amount(ProductId::new(9), 4).is_none());
    }

    #[test]
    fn test_without() {
        let cart = Cart::new().with_added(sneaker(1)).with_added(sneaker(2));
        let removed = cart.without(ProductId::new(1)).unwrap();
        assert!(!removed.contains(ProductId::new(1)));
        assert_eq!(removed.len(), 1);
        assert!(removed.without(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_subtotal() {
        let cart = Cart::new()
            .with_added(sneaker(1))
            .with_added(sneaker(1))
            .with_added(sneaker(2));
        assert!((cart.subtotal() - (2.0 * 101.0 + 102.0)).abs() < 1e-9);
    }

    #[test]
    fn test_serializes_as_array() {
        let cart = Cart::new().with_added(sneaker(1));
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["amount"], 1);
        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_deserialize_merges_duplicate_ids() {
        let json = r#"[
            {"id": 1, "title": "a", "price": 1.0, "image": "i", "amount": 2},
            {"id": 2, "title": "b", "price": 2.0, "image": "i", "amount": 1},
            {"id": 1, "title": "a", "price": 1.0, "image": "i", "amount": 3}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.amount_of(ProductId::new(1)), 5);
    }
}
