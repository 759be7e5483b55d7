//! Catalog product type.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as served by the catalog and as held in the cart.
///
/// `amount` is the quantity held in the cart. Catalog responses do not carry
/// it, so it defaults to 0 when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product identifier, shared with the stock record.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Quantity held in the cart.
    #[serde(default)]
    pub amount: i64,
}

impl Product {
    /// Create a product with no quantity in the cart.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            title: title.into(),
            price,
            image: image.into(),
            amount: 0,
        }
    }

    /// Copy of this product carrying `amount` units.
    pub fn with_amount(&self, amount: i64) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// `price * amount`.
    pub fn line_total(&self) -> f64 {
        self.price * self.amount as f64
    }
}
