//! Remote stock records.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Units of a product still available remotely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product identifier.
    pub id: ProductId,
    /// Units available.
    pub amount: i64,
}

impl Stock {
    /// Create a stock record.
    pub fn new(id: i64, amount: i64) -> Self {
        Self {
            id: ProductId::new(id),
            amount,
        }
    }
}

/// Body of `PATCH /stock/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockPatch {
    /// New absolute amount.
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_record_parses() {
        let stock: Stock = serde_json::from_str(r#"{"id": 3, "amount": 2}"#).unwrap();
        assert_eq!(stock, Stock::new(3, 2));
    }

    #[test]
    fn test_patch_body() {
        let body = serde_json::to_string(&StockPatch { amount: 4 }).unwrap();
        assert_eq!(body, r#"{"amount":4}"#);
    }
}
