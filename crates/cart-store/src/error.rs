//! Cart error types.

use crate::ids::ProductId;
use crate::notify::{ADD_FAILED, OUT_OF_STOCK, REMOVE_FAILED, UPDATE_FAILED};
use cart_cache::CacheError;
use cart_data::FetchError;
use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// Not enough remote stock for the requested quantity.
    #[error("Out of stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The catalog or the stock service answered 404.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Rejected input: non-positive amount, or a product missing from the cart.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other failure talking to the stock service.
    #[error("Stock service error: {0}")]
    Transport(#[source] FetchError),

    /// The snapshot slot could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] CacheError),
}

impl CartError {
    /// Classify a failed catalog or stock lookup.
    pub fn from_lookup(product_id: ProductId, error: FetchError) -> Self {
        if error.is_not_found() {
            CartError::NotFound(product_id)
        } else {
            CartError::Transport(error)
        }
    }

    /// The user-facing message shown when `operation` fails with this error.
    pub fn notice(&self, operation: Operation) -> &'static str {
        match (operation, self) {
            (Operation::Remove, _) => REMOVE_FAILED,
            (_, CartError::OutOfStock { .. }) => OUT_OF_STOCK,
            (Operation::Add, _) => ADD_FAILED,
            (Operation::Update, _) => UPDATE_FAILED,
        }
    }
}

/// The cart operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Update,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add_product",
            Operation::Remove => "remove_product",
            Operation::Update => "update_product_amount",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn out_of_stock() -> CartError {
        CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 1,
            available: 0,
        }
    }

    #[test]
    fn test_lookup_classification() {
        let not_found = FetchError::HttpError {
            status: 404,
            message: "Not Found".into(),
        };
        assert!(matches!(
            CartError::from_lookup(ProductId::new(1), not_found),
            CartError::NotFound(_)
        ));
        assert!(matches!(
            CartError::from_lookup(ProductId::new(1), FetchError::Timeout),
            CartError::Transport(_)
        ));
    }

    #[test]
    fn test_add_notices() {
        assert_eq!(out_of_stock().notice(Operation::Add), OUT_OF_STOCK);
        assert_eq!(
            CartError::NotFound(ProductId::new(1)).notice(Operation::Add),
            ADD_FAILED
        );
        assert_eq!(
            CartError::Transport(FetchError::Timeout).notice(Operation::Add),
            ADD_FAILED
        );
    }

    #[test]
    fn test_update_notices() {
        assert_eq!(out_of_stock().notice(Operation::Update), OUT_OF_STOCK);
        assert_eq!(
            CartError::Validation("amount".into()).notice(Operation::Update),
            UPDATE_FAILED
        );
    }

    #[test]
    fn test_remove_notice_is_always_generic() {
        assert_eq!(out_of_stock().notice(Operation::Remove), REMOVE_FAILED);
        assert_eq!(
            CartError::Validation("missing".into()).notice(Operation::Remove),
            REMOVE_FAILED
        );
    }
}
