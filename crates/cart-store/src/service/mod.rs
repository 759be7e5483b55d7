//! The remote stock service the cart validates against.

mod http;
mod memory;

pub use self::http::HttpStockService;
pub use self::memory::{MemoryStockService, StockDocument};

use crate::catalog::{Product, Stock};
use crate::ids::ProductId;
use async_trait::async_trait;
use cart_data::FetchError;

/// Catalog and stock lookups plus the stock write issued on add.
///
/// Failures are reported as [`FetchError`]; a 404 must be reported as an
/// `HttpError` with status 404 so callers can tell it apart.
#[async_trait]
pub trait StockService: Send + Sync {
    /// `GET /products/{id}`.
    async fn product(&self, id: ProductId) -> Result<Product, FetchError>;

    /// `GET /stock/{id}`.
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError>;

    /// `PATCH /stock/{id}` with `{ "amount": amount }`.
    async fn set_stock(&self, id: ProductId, amount: i64) -> Result<(), FetchError>;
}
