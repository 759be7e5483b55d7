//! In-process stock service.

use super::StockService;
use crate::catalog::{Product, Stock};
use crate::ids::ProductId;
use async_trait::async_trait;
use cart_data::FetchError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

const NOT_FOUND: u16 = 404;

/// A json-server style database document: `{ "products": [...], "stock": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockDocument {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub stock: Vec<Stock>,
}

impl StockDocument {
    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Default)]
struct Tables {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, i64>,
}

impl Tables {
    fn insert(&mut self, product: Product, stock: i64) {
        self.stock.insert(product.id, stock);
        self.products.insert(product.id, product);
    }
}

/// [`StockService`] kept in memory.
///
/// Missing ids answer like the HTTP API would: an `HttpError` with status 404.
#[derive(Debug, Default)]
pub struct MemoryStockService {
    tables: Mutex<Tables>,
}

impl MemoryStockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a database document.
    pub fn from_document(document: StockDocument) -> Self {
        let tables = Tables {
            products: document.products.into_iter().map(|p| (p.id, p)).collect(),
            stock: document.stock.into_iter().map(|s| (s.id, s.amount)).collect(),
        };
        Self {
            tables: Mutex::new(tables),
        }
    }

    /// Add or replace a catalog product.
    pub fn insert_product(&self, product: Product) -> Result<(), FetchError> {
        self.lock()?.products.insert(product.id, product);
        Ok(())
    }

    /// Set the available amount for `id`.
    pub fn set_available(&self, id: ProductId, amount: i64) -> Result<(), FetchError> {
        self.lock()?.stock.insert(id, amount);
        Ok(())
    }

    /// Current available amount for `id`.
    pub fn available(&self, id: ProductId) -> Option<i64> {
        self.lock().ok()?.stock.get(&id).copied()
    }

    /// Builder-style: add a product with its stock.
    pub fn with_product(mut self, product: Product, stock: i64) -> Self {
        // No guard can be alive while `self` is owned.
        self.tables
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product, stock);
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, FetchError> {
        self.tables
            .lock()
            .map_err(|_| FetchError::RequestError("stock table lock poisoned".to_string()))
    }
}

fn not_found(path: String) -> FetchError {
    FetchError::HttpError {
        status: NOT_FOUND,
        message: format!("{} not found", path),
    }
}

#[async_trait]
impl StockService for MemoryStockService {
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        self.lock()?
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(super::http::product_path(id)))
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        self.lock()?
            .stock
            .get(&id)
            .map(|amount| Stock { id, amount: *amount })
            .ok_or_else(|| not_found(super::http::stock_path(id)))
    }

    async fn set_stock(&self, id: ProductId, amount: i64) -> Result<(), FetchError> {
        let mut tables = self.lock()?;
        match tables.stock.get_mut(&id) {
            Some(current) => {
                *current = amount;
                Ok(())
            }
            None => Err(not_found(super::http::stock_path(id))),
        }
    }
}
