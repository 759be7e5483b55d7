//! Stock service over the storefront's JSON API.

use super::StockService;
use crate::catalog::{Product, Stock, StockPatch};
use crate::config::ApiConfig;
use crate::ids::ProductId;
use async_trait::async_trait;
use cart_data::{FetchClient, FetchError};
use tracing::instrument;

/// [`StockService`] backed by HTTP.
#[derive(Debug, Clone)]
pub struct HttpStockService {
    client: FetchClient,
}

impl HttpStockService {
    /// Wrap a client already pointed at the API base URL.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Build a client from configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = FetchClient::with_timeout(config.timeout())?.with_base_url(&config.base_url);
        Ok(Self::new(client))
    }

    /// The underlying client.
    pub fn client(&self) -> &FetchClient {
        &self.client
    }
}

pub(crate) fn product_path(id: ProductId) -> String {
    format!("/products/{}", id)
}

pub(crate) fn stock_path(id: ProductId) -> String {
    format!("/stock/{}", id)
}

#[async_trait]
impl StockService for HttpStockService {
    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        self.client
            .get(product_path(id))
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    #[instrument(skip(self))]
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        self.client
            .get(stock_path(id))
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    #[instrument(skip(self))]
    async fn set_stock(&self, id: ProductId, amount: i64) -> Result<(), FetchError> {
        // The response body is not used.
        self.client
            .patch(stock_path(id))
            .json(&StockPatch { amount })?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
