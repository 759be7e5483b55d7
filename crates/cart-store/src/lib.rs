//! Storefront cart state for RocketShoes.
//!
//! This crate keeps a shopping cart consistent with a remote stock service
//! and a local snapshot slot:
//!
//! - **Catalog**: Products and stock records as served by the API
//! - **Cart**: Ordered line items with copy-on-write updates and the snapshot slot
//! - **Service**: The stock service trait, over HTTP or in memory
//! - **Store**: Add, remove and update operations with user notices
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_store::prelude::*;
//!
//! let config = CartConfig::default();
//! let stock = Arc::new(HttpStockService::from_config(&config.api)?);
//! let storage = Arc::new(FileStore::open(&config.storage.dir)?);
//!
//! let store = CartStore::open(&config, storage, stock, Arc::new(TracingNotifier));
//!
//! // Add one unit, reserving it in the remote stock
//! store.add_product(ProductId::new(1)).await?;
//!
//! // Set the amount held
//! store
//!     .update_product_amount(UpdateProductAmount {
//!         product_id: ProductId::new(1),
//!         amount: 3,
//!     })
//!     .await?;
//!
//! println!("Subtotal: {:.2}", store.cart().subtotal());
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod notify;

pub mod cart;
pub mod catalog;
pub mod service;
pub mod store;

pub use config::{CartConfig, StockMode};
pub use error::{CartError, Operation};
pub use ids::ProductId;
pub use store::{CartStore, UpdateProductAmount};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{ApiConfig, CartConfig, StockConfig, StockMode, StorageConfig};
    pub use crate::error::{CartError, Operation};
    pub use crate::ids::ProductId;
    pub use crate::notify::{Notifier, RecordingNotifier, TracingNotifier};

    // Catalog
    pub use crate::catalog::{Product, Stock, StockPatch};

    // Cart
    pub use crate::cart::{Cart, SnapshotSlot};

    // Service
    pub use crate::service::{HttpStockService, MemoryStockService, StockDocument, StockService};

    // Store
    pub use crate::store::{CartStore, UpdateProductAmount};
}
