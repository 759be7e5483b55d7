//! Product catalog module.
//!
//! Contains the product and stock records served by the storefront API.

mod product;
mod stock;

pub use product::Product;
pub use stock::{Stock, StockPatch};
