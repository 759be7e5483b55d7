//! Store configuration.

use crate::cart::default_snapshot_key;
use crate::error::CartError;
use crate::ids::ProductId;
use cart_data::TimeoutConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Full cart configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Snapshot slot settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Stock service endpoint.
    #[serde(default)]
    pub api: ApiConfig,

    /// Stock accounting.
    #[serde(default)]
    pub stock: StockConfig,
}

/// Where the cart snapshot lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key of the snapshot slot.
    #[serde(default = "default_snapshot_key")]
    pub key: String,

    /// Directory of the file-backed store.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".cart")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_snapshot_key(),
            dir: default_storage_dir(),
        }
    }
}

/// Stock service endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the storefront API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total timeout per request, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Connection timeout, in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_connect_timeout_ms() -> u64 {
    2000
}

impl ApiConfig {
    /// Timeouts for the HTTP client.
    pub fn timeout(&self) -> TimeoutConfig {
        TimeoutConfig::new(
            Duration::from_millis(self.connect_timeout_ms),
            Duration::from_millis(self.timeout_ms),
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

/// Stock accounting settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockConfig {
    #[serde(default)]
    pub mode: StockMode,
}

/// How the remote stock count relates to the cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockMode {
    /// Stock counts units still available. Units held in the cart are
    /// taken out of it remotely and given back when released.
    #[default]
    Reserve,
    /// Stock is a fixed total; the cart amount is only compared against it.
    Check,
}

impl StockMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockMode::Reserve => "reserve",
            StockMode::Check => "check",
        }
    }

    /// Whether units held in the cart are subtracted from the remote stock.
    pub fn decrements(&self) -> bool {
        matches!(self, StockMode::Reserve)
    }

    /// Guard for adding one unit of `product_id` while `in_cart` units are
    /// already held and the stock service reports `available`.
    ///
    /// Returns the stock amount to leave on the remote side.
    pub fn check_add(
        &self,
        product_id: ProductId,
        available: i64,
        in_cart: i64,
    ) -> Result<i64, CartError> {
        self.check_update(product_id, available, in_cart, in_cart + 1)
    }

    /// Guard for holding `amount` units of `product_id` instead of `held`.
    ///
    /// Returns the stock amount to leave on the remote side.
    pub fn check_update(
        &self,
        product_id: ProductId,
        available: i64,
        held: i64,
        amount: i64,
    ) -> Result<i64, CartError> {
        match self {
            StockMode::Reserve => {
                let delta = amount - held;
                if delta > available {
                    return Err(CartError::OutOfStock {
                        product_id,
                        requested: amount,
                        available: available + held,
                    });
                }
                Ok(available - delta)
            }
            StockMode::Check => {
                if amount > available {
                    return Err(CartError::OutOfStock {
                        product_id,
                        requested: amount,
                        available,
                    });
                }
                Ok(available)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage.key, "@RocketShoes:cart");
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.stock.mode, StockMode::Reserve);
        assert_eq!(config.api.timeout().total, Duration::from_secs(5));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: CartConfig =
            serde_json::from_str(r#"{"stock": {"mode": "check"}, "api": {"timeout_ms": 100}}"#)
                .unwrap();
        assert_eq!(config.stock.mode, StockMode::Check);
        assert_eq!(config.api.timeout_ms, 100);
        assert_eq!(config.api.connect_timeout_ms, 2000);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_reserve_guard() {
        let id = ProductId::new(1);
        assert_eq!(StockMode::Reserve.check_add(id, 1, 7).unwrap(), 0);
        assert!(matches!(
            StockMode::Reserve.check_add(id, 0, 2),
            Err(CartError::OutOfStock { requested: 3, available: 2, .. })
        ));
    }

    #[test]
    fn test_check_guard_counts_cart_amount() {
        let id = ProductId::new(1);
        assert_eq!(StockMode::Check.check_add(id, 3, 2).unwrap(), 3);
        assert!(matches!(
            StockMode::Check.check_add(id, 3, 3),
            Err(CartError::OutOfStock { requested: 4, available: 3, .. })
        ));
    }

    #[test]
    fn test_reserve_update_counts_held_units() {
        let id = ProductId::new(1);
        // 1 held, 4 left remotely: up to 5 can be held.
        assert_eq!(StockMode::Reserve.check_update(id, 4, 1, 5).unwrap(), 0);
        assert_eq!(StockMode::Reserve.check_update(id, 4, 1, 3).unwrap(), 2);
        assert!(matches!(
            StockMode::Reserve.check_update(id, 4, 1, 6),
            Err(CartError::OutOfStock { requested: 6, available: 5, .. })
        ));
    }

    #[test]
    fn test_reserve_update_down_releases() {
        let id = ProductId::new(1);
        assert_eq!(StockMode::Reserve.check_update(id, 0, 4, 1).unwrap(), 3);
        assert_eq!(StockMode::Reserve.check_update(id, 2, 3, 3).unwrap(), 2);
    }

    #[test]
    fn test_check_update_compares_total() {
        let id = ProductId::new(1);
        assert_eq!(StockMode::Check.check_update(id, 5, 4, 5).unwrap(), 5);
        assert!(matches!(
            StockMode::Check.check_update(id, 5, 1, 6),
            Err(CartError::OutOfStock { requested: 6, available: 5, .. })
        ));
    }
}
