//! Persisted cart snapshot.

use crate::cart::Cart;
use cart_cache::{Cache, CacheError, KvStore};
use std::sync::Arc;

/// Default namespace of the snapshot key.
pub const SNAPSHOT_NAMESPACE: &str = "@RocketShoes";

/// Default snapshot key, `@RocketShoes:cart`.
pub fn default_snapshot_key() -> String {
    cart_cache::cache_key!(SNAPSHOT_NAMESPACE, "cart")
}

/// The single Key-Value slot holding the serialized cart.
///
/// Every save overwrites the slot with the whole cart.
#[derive(Clone)]
pub struct SnapshotSlot {
    cache: Cache<Arc<dyn KvStore>>,
    key: String,
}

impl SnapshotSlot {
    /// Bind a slot to `key` inside `store`.
    pub fn new(store: Arc<dyn KvStore>, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
        }
    }

    /// The key this slot writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored cart, `None` when nothing was ever saved.
    pub fn load(&self) -> Result<Option<Cart>, CacheError> {
        self.cache.get(&self.key)
    }

    /// Overwrite the slot with `cart`.
    pub fn save(&self, cart: &Cart) -> Result<(), CacheError> {
        self.cache.set(&self.key, cart)
    }
}

impl std::fmt::Debug for SnapshotSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotSlot").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use cart_cache::MemoryStore;

    #[test]
    fn test_default_key() {
        assert_eq!(default_snapshot_key(), "@RocketShoes:cart");
    }

    #[test]
    fn test_empty_slot_loads_none() {
        let slot = SnapshotSlot::new(Arc::new(MemoryStore::new()), default_snapshot_key());
        assert_eq!(slot.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let slot = SnapshotSlot::new(Arc::new(MemoryStore::new()), "k");
        let cart = Cart::new().with_added(Product::new(1, "Tênis", 179.9, "img"));
        slot.save(&cart).unwrap();
        assert_eq!(slot.load().unwrap(), Some(cart));
    }
}
