//! Type-safe local Key-Value slot for persisted cart snapshots.
//!
//! Provides byte-level stores ([`MemoryStore`], [`FileStore`]) behind the
//! [`KvStore`] trait and a [`Cache`] wrapper with automatic JSON
//! serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_cache::{cache_key, Cache, FileStore};
//!
//! let cache = Cache::new(FileStore::open(".cart")?);
//! let key = cache_key!("@RocketShoes", "cart");
//!
//! // Store a value
//! cache.set(&key, &products)?;
//!
//! // Retrieve a value
//! let products: Option<Vec<Product>> = cache.get(&key)?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::{Cache, FileStore, KvStore, MemoryStore};
