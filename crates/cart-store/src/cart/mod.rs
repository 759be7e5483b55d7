//! Shopping cart module.
//!
//! Contains the cart collection and its persisted snapshot slot.

mod cart;
mod snapshot;

pub use cart::Cart;
pub use snapshot::{default_snapshot_key, SnapshotSlot, SNAPSHOT_NAMESPACE};
