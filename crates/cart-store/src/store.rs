//! The cart store: cart state kept in step with the snapshot slot and the
//! remote stock.
//!
//! All mutations go through one async mutex that is held for the whole
//! operation, remote calls included. Two concurrent adds of the same product
//! therefore see each other's stock writes instead of both reading the same
//! stale amount.
//!
//! An operation either commits everywhere (remote stock, snapshot, in-memory
//! cart, subscribers) or leaves all of them as they were:
//!
//! 1. read and validate,
//! 2. write remote stock when the units held change in [`StockMode::Reserve`],
//! 3. write the snapshot; on failure restore the remote stock,
//! 4. swap the in-memory cart and publish it.
//!
//! In reserve mode the remote stock plus the units held in the cart stays
//! equal to the stock the product started with.

use crate::cart::{Cart, SnapshotSlot};
use crate::catalog::Product;
use crate::config::{CartConfig, StockMode};
use crate::error::{CartError, Operation};
use crate::ids::ProductId;
use crate::notify::Notifier;
use crate::service::StockService;
use cart_cache::KvStore;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{error, info, instrument, warn};

/// Arguments of [`CartStore::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Cart state shared by the storefront UI.
pub struct CartStore {
    state: Mutex<Cart>,
    published: watch::Sender<Cart>,
    slot: SnapshotSlot,
    stock: Arc<dyn StockService>,
    notifier: Arc<dyn Notifier>,
    mode: StockMode,
}

impl CartStore {
    /// Open the store, hydrating the cart from the snapshot slot.
    ///
    /// A missing snapshot starts an empty cart. An unreadable one is logged
    /// and also starts an empty cart; the slot is left as is until the next
    /// successful mutation overwrites it.
    pub fn open(
        config: &CartConfig,
        storage: Arc<dyn KvStore>,
        stock: Arc<dyn StockService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let slot = SnapshotSlot::new(storage, config.storage.key.clone());
        let cart = match slot.load() {
            Ok(Some(cart)) => {
                info!(key = slot.key(), lines = cart.len(), "Hydrated cart from snapshot");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = slot.key(), error = %e, "Ignoring unreadable cart snapshot");
                Cart::new()
            }
        };

        let (published, _) = watch::channel(cart.clone());
        Self {
            state: Mutex::new(cart),
            published,
            slot,
            stock,
            notifier,
            mode: config.stock.mode,
        }
    }

    /// The last committed cart.
    pub fn cart(&self) -> Cart {
        self.published.borrow().clone()
    }

    /// Receive every committed cart from now on.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.published.subscribe()
    }

    /// Flush the final cart to the snapshot slot and end the store.
    pub async fn close(self) -> Result<Cart, CartError> {
        let cart = self.state.into_inner();
        self.slot.save(&cart)?;
        info!(lines = cart.len(), "Cart store closed");
        Ok(cart)
    }

    /// Add one unit of `product_id` to the cart.
    #[instrument(skip(self), fields(mode = self.mode.as_str()))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let result = self.try_add_product(product_id).await;
        self.report(Operation::Add, result)
    }

    /// Remove the line for `product_id`.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let result = self.try_remove_product(product_id).await;
        self.report(Operation::Remove, result)
    }

    /// Set the amount held for a product already in the cart.
    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<Cart, CartError> {
        let result = self.try_update_product_amount(update).await;
        self.report(Operation::Update, result)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let mut cart = self.state.lock().await;

        let (product, stock) =
            futures::try_join!(self.stock.product(product_id), self.stock.stock(product_id))
                .map_err(|e| CartError::from_lookup(product_id, e))?;

        let remaining = self
            .mode
            .check_add(product_id, stock.amount, cart.amount_of(product_id))?;

        let next = cart.with_added(Product {
            id: product_id,
            ..product
        });

        self.write_through(&mut cart, next, product_id, stock.amount, remaining)
            .await
    }

    async fn try_remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let mut cart = self.state.lock().await;

        let held = cart.amount_of(product_id);
        let next = cart.without(product_id).ok_or_else(|| not_in_cart(product_id))?;

        if !self.mode.decrements() {
            self.slot.save(&next)?;
            return Ok(self.commit(&mut cart, next));
        }

        let stock = self
            .stock
            .stock(product_id)
            .await
            .map_err(|e| CartError::from_lookup(product_id, e))?;

        self.write_through(&mut cart, next, product_id, stock.amount, stock.amount + held)
            .await
    }

    async fn try_update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<Cart, CartError> {
        let UpdateProductAmount { product_id, amount } = update;

        if amount <= 0 {
            return Err(CartError::Validation(format!(
                "amount must be positive, got {}",
                amount
            )));
        }

        let mut cart = self.state.lock().await;

        let held = cart.amount_of(product_id);
        let next = cart
            .with_amount(product_id, amount)
            .ok_or_else(|| not_in_cart(product_id))?;

        let stock = self
            .stock
            .stock(product_id)
            .await
            .map_err(|e| CartError::from_lookup(product_id, e))?;

        let remaining = self
            .mode
            .check_update(product_id, stock.amount, held, amount)?;

        self.write_through(&mut cart, next, product_id, stock.amount, remaining)
            .await
    }

    /// Write `remaining` to the remote stock if it moved from `before`, then
    /// the snapshot, then commit `next`.
    async fn write_through(
        &self,
        cart: &mut Cart,
        next: Cart,
        product_id: ProductId,
        before: i64,
        remaining: i64,
    ) -> Result<Cart, CartError> {
        if remaining == before {
            self.slot.save(&next)?;
            return Ok(self.commit(cart, next));
        }

        self.stock
            .set_stock(product_id, remaining)
            .await
            .map_err(CartError::Transport)?;

        if let Err(e) = self.slot.save(&next) {
            self.restore_stock(product_id, before).await;
            return Err(e.into());
        }

        info!(%product_id, before, remaining, "Wrote stock");
        Ok(self.commit(cart, next))
    }

    /// Undo a stock write whose cart change could not be persisted.
    async fn restore_stock(&self, product_id: ProductId, amount: i64) {
        match self.stock.set_stock(product_id, amount).await {
            Ok(()) => warn!(%product_id, amount, "Restored stock after failed snapshot write"),
            Err(e) => error!(
                %product_id,
                amount,
                error = %e,
                "Failed to restore stock; remote stock and cart are out of sync"
            ),
        }
    }

    fn commit(&self, cart: &mut Cart, next: Cart) -> Cart {
        *cart = next.clone();
        self.published.send_replace(next.clone());
        info!(lines = next.len(), items = next.item_count(), "Cart updated");
        next
    }

    fn report(
        &self,
        operation: Operation,
        result: Result<Cart, CartError>,
    ) -> Result<Cart, CartError> {
        if let Err(e) = &result {
            match e {
                CartError::Transport(_) | CartError::Storage(_) => {
                    warn!(operation = operation.as_str(), error = %e, "Cart operation failed")
                }
                _ => info!(operation = operation.as_str(), error = %e, "Cart operation rejected"),
            }
            self.notifier.error(e.notice(operation));
        }
        result
    }
}

fn not_in_cart(product_id: ProductId) -> CartError {
    CartError::Validation(format!("product {} is not in the cart", product_id))
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("slot", &self.slot)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
