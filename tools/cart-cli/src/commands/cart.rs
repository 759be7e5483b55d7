//! Cart commands: show, add, remove, update.

use anyhow::{Context as _, Result};
use cart_store::cart::Cart;
use cart_store::{CartError, UpdateProductAmount};

use super::{AddArgs, RemoveArgs, UpdateArgs};
use crate::context::{Context, Session};

/// Run the show command.
pub async fn show(ctx: &Context) -> Result<()> {
    let session = ctx.open_store()?;

    ctx.output.header("Cart");
    ctx.output.cart(&session.store.cart());

    Ok(())
}

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_store()?;
    let result = session.store.add_product(args.id).await;
    let cart = finish(ctx, session, result).await?;

    ctx.output.success(&format!(
        "Added product {} (now {} in cart)",
        args.id,
        cart.amount_of(args.id)
    ));
    ctx.output.cart(&cart);

    Ok(())
}

/// Run the remove command.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_store()?;
    let result = session.store.remove_product(args.id).await;
    let cart = finish(ctx, session, result).await?;

    ctx.output.success(&format!("Removed product {}", args.id));
    ctx.output.cart(&cart);

    Ok(())
}

/// Run the update command.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_store()?;
    let result = session
        .store
        .update_product_amount(UpdateProductAmount {
            product_id: args.id,
            amount: args.amount,
        })
        .await;
    let cart = finish(ctx, session, result).await?;

    ctx.output
        .success(&format!("Set product {} to {}", args.id, args.amount));
    ctx.output.cart(&cart);

    Ok(())
}

/// Print the notices raised by the operation and close the store.
async fn finish(
    ctx: &Context,
    session: Session,
    result: Result<Cart, CartError>,
) -> Result<Cart> {
    for notice in session.notices.take() {
        ctx.output.warn(&notice);
    }

    let cart = result.context("Cart operation failed")?;
    session
        .store
        .close()
        .await
        .context("Failed to save cart snapshot")?;
    Ok(cart)
}
