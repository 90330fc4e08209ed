//! Cart commands.

use anyhow::Result;
use cart_engine::{load_cart, CartEngine, Outcome};
use cart_model::Cart;
use dialoguer::Confirm;

use super::{AddArgs, ClearArgs, RemoveArgs, Rejected, SetArgs};
use crate::context::Context;
use crate::output::{format_price, truncate};

/// Show the saved cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let key = ctx.cart_key();
    ctx.output.debug(&format!("Reading {} from {}", key, store.dir().display()));
    let cart = load_cart(&store, &key);
    render(&cart, &key, ctx);
    Ok(())
}

/// Add one unit of a product.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;
    let outcome = engine.add_product(&args.id).await;
    finish(outcome, &engine, ctx)
}

/// Remove a product's line.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;
    let outcome = engine.remove_product(&args.id).await;
    finish(outcome, &engine, ctx)
}

/// Set a product's amount.
pub async fn set(args: SetArgs, ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;
    let outcome = engine.update_product_amount(&args.id, args.amount).await;
    finish(outcome, &engine, ctx)
}

/// Empty the cart.
pub async fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;

    if !args.yes && !ctx.output.is_json() && !engine.cart().is_empty() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} item(s) from the cart?",
                engine.cart().item_count()
            ))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.info("Clear cancelled");
            return Ok(());
        }
    }

    let outcome = engine.clear().await;
    finish(outcome, &engine, ctx)
}

fn finish(outcome: Outcome, engine: &CartEngine, ctx: &Context) -> Result<()> {
    match outcome {
        Outcome::Committed => {
            if ctx.output.is_verbose() || ctx.output.is_json() {
                render(&engine.cart(), engine.key(), ctx);
            }
            Ok(())
        }
        Outcome::Unchanged => {
            ctx.output.debug("Nothing to change");
            Ok(())
        }
        Outcome::Rejected(e) => Err(Rejected(e).into()),
    }
}

fn render(cart: &Cart, key: &str, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "key": key,
            "lines": cart,
            "items": cart.item_count(),
            "subtotal": cart.subtotal(),
        }));
        return;
    }

    if cart.is_empty() {
        ctx.output.info("Cart is empty");
        return;
    }

    ctx.output.header("Cart");
    let widths = [8, 32, 6, 10, 10];
    ctx.output.table_row(&["ID", "PRODUCT", "QTY", "PRICE", "SUBTOTAL"], &widths);
    for line in cart.lines() {
        let id = line.id.to_string();
        let title = truncate(&line.title, 32);
        let amount = line.amount.to_string();
        let price = format_price(line.price);
        let total = format_price(line.total());
        ctx.output.table_row(
            &[id.as_str(), title.as_str(), amount.as_str(), price.as_str(), total.as_str()],
            &widths,
        );
    }
    println!();
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("total", &format_price(cart.subtotal()));
}
