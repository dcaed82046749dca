//! Cart Discord commands - build a draft order and submit it.
//!
//! Each user has their own draft cart held in [`BotData`](crate::bot::BotData). Submission
//! snapshots the cart into an immutable order input and hands it to the core.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            cart::Cart,
            catalog::{BOX_SLOTS, Catalog},
            money,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use rust_decimal::Decimal;
    use std::fmt::Write;

    /// Parent command for building your order.
    #[poise::command(
        slash_command,
        subcommands("cart_add", "cart_box", "cart_remove_box", "cart_show", "cart_clear")
    )]
    pub async fn cart(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Cart command. Available subcommands:\n\
            `/cart add` - Set the quantity of a sweet\n\
            `/cart box` - Add a box of sweets\n\
            `/cart remove_box` - Remove a box\n\
            `/cart show` - Show your cart\n\
            `/cart clear` - Empty your cart";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Sets how many units of a sweet you want. Zero removes it.
    #[poise::command(slash_command, rename = "add")]
    pub async fn cart_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Sweet to add"]
        #[autocomplete = "autocomplete::autocomplete_item_name"]
        item: String,
        #[description = "How many units (0 removes the sweet)"]
        #[min = 0]
        // Must match `order::MAX_QUANTITY`; poise only takes a literal here.
        #[max = 9999]
        quantity: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id;

        let result = {
            let mut carts = data.carts.write().await;
            let cart = carts.entry(user_id).or_default();
            cart.set_quantity(&data.catalog, &item, quantity)
                .map(|()| cart.subtotal(&data.catalog))
        };

        match result {
            Ok(subtotal) if quantity == 0 => {
                ctx.say(format!(
                    "🗑️ Removed '{item}' from your cart. Cart total: **{}**",
                    money::format_brl(subtotal)
                ))
                .await?;
            }
            Ok(subtotal) => {
                ctx.say(format!(
                    "✅ {item} (x{quantity}) in your cart. Cart total: **{}**",
                    money::format_brl(subtotal)
                ))
                .await?;
            }
            Err(e) if e.is_validation() => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Adds a box of four sweets to your cart.
    #[poise::command(slash_command, rename = "box")]
    pub async fn cart_box(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Sweet 1"]
        #[autocomplete = "autocomplete::autocomplete_box_item"]
        slot1: String,
        #[description = "Sweet 2"]
        #[autocomplete = "autocomplete::autocomplete_box_item"]
        slot2: String,
        #[description = "Sweet 3"]
        #[autocomplete = "autocomplete::autocomplete_box_item"]
        slot3: String,
        #[description = "Sweet 4"]
        #[autocomplete = "autocomplete::autocomplete_box_item"]
        slot4: String,
    ) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id;
        let slots = vec![slot1, slot2, slot3, slot4];

        let result = {
            let mut carts = data.carts.write().await;
            let cart = carts.entry(user_id).or_default();
            cart.add_box(&data.catalog, &slots)
                .map(|number| (number, cart.subtotal(&data.catalog)))
        };

        match result {
            Ok((number, subtotal)) => {
                ctx.say(format!(
                    "📦 Box #{number}: {}. Cart total: **{}**",
                    slots.join(", "),
                    money::format_brl(subtotal)
                ))
                .await?;
            }
            Err(e) if e.is_validation() => {
                let eligible: Vec<&str> = data
                    .catalog
                    .box_eligible()
                    .map(|item| item.name.as_str())
                    .collect();
                ctx.say(format!(
                    "❌ {e}\nEach box holds {BOX_SLOTS} of: {}",
                    eligible.join(", ")
                ))
                .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Removes a box from your cart.
    #[poise::command(slash_command, rename = "remove_box")]
    pub async fn cart_remove_box(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Box number as shown in /cart show"]
        #[min = 1]
        number: usize,
    ) -> Result<()> {
        let data = ctx.data();
        let removed = data
            .carts
            .write()
            .await
            .get_mut(&ctx.author().id)
            .is_some_and(|cart| cart.remove_box(number));

        if removed {
            ctx.say(format!("🗑️ Box #{number} removed from your cart."))
                .await?;
        } else {
            ctx.say(format!("❌ Your cart has no box #{number}.")).await?;
        }
        Ok(())
    }

    /// Shows your cart and its running total.
    #[poise::command(slash_command, rename = "show")]
    pub async fn cart_show(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let cart = data
            .carts
            .read()
            .await
            .get(&ctx.author().id)
            .cloned()
            .unwrap_or_default();

        if cart.is_empty() {
            ctx.say("🛒 Your cart is empty. Use `/cart add` or `/cart box` to pick sweets!")
                .await?;
            return Ok(());
        }

        let description = describe_cart(&cart, &data.catalog)?;
        let cart_embed = serenity::CreateEmbed::default()
            .title("🛒 Your cart")
            .color(0x008B_4513)
            .description(description)
            .field(
                "Total",
                money::format_brl(cart.subtotal(&data.catalog)),
                false,
            );

        ctx.send(poise::CreateReply::default().embed(cart_embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Empties your cart.
    #[poise::command(slash_command, rename = "clear")]
    pub async fn cart_clear(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.data().carts.write().await.remove(&ctx.author().id);
        ctx.say("🧹 Your cart is now empty.").await?;
        Ok(())
    }

    /// Places your order with the contents of your cart.
    #[poise::command(slash_command, prefix_command)]
    pub async fn submit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your full name"] name: String,
        #[description = "Anything we should know (optional)"] note: Option<String>,
    ) -> Result<()> {
        let result = ctx
            .data()
            .submit_cart(ctx.author().id, &name, note.as_deref().unwrap_or_default())
            .await;

        match result {
            Ok(record) => {
                ctx.say(format!(
                    "✅ Order for **{}** recorded! 🍬 Total: **{}**\n{}",
                    record.customer_name,
                    money::format_brl(record.total),
                    record.encoded_order
                ))
                .await?;
            }
            Err(e) if e.is_validation() => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => {
                ctx.say("❌ Failed to record your order. Please try again later.")
                    .await?;
                return Err(e);
            }
        }
        Ok(())
    }

    fn describe_cart(cart: &Cart, catalog: &Catalog) -> Result<String> {
        let mut text = String::new();
        for item in catalog.items() {
            if let Some(&quantity) = cart.quantities().get(&item.name) {
                writeln!(
                    &mut text,
                    "• {} (x{quantity}) - {}",
                    item.name,
                    money::format_brl(item.unit_price * Decimal::from(quantity))
                )?;
            }
        }
        for (i, selection) in cart.boxes().iter().enumerate() {
            writeln!(
                &mut text,
                "• 📦 Box #{}: {} - {}",
                i + 1,
                selection.join(", "),
                money::format_brl(catalog.box_offer().price)
            )?;
        }
        Ok(text)
    }
}

// Re-export all commands
pub use inner::*;
