//! General Discord commands - ping, help and the menu.
//! These commands never touch the record store.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{catalog::BOX_SLOTS, money},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = format!(
            "**{} Help**\n\
            Build your order in a cart, then submit it with your name.\n\n\
            **Ordering**\n\
            • `/menu` - Shows every sweet with its price.\n\
            • `/cart add <item> <quantity>` - Sets how many of a sweet you want (0 removes it).\n\
            • `/cart box <slot1> <slot2> <slot3> <slot4>` - Adds a box of {BOX_SLOTS} sweets.\n\
            • `/cart remove_box <number>` - Removes a box from your cart.\n\
            • `/cart show` - Shows your cart and its total.\n\
            • `/cart clear` - Empties your cart.\n\
            • `/submit <name> [note]` - Places the order.\n\n\
            **Reports**\n\
            • `/orders` - Lists every submitted order.\n\
            • `/totals` - Units ordered per sweet, boxes included.\n\
            • `/export_totals` - Downloads the totals as CSV.\n\
            • `/export_orders` - Downloads all orders as CSV.\n\
            • `/audit` - Lists orders whose stored total disagrees with current prices.\n\
            • `/clear_orders confirm:true` - Deletes ALL orders.\n\n\
            **Utility**\n\
            • `/ping` - Checks if the bot is responsive.\n\
            • `/help` - Shows this help message.",
            ctx.data().shop_name
        );

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows every sweet with its price and the box offer.
    #[poise::command(slash_command, prefix_command)]
    pub async fn menu(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let catalog = &data.catalog;

        let mut embed_fields: Vec<(String, String, bool)> = catalog
            .items()
            .iter()
            .map(|item| {
                let value = if item.box_eligible {
                    format!("{} • 📦 can go in a box", money::format_brl(item.unit_price))
                } else {
                    money::format_brl(item.unit_price)
                };
                (item.name.clone(), value, false)
            })
            .collect();

        let offer = catalog.box_offer();
        embed_fields.push((
            format!("📦 {}", offer.name),
            format!(
                "{} • choose {BOX_SLOTS} sweets marked 📦, repeats allowed",
                money::format_brl(offer.price)
            ),
            false,
        ));

        let menu_embed = serenity::CreateEmbed::default()
            .title(format!("🍫 {}", data.shop_name))
            .description("Choose your sweets and place your order!")
            .color(0x008B_4513) // chocolate brown
            .fields(embed_fields);

        ctx.send(poise::CreateReply::default().embed(menu_embed))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
