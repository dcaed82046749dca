//! Order report Discord commands - listing, totals, downloads, audit and wipe.
//!
//! These commands only read from or wipe the record store; submissions go through
//! `/submit` in the cart module.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{export, money, report},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::info;

    /// Discord caps embed descriptions at 4096 characters.
    const EMBED_DESCRIPTION_LIMIT: usize = 4000;
    /// Discord caps plain messages at 2000 characters.
    const MESSAGE_LIMIT: usize = 1900;

    const NO_ORDERS: &str = "📭 No orders have been recorded yet.";

    /// Lists every submitted order.
    #[poise::command(slash_command, prefix_command)]
    pub async fn orders(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        if !data.store.exists() {
            ctx.say(NO_ORDERS).await?;
            return Ok(());
        }

        let records = data.store.read_all_records()?;
        if records.is_empty() {
            ctx.say(NO_ORDERS).await?;
            return Ok(());
        }

        let orders_embed = serenity::CreateEmbed::default()
            .title("📋 Order report")
            .color(0x008B_4513)
            .description(report::format_record_list(
                &records,
                EMBED_DESCRIPTION_LIMIT,
            ))
            .field("Orders", records.len().to_string(), true)
            .field(
                "Revenue",
                money::format_brl(report::revenue(&records)),
                true,
            );

        ctx.send(poise::CreateReply::default().embed(orders_embed))
            .await?;
        Ok(())
    }

    /// Units ordered per sweet, counting the sweets inside boxes.
    #[poise::command(slash_command, prefix_command)]
    pub async fn totals(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let Some(totals) = report::generate_totals_report(&data.store, &data.catalog)? else {
            ctx.say(NO_ORDERS).await?;
            return Ok(());
        };

        let totals_embed = serenity::CreateEmbed::default()
            .title("🍭 Totals per sweet (boxes included)")
            .color(0x008B_4513)
            .description(report::format_totals(&totals)?);

        ctx.send(poise::CreateReply::default().embed(totals_embed))
            .await?;
        Ok(())
    }

    /// Downloads the totals per sweet as CSV.
    #[poise::command(slash_command, prefix_command)]
    pub async fn export_totals(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let Some(totals) = report::generate_totals_report(&data.store, &data.catalog)? else {
            ctx.say(NO_ORDERS).await?;
            return Ok(());
        };

        let bytes = export::totals_csv(&totals)?;
        let attachment = serenity::CreateAttachment::bytes(bytes, export::TOTALS_FILE_NAME);
        ctx.send(
            poise::CreateReply::default()
                .content("💾 Totals per sweet")
                .attachment(attachment),
        )
        .await?;
        Ok(())
    }

    /// Downloads every submitted order as CSV.
    #[poise::command(slash_command, prefix_command)]
    pub async fn export_orders(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(bytes) = ctx.data().store.raw_bytes()? else {
            ctx.say(NO_ORDERS).await?;
            return Ok(());
        };

        let attachment = serenity::CreateAttachment::bytes(bytes, export::RECORDS_FILE_NAME);
        ctx.send(
            poise::CreateReply::default()
                .content("💾 Order report")
                .attachment(attachment),
        )
        .await?;
        Ok(())
    }

    /// Lists orders whose stored total disagrees with current catalog prices.
    #[poise::command(slash_command, prefix_command)]
    pub async fn audit(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let records = data.store.read_all_records()?;
        if records.is_empty() {
            ctx.say(NO_ORDERS).await?;
            return Ok(());
        }

        let mismatches = report::audit_records(&records, &data.catalog);
        if mismatches.is_empty() {
            ctx.say(format!(
                "✅ All {} stored totals match their orders.",
                records.len()
            ))
            .await?;
            return Ok(());
        }

        let mut text = format!("⚠️ {} order(s) with a mismatched total:\n", mismatches.len());
        for mismatch in &mismatches {
            let line = format!(
                "{}. **{}** stored {} but the order prices at {}\n",
                mismatch.position,
                mismatch.record.customer_name,
                money::format_brl(mismatch.record.total),
                money::format_brl(mismatch.expected)
            );
            if text.len() + line.len() > MESSAGE_LIMIT {
                text.push('…');
                break;
            }
            text.push_str(&line);
        }

        ctx.say(text).await?;
        Ok(())
    }

    /// Deletes ALL submitted orders.
    #[poise::command(slash_command, prefix_command)]
    pub async fn clear_orders(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Set to true to confirm deleting every order"] confirm: bool,
    ) -> Result<()> {
        if !confirm {
            ctx.say("Nothing deleted. Run `/clear_orders confirm:true` to delete every order.")
                .await?;
            return Ok(());
        }

        ctx.data().store.clear_all()?;
        info!("Orders cleared by {}", ctx.author().name);
        ctx.say("🗑️ All orders were deleted.").await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
