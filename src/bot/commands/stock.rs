//! Stock entry Discord commands - the append-only stock log.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, commands::truncated_listing, owner_of, parse_day},
        core::{filter::RecordFilter, report::StockEntrySummary, stock_entry},
        errors::Result,
    };
    use chrono::Local;
    use poise::serenity_prelude as serenity;

    /// Shows the stock entry log, newest first.
    #[poise::command(slash_command)]
    pub async fn stock_entries(
        ctx: Context<'_>,
        #[description = "Filter by product name, company or formula"] search: Option<String>,
        #[description = "Only entries on this day (YYYY-MM-DD)"] date: Option<String>,
    ) -> Result<()> {
        let owner = owner_of(ctx)?;
        let day = date.as_deref().map(parse_day).transpose()?;

        let entries = stock_entry::get_all_stock_entries(&ctx.data().database, &owner).await?;
        let entries = RecordFilter::new(search.as_deref(), day).apply(entries);

        if entries.is_empty() {
            ctx.say("No stock entries found.").await?;
            return Ok(());
        }

        let summary = StockEntrySummary::from_entries(&entries);
        let lines = entries
            .iter()
            .map(|e| {
                format!(
                    "• {} - {} ({}) +{} [{}]",
                    e.entry_date.with_timezone(&Local).format("%Y-%m-%d"),
                    e.product_name,
                    e.company,
                    e.quantity,
                    e.entry_type
                )
            })
            .collect();

        let log_embed = serenity::CreateEmbed::default()
            .title("**Stock Entries**")
            .description(truncated_listing(lines))
            .field("Entries", summary.total_entries.to_string(), true)
            .field("New Products", summary.new_products.to_string(), true)
            .field("Stock Updates", summary.stock_updates.to_string(), true)
            .field("Units Added", summary.units_added.to_string(), true)
            .color(0x00FE_E75C);

        ctx.send(poise::CreateReply::default().embed(log_embed))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
