//! General Discord commands - ping, help and the inventory summary.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, owner_of},
        core::{
            product,
            report::{self, InventorySummary},
            sale,
        },
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**InventoryBuddy Help**\n\
        Here is a summary of all available commands for InventoryBuddy.\n\n\
        **Stock Commands**\n\
        • `/product add <name> <company> <formula> <quantity> [price]` - Adds a product with its opening stock.\n\
        • `/product restock <name> <quantity> [company] [date]` - Adds units to a product.\n\
        • `/product list [search]` - Lists your products and stock levels.\n\
        • `/product delete <name> [company]` - Deletes a product; its history is kept.\n\n\
        **Sales Commands**\n\
        • `/sell <product> <quantity> <price> [company] [customer] [phone] [date]` - Records a sale.\n\
        • `/sales [search] [date] [export]` - Shows sales history, optionally as CSV.\n\n\
        **Reports**\n\
        • `/stock_entries [search] [date]` - Shows the stock entry log.\n\
        • `/summary` - Shows inventory value, revenue and low-stock counts.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Dates use the YYYY-MM-DD format.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows the inventory dashboard: value on hand, revenue and stock alerts.
    #[poise::command(slash_command)]
    pub async fn summary(ctx: Context<'_>) -> Result<()> {
        let owner = owner_of(ctx)?;
        let db = &ctx.data().database;
        let settings = &ctx.data().settings.inventory;

        let products = product::get_all_products(db, &owner).await?;
        let sales = sale::get_all_sales(db, &owner).await?;
        let summary =
            InventorySummary::from_records(&products, &sales, settings.low_stock_threshold);

        let summary_embed = serenity::CreateEmbed::default()
            .title("**Inventory Summary**")
            .field("Products", summary.product_count.to_string(), true)
            .field(
                "Inventory Value",
                report::format_money(&settings.currency, summary.total_inventory_value),
                true,
            )
            .field(
                "Sales Revenue",
                report::format_money(&settings.currency, summary.total_sales_revenue),
                true,
            )
            .field(
                format!("Low Stock (< {})", summary.low_stock_threshold),
                summary.low_stock_count.to_string(),
                true,
            )
            .field("Out of Stock", summary.out_of_stock_count.to_string(), true)
            .color(0x0058_65F2);

        ctx.send(poise::CreateReply::default().embed(summary_embed))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
