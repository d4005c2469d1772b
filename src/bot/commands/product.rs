//! Product Discord commands - add, list, restock and delete.
//!
//! Every subcommand acts on the invoking user's products only.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context, commands::truncated_listing, effective_timestamp, handlers::autocomplete,
            owner_of,
        },
        core::{
            filter::RecordFilter,
            product::{self, NewProduct, ProductRef},
            report,
        },
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for managing products and their stock.
    #[poise::command(
        slash_command,
        subcommands("product_add", "product_list", "product_restock", "product_delete")
    )]
    pub async fn product(ctx: Context<'_>) -> Result<()> {
        let help_text = "Product management command. Available subcommands:\n\
            `/product add` - Add a new product with its opening stock\n\
            `/product list` - List your products and stock levels\n\
            `/product restock` - Add units to an existing product\n\
            `/product delete` - Delete a product (its history is kept)";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new product with its opening stock.
    #[poise::command(slash_command, rename = "add")]
    pub async fn product_add(
        ctx: Context<'_>,
        #[description = "Product name (e.g., 'Panadol 500mg')"] name: String,
        #[description = "Manufacturer or supplier"] company: String,
        #[description = "Active ingredient or formula"] formula: String,
        #[description = "Units on hand"]
        #[min = 0]
        quantity: i64,
        #[description = "Unit price; leave empty if unpriced"] price: Option<f64>,
    ) -> Result<()> {
        let owner = owner_of(ctx)?;
        let currency = &ctx.data().settings.inventory.currency;

        let created = product::create_product(
            &ctx.data().database,
            &owner,
            NewProduct {
                name,
                company,
                formula,
                quantity,
                price,
            },
        )
        .await?;

        let price_text = created
            .product
            .price
            .map_or_else(|| "no price".to_string(), |p| report::format_money(currency, p));
        ctx.say(format!(
            "✅ Product '{}' ({}) added with **{}** units at {}.",
            created.product.name, created.product.company, created.product.quantity, price_text
        ))
        .await?;
        Ok(())
    }

    /// Lists your products with stock levels, newest first.
    #[poise::command(slash_command, rename = "list")]
    pub async fn product_list(
        ctx: Context<'_>,
        #[description = "Filter by name, formula or company"] search: Option<String>,
    ) -> Result<()> {
        let owner = owner_of(ctx)?;
        let settings = &ctx.data().settings.inventory;

        let products = product::get_all_products(&ctx.data().database, &owner).await?;
        let products = RecordFilter::new(search.as_deref(), None).apply(products);

        if products.is_empty() {
            ctx.say("No products found. Use `/product add` to create some!")
                .await?;
            return Ok(());
        }

        let lines = products
            .iter()
            .map(|p| {
                format!(
                    "• {}",
                    report::format_product_line(p, &settings.currency, settings.low_stock_threshold)
                )
            })
            .collect();

        let list_embed = serenity::CreateEmbed::default()
            .title(format!("**Products** ({})", products.len()))
            .description(truncated_listing(lines))
            .color(0x0058_65F2);

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }

    /// Adds units to an existing product and logs a stock entry.
    #[poise::command(slash_command, rename = "restock")]
    pub async fn product_restock(
        ctx: Context<'_>,
        #[description = "Product to restock"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Units to add"]
        #[min = 1]
        quantity: i64,
        #[description = "Company, if several products share the name"] company: Option<String>,
        #[description = "Entry date (YYYY-MM-DD), defaults to today"] date: Option<String>,
    ) -> Result<()> {
        let owner = owner_of(ctx)?;
        let entry_date = effective_timestamp(date.as_deref())?;
        let db = &ctx.data().database;

        let target =
            product::resolve_product(db, &owner, &ProductRef::Name { name, company }).await?;
        let restocked =
            product::increase_stock(db, &owner, target.id, quantity, entry_date).await?;

        ctx.say(format!(
            "✅ Added **{}** units to '{}'. Now {} units on hand.",
            restocked.entry.quantity, restocked.product.name, restocked.product.quantity
        ))
        .await?;
        Ok(())
    }

    /// Deletes a product. Its sales and stock entries are kept.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn product_delete(
        ctx: Context<'_>,
        #[description = "Product to delete"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Company, if several products share the name"] company: Option<String>,
    ) -> Result<()> {
        let owner = owner_of(ctx)?;
        let db = &ctx.data().database;

        let target =
            product::resolve_product(db, &owner, &ProductRef::Name { name, company }).await?;
        let deleted = product::delete_product(db, &owner, target.id).await?;

        ctx.say(format!(
            "✅ Product '{}' has been deleted. Its sales and stock history are kept.",
            deleted.name
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
