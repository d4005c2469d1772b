//! Sale Discord commands - `sell` and `sales`.
//!
//! `sell` records a sale and deducts stock; `sales` shows the filtered sales
//! history with its summary and can attach it as a CSV file.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context, commands::truncated_listing, effective_timestamp, handlers::autocomplete,
            owner_of, parse_day,
        },
        core::{
            export,
            filter::RecordFilter,
            product::ProductRef,
            report::{self, SalesSummary},
            sale::{self, NewSale},
        },
        errors::Result,
    };
    use chrono::Local;
    use poise::serenity_prelude as serenity;

    /// Records a sale and deducts the units from stock.
    #[poise::command(slash_command)]
    pub async fn sell(
        ctx: Context<'_>,
        #[description = "Product sold"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
        #[description = "Units sold"]
        #[min = 1]
        quantity: i64,
        #[description = "Unit price charged"] price: f64,
        #[description = "Company, if several products share the name"] company: Option<String>,
        #[description = "Customer name"] customer: Option<String>,
        #[description = "Customer phone number"] phone: Option<String>,
        #[description = "Sale date (YYYY-MM-DD), defaults to today"] date: Option<String>,
    ) -> Result<()> {
        let owner = owner_of(ctx)?;
        let sale_date = effective_timestamp(date.as_deref())?;
        let currency = &ctx.data().settings.inventory.currency;

        let recorded = sale::record_sale(
            &ctx.data().database,
            &owner,
            NewSale {
                product: ProductRef::Name {
                    name: product,
                    company,
                },
                quantity,
                price,
                sale_date: Some(sale_date),
                customer_name: customer,
                phone_number: phone,
            },
        )
        .await?;

        ctx.say(format!(
            "✅ Sold **{}** x '{}' for **{}**. {} units left.",
            recorded.sale.quantity,
            recorded.sale.product_name,
            report::format_money(currency, recorded.sale.total),
            recorded.product.quantity
        ))
        .await?;
        Ok(())
    }

    /// Shows your sales history, newest first, optionally as a CSV file.
    #[poise::command(slash_command)]
    pub async fn sales(
        ctx: Context<'_>,
        #[description = "Filter by product name or company"] search: Option<String>,
        #[description = "Only sales on this day (YYYY-MM-DD)"] date: Option<String>,
        #[description = "Attach the listed sales as a CSV file"] export: Option<bool>,
    ) -> Result<()> {
        let owner = owner_of(ctx)?;
        let day = date.as_deref().map(parse_day).transpose()?;
        let currency = &ctx.data().settings.inventory.currency;

        let sales = sale::get_all_sales(&ctx.data().database, &owner).await?;
        let sales = RecordFilter::new(search.as_deref(), day).apply(sales);

        if sales.is_empty() {
            ctx.say("No sales found.").await?;
            return Ok(());
        }

        let summary = SalesSummary::from_sales(&sales);
        let lines = sales
            .iter()
            .map(|s| {
                format!(
                    "• {} - {} ({}) x{} @ {} = {}",
                    s.sale_date.with_timezone(&Local).format("%Y-%m-%d"),
                    s.product_name,
                    s.company,
                    s.quantity,
                    report::format_money(currency, s.price),
                    report::format_money(currency, s.total)
                )
            })
            .collect();

        let history_embed = serenity::CreateEmbed::default()
            .title("**Sales History**")
            .description(truncated_listing(lines))
            .field("Sales", summary.sale_count.to_string(), true)
            .field("Revenue", report::format_money(currency, summary.revenue), true)
            .field(
                "Average Sale",
                report::format_money(currency, summary.average_sale_value),
                true,
            )
            .field("Units Sold", summary.units_sold.to_string(), true)
            .color(0x0057_F287);

        let mut reply = poise::CreateReply::default().embed(history_embed);
        if export.unwrap_or(false) {
            let csv = export::export_sales_csv(&sales)?;
            let filename = export::export_filename(Local::now().date_naive());
            reply = reply.attachment(serenity::CreateAttachment::bytes(
                csv.into_bytes(),
                filename,
            ));
        }

        ctx.send(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
