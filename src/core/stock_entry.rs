//! Stock entry log - append-only record of quantity increases.
//!
//! Entries are only written by the product operations in this crate, inside
//! the same store transaction as the quantity change they describe. Nothing
//! updates or deletes them.

use crate::{
    core::OwnerId,
    entities::{EntryType, StockEntry, product, stock_entry},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Appends a stock entry that snapshots the product's name, company and formula.
pub(crate) async fn append_stock_entry<C>(
    db: &C,
    owner: &OwnerId,
    product: &product::Model,
    quantity: i64,
    entry_type: EntryType,
    entry_date: DateTime<Utc>,
) -> Result<stock_entry::Model>
where
    C: ConnectionTrait,
{
    let entry = stock_entry::ActiveModel {
        product_id: Set(Some(product.id)),
        product_name: Set(product.name.clone()),
        company: Set(product.company.clone()),
        formula: Set(product.formula.clone()),
        quantity: Set(quantity),
        entry_type: Set(entry_type),
        owner_id: Set(owner.as_str().to_string()),
        entry_date: Set(entry_date),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    debug!(
        "Logged {:?} stock entry {} for product {} (+{})",
        entry.entry_type, entry.id, product.id, entry.quantity
    );
    Ok(entry)
}

/// Retrieves all of the owner's stock entries, most recent entry date first.
pub async fn get_all_stock_entries<C>(
    db: &C,
    owner: &OwnerId,
) -> Result<Vec<stock_entry::Model>>
where
    C: ConnectionTrait,
{
    StockEntry::find()
        .filter(stock_entry::Column::OwnerId.eq(owner.as_str()))
        .order_by_desc(stock_entry::Column::EntryDate)
        .all(db)
        .await
        .map_err(Into::into)
}
