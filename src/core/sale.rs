//! Sale business logic - recording and listing sales.
//!
//! Recording a sale checks the available stock, inserts the sale and deducts
//! the units in one store transaction. The deduction is a conditional update
//! (`quantity = quantity - n WHERE quantity >= n`), so two sessions selling the
//! same product cannot push it below zero: whichever loses the race gets
//! `Error::InsufficientStock` and its sale is rolled back.

use crate::{
    core::{
        OwnerId,
        product::{ProductRef, get_product_by_id, resolve_product},
    },
    entities::{Product, Sale, product, sale},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument, warn};

/// Input for [`record_sale`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    /// Product being sold
    pub product: ProductRef,
    /// Units sold, at least 1
    pub quantity: i64,
    /// Unit price charged
    pub price: f64,
    /// When the sale happened; defaults to now
    pub sale_date: Option<DateTime<Utc>>,
    /// Optional customer name
    pub customer_name: Option<String>,
    /// Optional customer phone number
    pub phone_number: Option<String>,
}

/// A committed sale and the product after the deduction.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSale {
    /// The sale as stored
    pub sale: sale::Model,
    /// The product with its reduced quantity
    pub product: product::Model,
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Computes `price * quantity`, the stored sale total.
#[must_use]
pub fn sale_total(price: f64, quantity: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let units = quantity as f64;
    price * units
}

/// Deducts `quantity` units if at least that many are on hand.
///
/// Returns the product after the update. When the guard fails the current
/// quantity is re-read and reported as `Error::InsufficientStock`.
async fn deduct_stock<C>(
    db: &C,
    owner: &OwnerId,
    product: &product::Model,
    quantity: i64,
) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let result = Product::update_many()
        .col_expr(
            product::Column::Quantity,
            Expr::col(product::Column::Quantity).sub(quantity),
        )
        .col_expr(product::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(product::Column::Id.eq(product.id))
        .filter(product::Column::OwnerId.eq(owner.as_str()))
        .filter(product::Column::Quantity.gte(quantity))
        .exec(db)
        .await?;

    let current = get_product_by_id(db, owner, product.id)
        .await?
        .ok_or_else(|| Error::product_not_found(product.id))?;

    if result.rows_affected == 0 {
        warn!(
            "Stock guard rejected sale of {} '{}': {} on hand",
            quantity, current.name, current.quantity
        );
        return Err(Error::InsufficientStock {
            product: current.name,
            requested: quantity,
            available: current.quantity,
        });
    }

    Ok(current)
}

/// Records a sale and deducts the sold units from the product.
///
/// The product is resolved by id, or by exact name among the owner's products.
/// Its name and company are copied into the sale so history survives later
/// edits or deletion.
///
/// # Errors
/// - `Error::Validation` if the quantity is below 1, the price is negative or
///   not finite, or a name matches several products
/// - `Error::NotFound` if the product cannot be resolved
/// - `Error::InsufficientStock` if fewer units are on hand than requested;
///   nothing is written
/// - `Error::Store` if a store call fails; nothing is committed
#[instrument(skip(db, owner, new_sale), fields(owner = %owner))]
pub async fn record_sale(
    db: &DatabaseConnection,
    owner: &OwnerId,
    new_sale: NewSale,
) -> Result<RecordedSale> {
    if new_sale.quantity < 1 {
        return Err(Error::validation(format!(
            "Quantity sold must be at least 1, got {}",
            new_sale.quantity
        )));
    }
    if !new_sale.price.is_finite() || new_sale.price < 0.0 {
        return Err(Error::validation(format!(
            "Price must be a non-negative number, got {}",
            new_sale.price
        )));
    }

    let txn = db.begin().await?;
    let product = resolve_product(&txn, owner, &new_sale.product).await?;
    let recorded = sell_from(&txn, owner, product, new_sale).await?;
    txn.commit().await?;

    info!(
        "Recorded sale {} of {} '{}' for {:.2}; {} left",
        recorded.sale.id,
        recorded.sale.quantity,
        recorded.sale.product_name,
        recorded.sale.total,
        recorded.product.quantity
    );
    Ok(recorded)
}

/// Checks `product` against the requested quantity, inserts the sale and
/// deducts the units. `product` may be stale; the deduction guard is the
/// final check, and on failure the caller's transaction must be dropped so
/// the inserted sale goes with it.
async fn sell_from<C>(
    db: &C,
    owner: &OwnerId,
    product: product::Model,
    new_sale: NewSale,
) -> Result<RecordedSale>
where
    C: ConnectionTrait,
{
    if new_sale.quantity > product.quantity {
        return Err(Error::InsufficientStock {
            product: product.name,
            requested: new_sale.quantity,
            available: product.quantity,
        });
    }

    let now = Utc::now();
    let total = sale_total(new_sale.price, new_sale.quantity);

    let sale = sale::ActiveModel {
        product_id: Set(Some(product.id)),
        product_name: Set(product.name.clone()),
        company: Set(product.company.clone()),
        customer_name: Set(optional_text(new_sale.customer_name)),
        phone_number: Set(optional_text(new_sale.phone_number)),
        quantity: Set(new_sale.quantity),
        price: Set(new_sale.price),
        total: Set(total),
        owner_id: Set(owner.as_str().to_string()),
        sale_date: Set(new_sale.sale_date.unwrap_or(now)),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let product = deduct_stock(db, owner, &product, new_sale.quantity).await?;
    Ok(RecordedSale { sale, product })
}

/// Retrieves all of the owner's sales, most recent sale date first.
pub async fn get_all_sales<C>(db: &C, owner: &OwnerId) -> Result<Vec<sale::Model>>
where
    C: ConnectionTrait,
{
    Sale::find()
        .filter(sale::Column::OwnerId.eq(owner.as_str()))
        .order_by_desc(sale::Column::SaleDate)
        .all(db)
        .await
        .map_err(Into::into)
}
