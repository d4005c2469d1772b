//! Report generation business logic.
//!
//! Pure functions over record slices: inventory value, sales revenue,
//! low-stock counts and the summaries shown on the dashboard, sales history
//! and stock entry log. Nothing here touches the store. The low-stock
//! threshold always comes from the caller (normally
//! `InventorySettings::low_stock_threshold`).

use crate::entities::{EntryType, product, sale, stock_entry};
use std::fmt;

/// Display classification of a single product's stock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    /// No units on hand
    OutOfStock,
    /// Some units, but fewer than the threshold
    LowStock,
    /// At or above the threshold
    InStock,
}

impl StockStatus {
    /// Classifies a quantity against the low-stock threshold.
    #[must_use]
    pub const fn classify(quantity: i64, low_stock_threshold: i64) -> Self {
        if quantity <= 0 {
            Self::OutOfStock
        } else if quantity < low_stock_threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::LowStock => "Low Stock",
            Self::InStock => "In Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Σ quantity × price over all products; unpriced products count as 0.
#[must_use]
pub fn total_inventory_value(products: &[product::Model]) -> f64 {
    products.iter().map(product::Model::stock_value).sum()
}

/// Σ of the stored sale totals.
#[must_use]
pub fn total_sales_revenue(sales: &[sale::Model]) -> f64 {
    sales.iter().map(|s| s.total).sum()
}

/// Number of products with fewer units than `threshold`. Out-of-stock
/// products are included.
#[must_use]
pub fn low_stock_count(products: &[product::Model], threshold: i64) -> usize {
    products.iter().filter(|p| p.quantity < threshold).count()
}

/// Number of products with no units on hand.
#[must_use]
pub fn out_of_stock_count(products: &[product::Model]) -> usize {
    products.iter().filter(|p| p.quantity <= 0).count()
}

/// Mean sale total, or 0 when there are no sales.
#[must_use]
pub fn average_sale_value(sales: &[sale::Model]) -> f64 {
    if sales.is_empty() {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = sales.len() as f64;
    total_sales_revenue(sales) / count
}

/// Σ of unit counts, saturating at `i64::MAX`.
fn total_units(quantities: impl Iterator<Item = i64>) -> i64 {
    quantities.fold(0, i64::saturating_add)
}

/// Dashboard figures.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySummary {
    /// Number of products
    pub product_count: usize,
    /// Value of all stock on hand
    pub total_inventory_value: f64,
    /// Revenue across all sales
    pub total_sales_revenue: f64,
    /// Products below the threshold (including out of stock)
    pub low_stock_count: usize,
    /// Products with zero units
    pub out_of_stock_count: usize,
    /// Threshold the counts were computed with
    pub low_stock_threshold: i64,
}

impl InventorySummary {
    /// Computes the dashboard figures from the current record sets.
    #[must_use]
    pub fn from_records(
        products: &[product::Model],
        sales: &[sale::Model],
        low_stock_threshold: i64,
    ) -> Self {
        Self {
            product_count: products.len(),
            total_inventory_value: total_inventory_value(products),
            total_sales_revenue: total_sales_revenue(sales),
            low_stock_count: low_stock_count(products, low_stock_threshold),
            out_of_stock_count: out_of_stock_count(products),
            low_stock_threshold,
        }
    }
}

/// Summary cards of the sales history view, computed over a (possibly filtered) list.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    /// Number of sales
    pub sale_count: usize,
    /// Σ totals
    pub revenue: f64,
    /// Revenue / count, 0 when empty
    pub average_sale_value: f64,
    /// Σ quantities
    pub units_sold: i64,
}

impl SalesSummary {
    /// Summarizes a list of sales.
    #[must_use]
    pub fn from_sales(sales: &[sale::Model]) -> Self {
        Self {
            sale_count: sales.len(),
            revenue: total_sales_revenue(sales),
            average_sale_value: average_sale_value(sales),
            units_sold: total_units(sales.iter().map(|s| s.quantity)),
        }
    }
}

/// Summary cards of the stock entry log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockEntrySummary {
    /// Number of entries
    pub total_entries: usize,
    /// Entries that created a product
    pub new_products: usize,
    /// Entries that restocked an existing product
    pub stock_updates: usize,
    /// Σ quantities
    pub units_added: i64,
}

impl StockEntrySummary {
    /// Summarizes a list of stock entries.
    #[must_use]
    pub fn from_entries(entries: &[stock_entry::Model]) -> Self {
        let new_products = entries
            .iter()
            .filter(|e| e.entry_type == EntryType::New)
            .count();
        Self {
            total_entries: entries.len(),
            new_products,
            stock_updates: entries.len() - new_products,
            units_added: total_units(entries.iter().map(|e| e.quantity)),
        }
    }
}

/// Formats a money amount with its currency code and two decimals.
///
/// # Returns
/// Formatted string like "PKR 1250.00"
#[must_use]
pub fn format_money(currency: &str, amount: f64) -> String {
    format!("{currency} {amount:.2}")
}

/// One-line description of a product for listings, e.g.
/// `Panadol (GSK) - 4 units @ PKR 12.00 - Low Stock`.
#[must_use]
pub fn format_product_line(
    product: &product::Model,
    currency: &str,
    low_stock_threshold: i64,
) -> String {
    let price = product
        .price
        .map_or_else(|| "unpriced".to_string(), |p| format_money(currency, p));
    format!(
        "{} ({}) - {} units @ {} - {}",
        product.name,
        product.company,
        product.quantity,
        price,
        StockStatus::classify(product.quantity, low_stock_threshold)
    )
}
