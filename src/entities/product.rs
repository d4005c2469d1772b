//! Product entity - Represents a catalog item with a tracked on-hand quantity.
//!
//! Quantity only changes through the consistency engine in `core`, always
//! together with an appended `stock_entries` or `sales` row. Deleting a product
//! leaves those rows in place; they carry their own copy of the product's
//! name, company and formula.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "Panadol 500mg")
    pub name: String,
    /// Manufacturer or supplier
    pub company: String,
    /// Formula or free-form description
    pub formula: String,
    /// Units on hand, never negative
    pub quantity: i64,
    /// Price per unit; `None` means the product is unpriced
    pub price: Option<f64>,
    /// Owner this product belongs to
    pub owner_id: String,
    /// When the product was created
    pub created_at: DateTimeUtc,
    /// When the product was last modified
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Value of the units on hand, treating an unpriced product as worth nothing.
    #[must_use]
    pub fn stock_value(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let units = self.quantity as f64;
        units * self.price.unwrap_or(0.0)
    }
}
