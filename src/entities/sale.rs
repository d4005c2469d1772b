//! Sale entity - An immutable record of units sold from a product.
//!
//! `product_name` and `company` are captured at sale time so history stays
//! readable after the product is edited or deleted. `total` is stored
//! redundantly (`price * quantity`) for fast aggregation.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    /// Unique identifier for the sale
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product the sale depleted, if it was resolved at sale time
    pub product_id: Option<i64>,
    /// Product name at sale time
    pub product_name: String,
    /// Product company at sale time
    pub company: String,
    /// Optional customer name
    pub customer_name: Option<String>,
    /// Optional customer phone number
    pub phone_number: Option<String>,
    /// Units sold, at least 1
    pub quantity: i64,
    /// Unit price charged
    pub price: f64,
    /// `price * quantity`
    pub total: f64,
    /// Owner this sale belongs to
    pub owner_id: String,
    /// When the sale happened (user-selectable)
    pub sale_date: DateTimeUtc,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
