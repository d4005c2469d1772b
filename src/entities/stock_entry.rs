//! Stock entry entity - Append-only log of quantity increases.
//!
//! Each entry is tagged with an [`EntryType`]: `new` when the entry created the
//! product, `existing` when units were added to a product that already existed.
//! The tag is stored as text; the mapping lives here and nowhere else.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a stock entry was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// The product was created by this entry
    #[sea_orm(string_value = "new")]
    New,
    /// Units were added to a pre-existing product
    #[sea_orm(string_value = "existing")]
    Existing,
}

impl EntryType {
    /// Label used in listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New Product",
            Self::Existing => "Stock Update",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stock entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product the entry applies to
    pub product_id: Option<i64>,
    /// Product name when the entry was written
    pub product_name: String,
    /// Product company when the entry was written
    pub company: String,
    /// Product formula when the entry was written
    pub formula: String,
    /// Units added, always positive
    pub quantity: i64,
    /// `new` or `existing`
    pub entry_type: EntryType,
    /// Owner this entry belongs to
    pub owner_id: String,
    /// Effective date of the entry (user-selectable)
    pub entry_date: DateTimeUtc,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
