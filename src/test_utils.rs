//! Shared test utilities for `InventoryBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{
        OwnerId,
        product::{self, NewProduct, ProductRef},
        sale::NewSale,
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The owner most tests act as.
///
/// # Panics
/// Never; the id is a non-empty literal.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_owner() -> OwnerId {
    OwnerId::new("owner-1").expect("literal owner id")
}

/// A second owner, used to check isolation.
#[must_use]
#[allow(clippy::expect_used)]
pub fn other_owner() -> OwnerId {
    OwnerId::new("owner-2").expect("literal owner id")
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * company: "Test Pharma"
/// * formula: "Test formula"
/// * price: 10.0
pub async fn create_test_product(
    db: &DatabaseConnection,
    owner: &OwnerId,
    name: &str,
    quantity: i64,
) -> Result<entities::product::Model> {
    create_custom_product(db, owner, name, quantity, Some(10.0)).await
}

/// Creates a test product with a custom price.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    owner: &OwnerId,
    name: &str,
    quantity: i64,
    price: Option<f64>,
) -> Result<entities::product::Model> {
    let created = product::create_product(
        db,
        owner,
        NewProduct {
            name: name.to_string(),
            company: "Test Pharma".to_string(),
            formula: "Test formula".to_string(),
            quantity,
            price,
        },
    )
    .await?;
    Ok(created.product)
}

/// Sale input with no date or customer details.
#[must_use]
pub fn test_sale(product: ProductRef, quantity: i64, price: f64) -> NewSale {
    NewSale {
        product,
        quantity,
        price,
        sale_date: None,
        customer_name: None,
        phone_number: None,
    }
}

/// Sets up a database with one 20-unit product owned by [`test_owner`].
/// Returns (db, owner, product) for product and sale tests.
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    OwnerId,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let owner = test_owner();
    let product = create_test_product(&db, &owner, "Test Product", 20).await?;
    Ok((db, owner, product))
}
