//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation through `SeaORM`. Tables
//! are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL.

use crate::entities::{Product, Sale, StockEntry};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

/// Fallback location of the database when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/inventory_buddy.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file under `data/` (created if missing) if
/// no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all("data")?;
    }
    debug!("Connecting to database at {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the products, sales and stock entry tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table = schema.create_table_from_entity(Product);
    let mut sale_table = schema.create_table_from_entity(Sale);
    let mut stock_entry_table = schema.create_table_from_entity(StockEntry);
    product_table.if_not_exists();
    sale_table.if_not_exists();
    stock_entry_table.if_not_exists();

    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&sale_table)).await?;
    db.execute(builder.build(&stock_entry_table)).await?;

    info!("Database tables ensured (products, sales, stock_entries).");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{product, sale, stock_entry};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<product::Model> = Product::find().limit(1).all(&db).await?;
        let _: Vec<sale::Model> = Sale::find().limit(1).all(&db).await?;
        let _: Vec<stock_entry::Model> = StockEntry::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
